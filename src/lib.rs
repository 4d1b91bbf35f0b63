//! Filterable analytics over a year's training-program calendar.
//!
//! Records are loaded once and never mutated. A `Dashboard` holds the
//! filter and page, and every view (KPIs, monthly series, breakdowns,
//! seasonal labels, the visible page and the export rows) is recomputed
//! from the records on demand.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pager;
pub mod reports;
pub mod types;
pub mod util;

pub use dashboard::{compute_view, Dashboard, DashboardSummary, DashboardView};
pub use error::DashboardError;
pub use filter::{Dimension, Filter};
pub use types::{ExtraDimension, GroupField, Record, Status};
