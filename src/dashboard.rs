//! Filter and page state, and the view derived from it.
//!
//! `Dashboard` owns the only mutable state. Every view is recomputed in
//! full from the records on each call.

use crate::export::{self, ExportLayout, ExportTable};
use crate::filter::{self, Dimension, Filter};
use crate::pager::{PageInfo, Pager};
use crate::reports;
use crate::types::{Breakdowns, ExtraDimension, KpiTotals, MonthlyPoint, Record, SeasonReport};
use chrono::{DateTime, Local};
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct DashboardView<'a> {
    pub filtered: Vec<&'a Record>,
    pub kpis: KpiTotals,
    pub monthly: Vec<MonthlyPoint>,
    pub breakdowns: Breakdowns,
    pub seasons: SeasonReport,
    pub page: PageInfo,
}

impl<'a> DashboardView<'a> {
    pub fn page_rows(&self) -> &[&'a Record] {
        &self.filtered[self.page.start..self.page.end]
    }
}

/// Everything the JSON summary file carries.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub year: i32,
    pub generated_at: DateTime<Local>,
    pub filter: Filter,
    pub kpis: KpiTotals,
    pub monthly: Vec<MonthlyPoint>,
    pub breakdowns: Breakdowns,
    pub seasons: SeasonReport,
}

/// The whole pipeline as one pure function of its inputs.
pub fn compute_view<'a>(
    records: &'a [Record],
    filter: &Filter,
    extra: &ExtraDimension,
    pager: &Pager,
) -> DashboardView<'a> {
    let predicate = filter::build_predicate(filter, extra.field);
    let filtered = filter::apply(records, &predicate);
    let kpis = reports::kpi_totals(&filtered);
    let monthly = reports::monthly_series(&filtered);
    let breakdowns = reports::breakdowns(&filtered);
    let seasons = reports::classify_seasons(&monthly);
    let page = pager.info(filtered.len());
    DashboardView {
        filtered,
        kpis,
        monthly,
        breakdowns,
        seasons,
        page,
    }
}

#[derive(Debug, Clone)]
pub struct Dashboard {
    extra: ExtraDimension,
    year: i32,
    filter: Filter,
    pager: Pager,
}

impl Dashboard {
    pub fn new(extra: ExtraDimension, year: i32, page_size: usize) -> Self {
        Self {
            extra,
            year,
            filter: Filter::default(),
            pager: Pager::new(page_size),
        }
    }

    pub fn extra(&self) -> &ExtraDimension {
        &self.extra
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn page(&self) -> usize {
        self.pager.page()
    }

    /// Change one dimension. The page always returns to 1, even when the
    /// current page would still exist under the new filter.
    pub fn set_filter(&mut self, dim: Dimension, value: &str) {
        log::debug!("filter {:?} = {:?}", dim, value);
        self.filter.set(dim, value);
        self.pager.reset();
    }

    pub fn reset_filters(&mut self) {
        log::debug!("filters reset");
        self.filter = Filter::default();
        self.pager.reset();
    }

    pub fn next_page(&mut self, records: &[Record]) {
        let len = self.filtered(records).len();
        self.pager.next(len);
    }

    pub fn prev_page(&mut self) {
        self.pager.prev();
    }

    /// Pull the page back into range after the record set is replaced.
    /// The filter is kept.
    pub fn clamp_page(&mut self, records: &[Record]) {
        let len = self.filtered(records).len();
        self.pager.clamp(len);
    }

    pub fn filtered<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        filter::apply(records, &filter::build_predicate(&self.filter, self.extra.field))
    }

    pub fn view<'a>(&self, records: &'a [Record]) -> DashboardView<'a> {
        compute_view(records, &self.filter, &self.extra, &self.pager)
    }

    pub fn summary(&self, records: &[Record]) -> DashboardSummary {
        let view = self.view(records);
        DashboardSummary {
            year: self.year,
            generated_at: Local::now(),
            filter: self.filter.clone(),
            kpis: view.kpis,
            monthly: view.monthly,
            breakdowns: view.breakdowns,
            seasons: view.seasons,
        }
    }

    pub fn export(&self, records: &[Record]) -> ExportTable {
        export::project(&self.filtered(records), ExportLayout::for_extra(&self.extra))
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(ExtraDimension::default(), 2026, crate::pager::DEFAULT_PAGE_SIZE)
    }
}
