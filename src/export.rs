//! Flat rows for the file writers.
//!
//! The projection covers the whole filtered sequence, never just the
//! visible page, and numbers rows 1..=n over that sequence.

use crate::types::{ExtraDimension, GroupField, Record, Status};
use serde::Serialize;
use std::borrow::Cow;

pub const MONTH_FULL: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Full month name, or the raw number when `month` is outside 1..=12.
pub fn month_label(month: u32) -> Cow<'static, str> {
    match month {
        1..=12 => Cow::Borrowed(MONTH_FULL[(month - 1) as usize]),
        other => Cow::Owned(other.to_string()),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLayout {
    Standard,
    WithWorkTeam,
}

impl ExportLayout {
    pub fn for_extra(extra: &ExtraDimension) -> Self {
        match extra.field {
            GroupField::WorkTeam => ExportLayout::WithWorkTeam,
            _ => ExportLayout::Standard,
        }
    }

    pub fn columns(self) -> Vec<&'static str> {
        let mut cols = vec!["No", "Nama Program", "Bulan", "Metode", "Penyelenggara", "Rumpun"];
        if self == ExportLayout::WithWorkTeam {
            cols.push("Tim Kerja");
        }
        cols.extend(["Total Peserta", "Total Jamlat", "Status"]);
        cols
    }

    /// Spreadsheet column widths in characters, aligned with `columns`.
    pub fn column_widths(self) -> Vec<f64> {
        let mut widths = vec![5.0, 60.0, 12.0, 12.0, 20.0, 22.0];
        if self == ExportLayout::WithWorkTeam {
            widths.push(22.0);
        }
        widths.extend([14.0, 14.0, 12.0]);
        widths
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub no: usize,
    pub name: String,
    pub month: String,
    pub method: String,
    pub provider: String,
    pub category: String,
    pub work_team: String,
    pub participants: u64,
    pub hours: u64,
    pub status: Status,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExportCell {
    Number(u64),
    Text(String),
}

impl ExportCell {
    pub fn as_text(&self) -> String {
        match self {
            ExportCell::Number(n) => n.to_string(),
            ExportCell::Text(s) => s.clone(),
        }
    }
}

impl ExportRow {
    pub fn cells(&self, layout: ExportLayout) -> Vec<ExportCell> {
        let mut cells = vec![
            ExportCell::Number(self.no as u64),
            ExportCell::Text(self.name.clone()),
            ExportCell::Text(self.month.clone()),
            ExportCell::Text(self.method.clone()),
            ExportCell::Text(self.provider.clone()),
            ExportCell::Text(self.category.clone()),
        ];
        if layout == ExportLayout::WithWorkTeam {
            cells.push(ExportCell::Text(self.work_team.clone()));
        }
        cells.extend([
            ExportCell::Number(self.participants),
            ExportCell::Number(self.hours),
            ExportCell::Text(self.status.label().to_string()),
        ]);
        cells
    }

    pub fn string_record(&self, layout: ExportLayout) -> Vec<String> {
        self.cells(layout).iter().map(ExportCell::as_text).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportTable {
    pub layout: ExportLayout,
    pub rows: Vec<ExportRow>,
}

impl ExportTable {
    pub fn columns(&self) -> Vec<&'static str> {
        self.layout.columns()
    }

    pub fn string_records(&self) -> impl Iterator<Item = Vec<String>> + '_ {
        self.rows.iter().map(move |r| r.string_record(self.layout))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn project(filtered: &[&Record], layout: ExportLayout) -> ExportTable {
    let rows = filtered
        .iter()
        .enumerate()
        .map(|(i, r)| ExportRow {
            no: i + 1,
            name: r.name.clone(),
            month: month_label(r.month).into_owned(),
            method: r.method.clone(),
            provider: r.provider.clone(),
            category: r.category_key().to_string(),
            work_team: r.work_team_key().unwrap_or_default().to_string(),
            participants: r.participant_count,
            hours: r.training_hours_total,
            status: r.status,
        })
        .collect();
    ExportTable { layout, rows }
}
