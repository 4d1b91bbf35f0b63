use crate::dashboard::DashboardView;
use crate::error::DashboardError;
use crate::export::{self, ExportCell, ExportLayout, ExportTable};
use crate::util::truncate_display;
use rust_xlsxwriter::{Format, Workbook};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tabled::{builder::Builder, settings::Style, Table, Tabled};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
pub const SHEET_NAME: &str = "Data Pelatihan";
const PREVIEW_NAME_WIDTH: usize = 48;

/// Comma-separated export: BOM first, every field quoted, embedded quotes
/// doubled, `\n` between rows.
pub fn write_export_csv_to<W: Write>(mut out: W, table: &ExportTable) -> Result<(), DashboardError> {
    out.write_all(UTF8_BOM)?;
    let mut wtr = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(out);
    wtr.write_record(table.columns())?;
    for record in table.string_records() {
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_export_csv(path: impl AsRef<Path>, table: &ExportTable) -> Result<(), DashboardError> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    write_export_csv_to(file, table)?;
    log::info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

pub fn write_export_xlsx(path: impl AsRef<Path>, table: &ExportTable) -> Result<(), DashboardError> {
    let path = path.as_ref();
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, width) in table.layout.column_widths().into_iter().enumerate() {
        worksheet.set_column_width(col as u16, width)?;
    }

    let header = Format::new().set_bold();
    for (col, name) in table.columns().into_iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header)?;
    }

    for (idx, row) in table.rows.iter().enumerate() {
        let r = idx as u32 + 1;
        for (col, cell) in row.cells(table.layout).iter().enumerate() {
            match cell {
                ExportCell::Number(n) => {
                    worksheet.write_number(r, col as u16, *n as f64)?;
                }
                ExportCell::Text(s) => {
                    worksheet.write_string(r, col as u16, s)?;
                }
            }
        }
    }

    workbook.save(path)?;
    log::info!("wrote {} rows to {}", table.len(), path.display());
    Ok(())
}

pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<(), DashboardError> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    log::info!("wrote {}", path.display());
    Ok(())
}

pub fn render_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows.to_vec()).with(Style::markdown()).to_string()
}

pub fn preview_table<T>(title: &str, note: Option<&str>, rows: &[T])
where
    T: Tabled + Clone,
{
    println!("\n{}", title);
    if let Some(n) = note {
        println!("({})", n);
    }
    println!();
    println!("{}\n", render_table(rows));
}

/// Markdown table of the visible page. Row numbers continue across pages.
pub fn render_page(view: &DashboardView<'_>, layout: ExportLayout) -> String {
    let mut rows = export::project(view.page_rows(), layout);
    for row in &mut rows.rows {
        row.no += view.page.start;
        row.name = truncate_display(&row.name, PREVIEW_NAME_WIDTH);
    }
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(rows.columns());
    for record in rows.string_records() {
        builder.push_record(record);
    }
    builder.build().with(Style::markdown()).to_string()
}
