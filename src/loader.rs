use crate::error::DashboardError;
use crate::types::{RawRow, Record, Status};
use crate::util::{clean_text, parse_u32_safe, parse_u64_safe};
use csv::ReaderBuilder;
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub total_rows: usize,
    pub loaded_rows: usize,
    pub parse_errors: usize,
    pub missing_work_team: usize,
}

pub fn load_records(path: impl AsRef<Path>) -> Result<(Vec<Record>, LoadReport), DashboardError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path)?;
    let (records, report) = load_from_reader(file)?;
    log::info!(
        "Loaded {} of {} rows from {} ({} skipped)",
        report.loaded_rows,
        report.total_rows,
        path.display(),
        report.parse_errors
    );
    Ok((records, report))
}

pub fn load_from_reader<R: Read>(reader: R) -> Result<(Vec<Record>, LoadReport), DashboardError> {
    let mut rdr = ReaderBuilder::new().flexible(true).trim(csv::Trim::Headers).from_reader(reader);
    let mut report = LoadReport::default();
    let mut records: Vec<Record> = Vec::new();

    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        report.total_rows += 1;
        let row = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("row {}: {}", idx + 1, e);
                report.parse_errors += 1;
                continue;
            }
        };
        match clean_row(row) {
            Some(record) => {
                if record.work_team_key().is_none() {
                    report.missing_work_team += 1;
                }
                records.push(record);
            }
            None => {
                log::debug!("row {}: failed validation, skipped", idx + 1);
                report.parse_errors += 1;
            }
        }
    }

    report.loaded_rows = records.len();
    Ok((records, report))
}

/// Validate one raw row. `None` means the row is unusable.
fn clean_row(row: RawRow) -> Option<Record> {
    let month = match parse_u32_safe(row.month.as_deref()) {
        Some(m) if (1..=12).contains(&m) => m,
        _ => return None,
    };
    let participant_count = parse_u64_safe(row.participant_count.as_deref())?;
    let training_hours_total = parse_u64_safe(row.training_hours_total.as_deref())?;
    let status = Status::parse(row.status.as_deref()?)?;

    let name = clean_text(row.name).unwrap_or_else(|| "Tanpa Nama".to_string());
    let method = clean_text(row.method)?;
    let provider = clean_text(row.provider)?;
    // Category keeps its raw spacing; consumers trim through `category_key`.
    let category = row.category.unwrap_or_default();
    let work_team = clean_text(row.work_team);

    Some(Record {
        name,
        month,
        method,
        provider,
        category,
        work_team,
        participant_count,
        training_hours_total,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
nama,bulan,metode,penyelenggara,rumpun,tim_kerja,total_peserta,total_jamlator,baru_eksisting
Pelatihan Penganggaran,1,Klasikal,Pusdiklat AP,Anggaran ,Tim A,30,120,Baru
Pelatihan Bendahara,2,PJJ,BDK Medan, Perbendaharaan,,25,90,Eksisting
Rusak,13,PJJ,BDK Medan,Anggaran,,25,90,Eksisting
Negatif,3,PJJ,BDK Medan,Anggaran,,-1,90,Baru
Status Aneh,3,PJJ,BDK Medan,Anggaran,,10,90,Lama
";

    #[test]
    fn loads_valid_rows_and_counts_rejects() {
        let (records, report) = load_from_reader(CSV.as_bytes()).unwrap();
        assert_eq!(report.total_rows, 5);
        assert_eq!(report.loaded_rows, 2);
        assert_eq!(report.parse_errors, 3);
        assert_eq!(report.missing_work_team, 1);

        assert_eq!(records[0].category, "Anggaran ");
        assert_eq!(records[0].category_key(), "Anggaran");
        assert_eq!(records[0].work_team.as_deref(), Some("Tim A"));
        assert_eq!(records[1].work_team, None);
        assert_eq!(records[1].status, Status::Existing);
    }

    #[test]
    fn missing_work_team_column_is_not_an_error() {
        let csv = "\
nama,bulan,metode,penyelenggara,rumpun,total_peserta,total_jamlator,baru_eksisting
A,5,E-Learning,BDK Malang,Akuntansi,12,8,new
";
        let (records, report) = load_from_reader(csv.as_bytes()).unwrap();
        assert_eq!(report.parse_errors, 0);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].work_team, None);
        assert_eq!(records[0].status, Status::New);
    }

    #[test]
    fn loads_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();
        let (records, _) = load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_records("/nonexistent/kalender.csv").unwrap_err();
        assert!(matches!(err, DashboardError::Io(_)));
    }
}
