use crate::error::DashboardError;
use crate::pager::DEFAULT_PAGE_SIZE;
use crate::types::ExtraDimension;
use std::env;
use std::path::{Component, Path, PathBuf};

pub const DEFAULT_YEAR: i32 = 2026;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub output_dir: PathBuf,
    pub page_size: usize,
    pub extra: ExtraDimension,
    pub year: i32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DashboardError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DashboardError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let year = match lookup("DASHBOARD_YEAR") {
            Some(v) => v
                .trim()
                .parse::<i32>()
                .map_err(|_| DashboardError::Config(format!("DASHBOARD_YEAR '{}' is not a year", v)))?,
            None => DEFAULT_YEAR,
        };

        let data_path = lookup("DASHBOARD_DATA_PATH")
            .unwrap_or_else(|| format!("kalender_pembelajaran_{}.csv", year))
            .into();
        let output_dir = lookup("DASHBOARD_OUTPUT_DIR")
            .unwrap_or_else(|| ".".to_string())
            .into();

        let page_size = match lookup("DASHBOARD_PAGE_SIZE") {
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(DashboardError::Config(format!(
                        "DASHBOARD_PAGE_SIZE must be a positive integer, got '{}'",
                        v
                    )))
                }
            },
            None => DEFAULT_PAGE_SIZE,
        };

        let extra = match lookup("DASHBOARD_EXTRA_DIMENSION")
            .map(|v| v.trim().to_lowercase())
            .as_deref()
        {
            None | Some("rumpun") => ExtraDimension::category_family(),
            Some("tim_kerja") => ExtraDimension::work_team(),
            Some(other) => {
                return Err(DashboardError::Config(format!(
                    "DASHBOARD_EXTRA_DIMENSION must be 'rumpun' or 'tim_kerja', got '{}'",
                    other
                )))
            }
        };

        Ok(Self {
            data_path,
            output_dir,
            page_size,
            extra,
            year,
        })
    }

    pub fn csv_export_path(&self) -> PathBuf {
        self.output_dir.join(format!("export_kalender_pembelajaran_{}.csv", self.year))
    }

    pub fn xlsx_export_path(&self) -> PathBuf {
        self.output_dir.join(format!("Export_Kalender_Pembelajaran_{}.xlsx", self.year))
    }

    pub fn summary_path(&self) -> PathBuf {
        self.output_dir.join("summary.json")
    }

    /// Fails when any export target resolves to the input dataset.
    /// Call after the output directory exists so both sides resolve alike.
    pub fn check_export_targets(&self) -> Result<(), DashboardError> {
        let input = resolve(&self.data_path);
        for target in [self.csv_export_path(), self.xlsx_export_path(), self.summary_path()] {
            if resolve(&target) == input {
                return Err(DashboardError::ExportOverwritesInput(target));
            }
        }
        Ok(())
    }
}

/// Canonical parent joined with the file name; the file itself need not exist.
fn resolve(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.components().filter(|c| !matches!(c, Component::CurDir)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg.page_size, 12);
        assert_eq!(cfg.year, 2026);
        assert_eq!(cfg.extra, ExtraDimension::category_family());
        assert_eq!(cfg.data_path, PathBuf::from("kalender_pembelajaran_2026.csv"));
        assert_eq!(cfg.csv_export_path(), PathBuf::from("./export_kalender_pembelajaran_2026.csv"));
        assert_ne!(resolve(&cfg.data_path), resolve(&cfg.csv_export_path()));
        assert_ne!(resolve(&cfg.data_path), resolve(&cfg.xlsx_export_path()));
        assert!(cfg.check_export_targets().is_ok());
    }

    #[test]
    fn export_into_input_dataset_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let data = format!("{}/./export_kalender_pembelajaran_2026.csv", dir_str);
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DASHBOARD_DATA_PATH", data.as_str()),
            ("DASHBOARD_OUTPUT_DIR", dir_str),
        ]))
        .unwrap();
        assert!(matches!(
            cfg.check_export_targets(),
            Err(DashboardError::ExportOverwritesInput(p)) if p == cfg.csv_export_path()
        ));
    }

    #[test]
    fn default_export_leaves_dataset_loadable() {
        use crate::{export, loader, output};

        let dir = tempfile::tempdir().unwrap();
        let dir_str = dir.path().to_str().unwrap();
        let data = dir.path().join("kalender_pembelajaran_2026.csv");
        std::fs::write(
            &data,
            "nama,bulan,metode,penyelenggara,rumpun,total_peserta,total_jamlator,baru_eksisting\n\
             Pelatihan A,3,PJJ,BDK Medan,Anggaran,20,40,Baru\n",
        )
        .unwrap();
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DASHBOARD_DATA_PATH", data.to_str().unwrap()),
            ("DASHBOARD_OUTPUT_DIR", dir_str),
        ]))
        .unwrap();
        cfg.check_export_targets().unwrap();

        let (records, _) = loader::load_records(&cfg.data_path).unwrap();
        assert_eq!(records.len(), 1);
        let refs: Vec<&crate::types::Record> = records.iter().collect();
        let table = export::project(&refs, export::ExportLayout::Standard);
        output::write_export_csv(cfg.csv_export_path(), &table).unwrap();

        let (reloaded, report) = loader::load_records(&cfg.data_path).unwrap();
        assert_eq!(reloaded.len(), 1);
        assert_eq!(report.parse_errors, 0);
    }

    #[test]
    fn work_team_revision_is_selectable() {
        let cfg = AppConfig::from_lookup(lookup(&[
            ("DASHBOARD_EXTRA_DIMENSION", "Tim_Kerja"),
            ("DASHBOARD_PAGE_SIZE", "20"),
            ("DASHBOARD_OUTPUT_DIR", "out"),
        ]))
        .unwrap();
        assert_eq!(cfg.extra, ExtraDimension::work_team());
        assert_eq!(cfg.page_size, 20);
        assert_eq!(cfg.summary_path(), PathBuf::from("out/summary.json"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        for pairs in [
            [("DASHBOARD_PAGE_SIZE", "0")],
            [("DASHBOARD_PAGE_SIZE", "x")],
            [("DASHBOARD_EXTRA_DIMENSION", "rumpun_lain")],
            [("DASHBOARD_YEAR", "dua ribu")],
        ] {
            let err = AppConfig::from_lookup(lookup(&pairs)).unwrap_err();
            assert!(matches!(err, DashboardError::Config(_)));
        }
    }
}
