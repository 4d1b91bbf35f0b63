use serde::{Deserialize, Serialize};
use std::fmt;
use tabled::Tabled;

/// One row of the input CSV exactly as it appears on disk.
///
/// Every column is optional text so the loader can count and skip bad
/// rows instead of aborting the whole file.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "nama", default)]
    pub name: Option<String>,
    #[serde(rename = "bulan", default)]
    pub month: Option<String>,
    #[serde(rename = "metode", default)]
    pub method: Option<String>,
    #[serde(rename = "penyelenggara", default)]
    pub provider: Option<String>,
    #[serde(rename = "rumpun", default)]
    pub category: Option<String>,
    #[serde(rename = "tim_kerja", default)]
    pub work_team: Option<String>,
    #[serde(rename = "total_peserta", default)]
    pub participant_count: Option<String>,
    #[serde(rename = "total_jamlator", default)]
    pub training_hours_total: Option<String>,
    #[serde(rename = "baru_eksisting", default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    New,
    Existing,
}

impl Status {
    pub fn label(self) -> &'static str {
        match self {
            Status::New => "Baru",
            Status::Existing => "Eksisting",
        }
    }

    /// Accepts the dataset's Indonesian labels as well as the English ones.
    pub fn parse(s: &str) -> Option<Status> {
        match s.trim().to_lowercase().as_str() {
            "baru" | "new" => Some(Status::New),
            "eksisting" | "existing" => Some(Status::Existing),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Status {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A training program. Never mutated after load.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub month: u32,
    pub method: String,
    pub provider: String,
    /// Raw value; may carry stray whitespace. Use `category_key` for grouping.
    pub category: String,
    pub work_team: Option<String>,
    pub participant_count: u64,
    pub training_hours_total: u64,
    pub status: Status,
}

impl Record {
    pub fn category_key(&self) -> &str {
        self.category.trim()
    }

    /// `None` for both an absent and a blank work team.
    pub fn work_team_key(&self) -> Option<&str> {
        self.work_team
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Field selector used for grouping and for the non-month filter dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupField {
    Method,
    Category,
    Provider,
    WorkTeam,
}

impl GroupField {
    pub fn key<'a>(&self, r: &'a Record) -> Option<&'a str> {
        match self {
            GroupField::Method => Some(r.method.as_str()),
            GroupField::Category => Some(r.category_key()),
            GroupField::Provider => Some(r.provider.as_str()),
            GroupField::WorkTeam => r.work_team_key(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GroupField::Method => "Metode",
            GroupField::Category => "Rumpun",
            GroupField::Provider => "Penyelenggara",
            GroupField::WorkTeam => "Tim Kerja",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionSource {
    Fixed(Vec<String>),
    Derived,
}

/// The fourth filter/grouping axis. Dataset revisions differ only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraDimension {
    pub field: GroupField,
    pub options: OptionSource,
}

impl ExtraDimension {
    pub fn category_family() -> Self {
        Self {
            field: GroupField::Category,
            options: OptionSource::Fixed(
                ["Anggaran", "Perbendaharaan", "Perimbangan Keuangan", "Akuntansi"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            ),
        }
    }

    pub fn work_team() -> Self {
        Self {
            field: GroupField::WorkTeam,
            options: OptionSource::Derived,
        }
    }
}

impl Default for ExtraDimension {
    fn default() -> Self {
        Self::category_family()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KpiTotals {
    #[serde(rename = "TotalPeserta")]
    pub participants: u64,
    #[serde(rename = "TotalJamlat")]
    pub hours: u64,
    #[serde(rename = "TotalPelatihan")]
    pub programs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct MonthlyPoint {
    #[serde(rename = "Month")]
    #[tabled(skip)]
    pub month: u32,
    #[serde(rename = "Bulan")]
    #[tabled(rename = "Bulan")]
    pub label: &'static str,
    #[serde(rename = "Peserta")]
    #[tabled(rename = "Peserta")]
    pub participants: u64,
    #[serde(rename = "Jamlat")]
    #[tabled(rename = "Jamlat")]
    pub hours: u64,
    #[serde(rename = "Frekuensi")]
    #[tabled(rename = "Frekuensi")]
    pub frequency: usize,
    #[serde(rename = "Baru")]
    #[tabled(rename = "Baru")]
    pub new_programs: usize,
    #[serde(rename = "Eksisting")]
    #[tabled(rename = "Eksisting")]
    pub existing_programs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct GroupTotal {
    #[serde(rename = "Name")]
    #[tabled(rename = "Name")]
    pub name: String,
    #[serde(rename = "Peserta")]
    #[tabled(rename = "Peserta")]
    pub value: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Breakdowns {
    pub by_method: Vec<GroupTotal>,
    pub by_category: Vec<GroupTotal>,
    pub by_provider: Vec<GroupTotal>,
    pub by_work_team: Vec<GroupTotal>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Season {
    Peak,
    Normal,
    Low,
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Season::Peak => "Peak",
            Season::Normal => "Normal",
            Season::Low => "Low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Tabled)]
pub struct MonthSeason {
    #[serde(rename = "Month")]
    #[tabled(skip)]
    pub month: u32,
    #[serde(rename = "Bulan")]
    #[tabled(rename = "Bulan")]
    pub label: &'static str,
    #[serde(rename = "Frekuensi")]
    #[tabled(rename = "Frekuensi")]
    pub frequency: usize,
    #[serde(rename = "Season")]
    #[tabled(rename = "Season")]
    pub season: Season,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonReport {
    pub mean: f64,
    pub high: u64,
    pub low: u64,
    pub months: Vec<MonthSeason>,
}
