//! Filter state and the predicate built from it.
//!
//! Four independent single-valued dimensions are ANDed together. An unset
//! dimension imposes no constraint. Matching is exact; category compares
//! against the trimmed value and an absent work team never matches.

use crate::export::month_label;
use crate::types::{ExtraDimension, GroupField, OptionSource, Record};
use serde::Serialize;
use std::collections::BTreeSet;

pub const METHODS: [&str; 3] = ["Klasikal", "PJJ", "E-Learning"];

pub const PROVIDERS: [&str; 12] = [
    "Pusdiklat AP",
    "BDK Cimahi",
    "BDK Yogyakarta",
    "BDK Pontianak",
    "BDK Makassar",
    "BDK Medan",
    "BDK Pekanbaru",
    "BDK Palembang",
    "BDK Malang",
    "BDK Denpasar",
    "BDK Manado",
    "BDK Balikpapan",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Month,
    Provider,
    Method,
    Extra,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Month,
        Dimension::Provider,
        Dimension::Method,
        Dimension::Extra,
    ];
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Filter {
    pub month: Option<String>,
    pub provider: Option<String>,
    pub method: Option<String>,
    pub extra: Option<String>,
}

impl Filter {
    /// Set one dimension. An empty value clears it.
    pub fn set(&mut self, dim: Dimension, value: &str) {
        let value = if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        };
        *self.slot_mut(dim) = value;
    }

    pub fn get(&self, dim: Dimension) -> Option<&str> {
        match dim {
            Dimension::Month => self.month.as_deref(),
            Dimension::Provider => self.provider.as_deref(),
            Dimension::Method => self.method.as_deref(),
            Dimension::Extra => self.extra.as_deref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Dimension::ALL.iter().all(|d| self.get(*d).is_none())
    }

    fn slot_mut(&mut self, dim: Dimension) -> &mut Option<String> {
        match dim {
            Dimension::Month => &mut self.month,
            Dimension::Provider => &mut self.provider,
            Dimension::Method => &mut self.method,
            Dimension::Extra => &mut self.extra,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ConstraintField {
    Month,
    Group(GroupField),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    field: ConstraintField,
    value: String,
}

impl Constraint {
    fn matches(&self, r: &Record) -> bool {
        match &self.field {
            ConstraintField::Month => r.month.to_string() == self.value,
            ConstraintField::Group(field) => field.key(r) == Some(self.value.as_str()),
        }
    }
}

/// Conjunction of the active constraints.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    constraints: Vec<Constraint>,
}

impl Predicate {
    pub fn matches(&self, r: &Record) -> bool {
        self.constraints.iter().all(|c| c.matches(r))
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

pub fn build_predicate(filter: &Filter, extra: GroupField) -> Predicate {
    let mut constraints = Vec::new();
    for dim in Dimension::ALL {
        let Some(value) = filter.get(dim) else {
            continue;
        };
        let field = match dim {
            Dimension::Month => ConstraintField::Month,
            Dimension::Provider => ConstraintField::Group(GroupField::Provider),
            Dimension::Method => ConstraintField::Group(GroupField::Method),
            Dimension::Extra => ConstraintField::Group(extra),
        };
        constraints.push(Constraint {
            field,
            value: value.to_string(),
        });
    }
    Predicate { constraints }
}

/// Records passing `predicate`, in source order.
pub fn apply<'a>(records: &'a [Record], predicate: &Predicate) -> Vec<&'a Record> {
    records.iter().filter(|r| predicate.matches(r)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

impl FilterOption {
    fn same(v: &str) -> Self {
        Self {
            value: v.to_string(),
            label: v.to_string(),
        }
    }
}

/// Selectable values for one dimension, "no constraint" first.
pub fn filter_options(dim: Dimension, extra: &ExtraDimension, records: &[Record]) -> Vec<FilterOption> {
    let all_label = match dim {
        Dimension::Month => "Semua Bulan".to_string(),
        Dimension::Provider => "Semua Penyelenggara".to_string(),
        Dimension::Method => "Semua Metode".to_string(),
        Dimension::Extra => format!("Semua {}", extra.field.label()),
    };
    let mut options = vec![FilterOption {
        value: String::new(),
        label: all_label,
    }];

    match dim {
        Dimension::Month => options.extend((1..=12u32).map(|m| FilterOption {
            value: m.to_string(),
            label: month_label(m).into_owned(),
        })),
        Dimension::Provider => options.extend(PROVIDERS.iter().map(|p| FilterOption::same(p))),
        Dimension::Method => options.extend(METHODS.iter().map(|m| FilterOption::same(m))),
        Dimension::Extra => match &extra.options {
            OptionSource::Fixed(values) => options.extend(values.iter().map(|v| FilterOption::same(v))),
            OptionSource::Derived => {
                let distinct: BTreeSet<&str> = records.iter().filter_map(|r| extra.field.key(r)).collect();
                options.extend(distinct.into_iter().map(FilterOption::same));
            }
        },
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Status;

    fn rec(month: u32, provider: &str, method: &str, category: &str, team: Option<&str>) -> Record {
        Record {
            name: format!("{provider} {month}"),
            month,
            method: method.to_string(),
            provider: provider.to_string(),
            category: category.to_string(),
            work_team: team.map(str::to_string),
            participant_count: 10,
            training_hours_total: 5,
            status: Status::New,
        }
    }

    fn sample() -> Vec<Record> {
        vec![
            rec(1, "BDK Medan", "Klasikal", " Anggaran ", Some("Tim A")),
            rec(3, "BDK Medan", "PJJ", "Akuntansi", None),
            rec(3, "Pusdiklat AP", "PJJ", "Anggaran", Some("  ")),
            rec(12, "BDK Malang", "E-Learning", "Perbendaharaan", Some("Tim B")),
        ]
    }

    #[test]
    fn empty_filter_matches_everything() {
        let records = sample();
        let p = build_predicate(&Filter::default(), GroupField::Category);
        assert!(p.is_empty());
        assert_eq!(apply(&records, &p).len(), records.len());
    }

    #[test]
    fn dimensions_are_anded() {
        let records = sample();
        let mut f = Filter::default();
        f.set(Dimension::Month, "3");
        f.set(Dimension::Method, "PJJ");
        f.set(Dimension::Provider, "BDK Medan");
        let got = apply(&records, &build_predicate(&f, GroupField::Category));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].category, "Akuntansi");
    }

    #[test]
    fn month_compares_textual_form_exactly() {
        let records = sample();
        let mut f = Filter::default();
        f.set(Dimension::Month, "03");
        assert!(apply(&records, &build_predicate(&f, GroupField::Category)).is_empty());
        f.set(Dimension::Month, "12");
        assert_eq!(apply(&records, &build_predicate(&f, GroupField::Category)).len(), 1);
    }

    #[test]
    fn category_matches_trimmed_value_only() {
        let records = sample();
        let mut f = Filter::default();
        f.set(Dimension::Extra, "Anggaran");
        assert_eq!(apply(&records, &build_predicate(&f, GroupField::Category)).len(), 2);
        f.set(Dimension::Extra, "Angg");
        assert!(apply(&records, &build_predicate(&f, GroupField::Category)).is_empty());
    }

    #[test]
    fn blank_and_absent_work_team_never_match() {
        let records = sample();
        let mut f = Filter::default();
        f.set(Dimension::Extra, "Tim A");
        let got = apply(&records, &build_predicate(&f, GroupField::WorkTeam));
        assert_eq!(got.len(), 1);
        assert_eq!(got[0].month, 1);
    }

    #[test]
    fn setting_empty_value_clears_dimension() {
        let mut f = Filter::default();
        f.set(Dimension::Provider, "BDK Medan");
        assert!(!f.is_empty());
        f.set(Dimension::Provider, "");
        assert!(f.is_empty());
    }

    #[test]
    fn option_catalogs_lead_with_no_constraint() {
        let records = sample();
        let months = filter_options(Dimension::Month, &ExtraDimension::default(), &records);
        assert_eq!(months.len(), 13);
        assert_eq!(months[0].value, "");
        assert_eq!(months[0].label, "Semua Bulan");
        assert_eq!(months[3].label, "Maret");

        let providers = filter_options(Dimension::Provider, &ExtraDimension::default(), &records);
        assert_eq!(providers.len(), PROVIDERS.len() + 1);

        let fixed = filter_options(Dimension::Extra, &ExtraDimension::category_family(), &records);
        assert_eq!(fixed[0].label, "Semua Rumpun");
        assert_eq!(fixed.len(), 5);
    }

    #[test]
    fn derived_work_team_options_skip_blank_values() {
        let records = sample();
        let teams = filter_options(Dimension::Extra, &ExtraDimension::work_team(), &records);
        let values: Vec<&str> = teams.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["", "Tim A", "Tim B"]);
        assert_eq!(teams[0].label, "Semua Tim Kerja");
    }
}
