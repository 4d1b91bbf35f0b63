use crate::types::{
    Breakdowns, GroupField, GroupTotal, KpiTotals, MonthSeason, MonthlyPoint, Record, Season,
    SeasonReport, Status,
};
use std::collections::HashMap;

pub const MONTH_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

const PEAK_FACTOR: f64 = 1.2;
const LOW_FACTOR: f64 = 0.8;

pub fn kpi_totals(data: &[&Record]) -> KpiTotals {
    KpiTotals {
        participants: data.iter().map(|r| r.participant_count).sum(),
        hours: data.iter().map(|r| r.training_hours_total).sum(),
        programs: data.len(),
    }
}

/// Always twelve entries, January first. Months without records are zero.
pub fn monthly_series(data: &[&Record]) -> Vec<MonthlyPoint> {
    (1..=12u32)
        .map(|m| {
            let rows: Vec<&Record> = data.iter().copied().filter(|r| r.month == m).collect();
            MonthlyPoint {
                month: m,
                label: MONTH_SHORT[(m - 1) as usize],
                participants: rows.iter().map(|r| r.participant_count).sum(),
                hours: rows.iter().map(|r| r.training_hours_total).sum(),
                frequency: rows.len(),
                new_programs: rows.iter().filter(|r| r.status == Status::New).count(),
                existing_programs: rows.iter().filter(|r| r.status == Status::Existing).count(),
            }
        })
        .collect()
}

/// Participant sum per key, keys in first-seen order.
///
/// Records for which `field` yields no key (an absent work team) are
/// skipped entirely rather than collected under a placeholder group.
pub fn group_totals(data: &[&Record], field: GroupField) -> Vec<GroupTotal> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<GroupTotal> = Vec::new();
    for r in data {
        let Some(key) = field.key(r) else {
            continue;
        };
        let slot = *index.entry(key).or_insert_with(|| {
            out.push(GroupTotal {
                name: key.to_string(),
                value: 0,
            });
            out.len() - 1
        });
        out[slot].value += r.participant_count;
    }
    out
}

/// `group_totals` sorted by descending participant sum. Ties keep
/// first-seen order.
pub fn ranked_totals(data: &[&Record], field: GroupField) -> Vec<GroupTotal> {
    let mut rows = group_totals(data, field);
    rows.sort_by(|a, b| b.value.cmp(&a.value));
    rows
}

pub fn breakdowns(data: &[&Record]) -> Breakdowns {
    Breakdowns {
        by_method: group_totals(data, GroupField::Method),
        by_category: group_totals(data, GroupField::Category),
        by_provider: ranked_totals(data, GroupField::Provider),
        by_work_team: ranked_totals(data, GroupField::WorkTeam),
    }
}

/// Heuristic peak/low labelling of the monthly frequency series.
///
/// The mean is taken over active months only. A month is `Peak` at or
/// above `round(mean * 1.2)` and `Low` when active and at or below
/// `round(mean * 0.8)`. A month sitting exactly on the mean is always
/// `Normal`; with small means the rounded thresholds can collapse onto it.
/// This describes the calendar; it forecasts nothing.
pub fn classify_seasons(monthly: &[MonthlyPoint]) -> SeasonReport {
    let active: Vec<f64> = monthly
        .iter()
        .filter(|p| p.frequency > 0)
        .map(|p| p.frequency as f64)
        .collect();
    let mean = if active.is_empty() {
        0.0
    } else {
        active.iter().sum::<f64>() / active.len() as f64
    };
    let high = (mean * PEAK_FACTOR).round() as u64;
    let low = (mean * LOW_FACTOR).round() as u64;

    let months = monthly
        .iter()
        .map(|p| {
            let f = p.frequency as u64;
            let fv = f as f64;
            let season = if f == 0 {
                Season::Normal
            } else if f >= high && fv > mean {
                Season::Peak
            } else if f <= low && fv < mean {
                Season::Low
            } else {
                Season::Normal
            };
            MonthSeason {
                month: p.month,
                label: p.label,
                frequency: p.frequency,
                season,
            }
        })
        .collect();

    SeasonReport {
        mean,
        high,
        low,
        months,
    }
}
