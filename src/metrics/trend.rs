use super::aggregate::{LocalPlay, Tally, group_by, round_to};
use serde::Serialize;

const MONTH_NAMES: [&str; 12] = [
    "Ene", "Feb", "Mar", "Abr", "May", "Jun", "Jul", "Ago", "Sep", "Oct", "Nov", "Dic",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTrend {
    pub month: u32,
    pub month_name: String,
    pub plays: u64,
    pub hours: f64,
    pub delta: f64,     // hours vs the previous entry
    pub delta_pct: i64, // 0 when the previous entry has no hours
    pub is_peak: bool,
    pub is_inflection: bool,
}

/// Month-over-month listening trend
pub struct MonthlyTrend;

impl MonthlyTrend {
    /// Plays are pooled by calendar month (1-12) in the report zone
    pub fn compute(plays: &[LocalPlay<'_>]) -> Vec<MonthTrend> {
        let months = group_by(
            plays,
            |p| Some(p.month()),
            |tally: &mut Tally, p| tally.add(p.event),
        );

        let mut result: Vec<MonthTrend> = months
            .into_iter()
            .map(|(month, tally)| MonthTrend {
                month,
                month_name: MONTH_NAMES[(month - 1) as usize].to_string(),
                plays: tally.plays,
                hours: tally.hours(),
                delta: 0.0,
                delta_pct: 0,
                is_peak: false,
                is_inflection: false,
            })
            .collect();

        for i in 1..result.len() {
            let prev_hours = result[i - 1].hours;
            let current = &mut result[i];
            current.delta = round_to(current.hours - prev_hours, 1);
            current.delta_pct = if prev_hours > 0.0 {
                ((current.hours - prev_hours) / prev_hours * 100.0).round() as i64
            } else {
                0
            };
        }

        if let Some(peak) = first_max_index(&result, |m| m.hours) {
            result[peak].is_peak = true;
        }
        if let Some(inflection) = first_max_index(&result, |m| m.delta) {
            result[inflection].is_inflection = true;
        }

        result
    }
}

/// Index of the largest value; the earliest entry wins ties
fn first_max_index<T, F>(items: &[T], value: F) -> Option<usize>
where
    F: Fn(&T) -> f64,
{
    let mut best: Option<(usize, f64)> = None;
    for (i, item) in items.iter().enumerate() {
        let v = value(item);
        if best.is_none_or(|(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}
