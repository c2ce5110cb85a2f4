use super::aggregate::{LocalPlay, group_by, rank_by};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeakHoursSummary {
    pub peak_hour: u32,
    pub top_hours: Vec<u32>, // ascending
    pub description: String,
}

/// Busiest listening hours of the day
pub struct PeakHours;

impl PeakHours {
    pub fn find(plays: &[LocalPlay<'_>], count: usize) -> PeakHoursSummary {
        let per_hour = group_by(plays, |p| Some(p.hour()), |n: &mut u64, _| *n += 1);
        let busiest: Vec<u32> = rank_by(per_hour, |n| *n, count)
            .into_iter()
            .map(|(hour, _)| hour)
            .collect();

        let peak_hour = busiest.first().copied().unwrap_or(0);
        let mut top_hours = busiest;
        top_hours.sort_unstable();

        let description = match (top_hours.first(), top_hours.last()) {
            (Some(first), Some(last)) => format!("Más activo entre las {first}:00 y {last}:00"),
            _ => "Sin actividad registrada".to_string(),
        };

        PeakHoursSummary {
            peak_hour,
            top_hours,
            description,
        }
    }
}
