use super::aggregate::{LocalPlay, Tally, group_by};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyCell {
    pub month: u32,
    pub hour: u32,
    pub plays: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayHourCell {
    pub month: u32,
    pub weekday: u32, // 0 = Monday
    pub hour: u32,
    pub plays: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayHourCell {
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub plays: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub plays: u64,
    pub minutes: u64,
}

/// Play counts bucketed by local time fields
///
/// Cells are emitted in key order and only for combinations that occur in the data.
pub struct Heatmaps;

impl Heatmaps {
    /// Plays by (month, hour)
    pub fn hourly(plays: &[LocalPlay<'_>]) -> Vec<HourlyCell> {
        count_by(plays, |p| (p.month(), p.hour()))
            .into_iter()
            .map(|((month, hour), plays)| HourlyCell { month, hour, plays })
            .collect()
    }

    /// Plays by (month, weekday, hour)
    pub fn weekday_hour(plays: &[LocalPlay<'_>]) -> Vec<WeekdayHourCell> {
        count_by(plays, |p| (p.month(), p.weekday(), p.hour()))
            .into_iter()
            .map(|((month, weekday, hour), plays)| WeekdayHourCell {
                month,
                weekday,
                hour,
                plays,
            })
            .collect()
    }

    /// Plays by (month, day of month, hour)
    pub fn day_hour(plays: &[LocalPlay<'_>]) -> Vec<DayHourCell> {
        count_by(plays, |p| (p.month(), p.day(), p.hour()))
            .into_iter()
            .map(|((month, day, hour), plays)| DayHourCell {
                month,
                day,
                hour,
                plays,
            })
            .collect()
    }

    /// Plays and minutes per hour of day, ordered by hour
    pub fn hourly_distribution(plays: &[LocalPlay<'_>]) -> Vec<HourBucket> {
        group_by(
            plays,
            |p| Some(p.hour()),
            |tally: &mut Tally, p| tally.add(p.event),
        )
        .into_iter()
        .map(|(hour, tally)| HourBucket {
            hour,
            plays: tally.plays,
            minutes: tally.minutes(),
        })
        .collect()
    }
}

fn count_by<K, F>(plays: &[LocalPlay<'_>], key: F) -> std::collections::BTreeMap<K, u64>
where
    K: Ord,
    F: Fn(&LocalPlay<'_>) -> K,
{
    group_by(plays, |p| Some(key(*p)), |count: &mut u64, _| *count += 1)
}
