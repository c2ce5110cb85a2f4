use crate::models::PlayEvent;
use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

const MS_PER_MINUTE: f64 = 60_000.0;
pub(crate) const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;

/// A play event paired with its timestamp converted to the report time zone
#[derive(Debug, Clone)]
pub struct LocalPlay<'a> {
    pub event: &'a PlayEvent,
    pub local: DateTime<Tz>,
}

impl LocalPlay<'_> {
    pub fn month(&self) -> u32 {
        self.local.month()
    }

    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    pub fn day(&self) -> u32 {
        self.local.day()
    }

    /// 0 = Monday .. 6 = Sunday
    pub fn weekday(&self) -> u32 {
        self.local.weekday().num_days_from_monday()
    }

    pub fn is_weekend(&self) -> bool {
        self.weekday() >= 5
    }
}

/// Parse an ISO-8601 UTC timestamp and convert it to civil time in `tz`
pub fn to_local_time(ts: &str, tz: Tz) -> Option<DateTime<Tz>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|dt| dt.with_timezone(&Utc).with_timezone(&tz))
}

/// Convert every event with a readable timestamp; the rest are left out of time-based metrics
pub fn localize(events: &[PlayEvent], tz: Tz) -> Vec<LocalPlay<'_>> {
    let mut skipped = 0usize;
    let plays: Vec<LocalPlay<'_>> = events
        .iter()
        .filter_map(|event| {
            let local = event.ts.as_deref().and_then(|ts| to_local_time(ts, tz));
            if local.is_none() {
                skipped += 1;
            }
            local.map(|local| LocalPlay { event, local })
        })
        .collect();

    if skipped > 0 {
        debug!("{skipped} events without a usable timestamp left out of time-based metrics");
    }
    plays
}

/// Listening time and play count accumulated for one group
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub ms: u64,
    pub plays: u64,
}

impl Tally {
    pub fn add(&mut self, event: &PlayEvent) {
        self.ms += event.ms_played;
        self.plays += 1;
    }

    pub fn minutes(&self) -> u64 {
        to_minutes(self.ms)
    }

    pub fn hours(&self) -> f64 {
        to_hours(self.ms)
    }
}

/// Group items by a key and fold each group into an accumulator
///
/// Items for which `key` returns `None` are skipped. Groups come back in key order.
pub fn group_by<I, K, A, KF, RF>(items: I, mut key: KF, mut reduce: RF) -> BTreeMap<K, A>
where
    I: IntoIterator,
    K: Ord,
    A: Default,
    KF: FnMut(&I::Item) -> Option<K>,
    RF: FnMut(&mut A, &I::Item),
{
    let mut groups: BTreeMap<K, A> = BTreeMap::new();
    for item in items {
        if let Some(k) = key(&item) {
            reduce(groups.entry(k).or_default(), &item);
        }
    }
    groups
}

/// Sort groups descending by `metric` and keep the first `limit`
///
/// Ties keep key order, so rankings are stable across runs.
pub fn rank_by<K, A, M, F>(groups: BTreeMap<K, A>, metric: F, limit: usize) -> Vec<(K, A)>
where
    M: Ord,
    F: Fn(&A) -> M,
{
    let mut ranked: Vec<(K, A)> = groups.into_iter().collect();
    ranked.sort_by(|a, b| metric(&b.1).cmp(&metric(&a.1)));
    ranked.truncate(limit);
    ranked
}

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

pub fn to_minutes(ms: u64) -> u64 {
    (ms as f64 / MS_PER_MINUTE).round() as u64
}

pub fn to_hours(ms: u64) -> f64 {
    round_to(ms as f64 / MS_PER_HOUR, 1)
}

pub fn to_days(ms: u64) -> f64 {
    round_to(ms as f64 / MS_PER_DAY, 1)
}

/// Integer percentage of `part` over `whole`; a zero `whole` counts as 1
pub fn percent_of(part: u64, whole: u64) -> u64 {
    (part as f64 / whole.max(1) as f64 * 100.0).round() as u64
}

/// Percentage of the ranking leader; when the leader has no listening time every entry ties at 100
pub fn share_of_leader(ms: u64, leader_ms: u64) -> u64 {
    if leader_ms == 0 {
        100
    } else {
        percent_of(ms, leader_ms)
    }
}
