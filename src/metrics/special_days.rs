use super::aggregate::{LocalPlay, Tally, group_by};
use super::config::AnnualDate;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpecialDay {
    pub date: String,
    pub plays: u64,
    pub minutes: u64,
}

/// Listening on a birthday and on national holidays
pub struct SpecialDays;

impl SpecialDays {
    /// Entries only exist for dates that occur in the data; every year's occurrence is pooled
    pub fn lookup(
        plays: &[LocalPlay<'_>],
        birthday: &AnnualDate,
        holidays: &[AnnualDate],
        holiday_key_prefix: &str,
    ) -> BTreeMap<String, SpecialDay> {
        let daily = group_by(
            plays,
            |p| Some((p.month(), p.day())),
            |tally: &mut Tally, p| tally.add(p.event),
        );

        let entry = |date: &AnnualDate| {
            daily.get(&(date.month, date.day)).map(|tally| SpecialDay {
                date: date.label.clone(),
                plays: tally.plays,
                minutes: tally.minutes(),
            })
        };

        let mut special = BTreeMap::new();
        if let Some(day) = entry(birthday) {
            special.insert("birthday".to_string(), day);
        }
        for holiday in holidays {
            if let Some(day) = entry(holiday) {
                special.insert(
                    format!("{}_{}_{}", holiday_key_prefix, holiday.month, holiday.day),
                    day,
                );
            }
        }

        special
    }
}
