use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::alerts::alert_key::AlertKey;

/// Which alerts have fired, bucketed by reference-timezone date.
///
/// Serializes as `{"YYYY-MM-DD": {"<alert key>": true, ...}, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AlertState {
    days: BTreeMap<NaiveDate, BTreeMap<String, bool>>,
}

impl AlertState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every date other than `today` and makes sure `today` has an entry.
    pub fn retain_day(&mut self, today: NaiveDate) {
        self.days.retain(|date, _| *date == today);
        self.days.entry(today).or_default();
    }

    pub fn is_fired(&self, date: NaiveDate, key: &AlertKey) -> bool {
        self.days
            .get(&date)
            .and_then(|alerts| alerts.get(key.as_str()))
            .copied()
            .unwrap_or(false)
    }

    /// True when the event is between now and `window_minutes` away and the
    /// alert has not already fired on `date`.
    pub fn should_fire(
        &self,
        date: NaiveDate,
        key: &AlertKey,
        minutes_until_event: f64,
        window_minutes: u32,
    ) -> bool {
        let in_window = (0.0..=f64::from(window_minutes)).contains(&minutes_until_event);

        in_window && !self.is_fired(date, key)
    }

    pub fn mark_fired(&mut self, date: NaiveDate, key: &AlertKey) {
        self.days
            .entry(date)
            .or_default()
            .insert(key.as_str().to_string(), true);
    }
}
