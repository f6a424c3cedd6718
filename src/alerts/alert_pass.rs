use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, error, info};

use crate::alerts::{
    alert_key::AlertKey, alert_state::AlertState, messages, state_store::StateStore,
};
use crate::notify::Notifier;
use crate::sessions::{schedule::Schedule, session_clock::SessionClock};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    WeekendSkipped,
    Completed { date: NaiveDate, fired: Vec<AlertKey> },
}

/// One evaluation of every session open and overlap against the clock.
///
/// Alerts are marked fired whether or not delivery succeeds, so each alert is
/// attempted at most once per reference-timezone day.
pub struct AlertPass<'a> {
    schedule: &'a Schedule,
    store: &'a StateStore,
    notifier: &'a (dyn Notifier + Send + Sync),
}

impl<'a> AlertPass<'a> {
    pub fn new(
        schedule: &'a Schedule,
        store: &'a StateStore,
        notifier: &'a (dyn Notifier + Send + Sync),
    ) -> Self {
        Self {
            schedule,
            store,
            notifier,
        }
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<PassOutcome> {
        let clock = self.schedule.clock();

        if clock.is_weekend(now) {
            info!("weekend, skipping alerts");
            return Ok(PassOutcome::WeekendSkipped);
        }

        let today = clock.today(now);
        let mut state = self.store.load()?;
        state.retain_day(today);

        let mut fired = Vec::new();
        self.check_openings(&clock, &mut state, today, now, &mut fired)
            .await;
        self.check_overlaps(&clock, &mut state, today, now, &mut fired)
            .await;

        self.store.save(&state)?;

        info!(date = %today, fired = fired.len(), "alert pass complete");

        Ok(PassOutcome::Completed { date: today, fired })
    }

    async fn check_openings(
        &self,
        clock: &SessionClock,
        state: &mut AlertState,
        today: NaiveDate,
        now: DateTime<Utc>,
        fired: &mut Vec<AlertKey>,
    ) {
        let window = self.schedule.opening_alert_window_minutes();

        for market in self.schedule.markets() {
            let minutes_to_open = clock.minutes_to_open(market, now);
            let key = AlertKey::opening(market);

            debug!(market = %market, minutes_to_open, "checked opening");

            if !state.should_fire(today, &key, minutes_to_open, window) {
                continue;
            }

            let open_at = clock
                .open_at(market, now)
                .with_timezone(&clock.reference());
            let text = messages::opening(
                market,
                open_at,
                minutes_to_open,
                self.schedule.reference_label(),
            );

            self.deliver(&key, &text).await;
            state.mark_fired(today, &key);
            fired.push(key);
        }
    }

    async fn check_overlaps(
        &self,
        clock: &SessionClock,
        state: &mut AlertState,
        today: NaiveDate,
        now: DateTime<Utc>,
        fired: &mut Vec<AlertKey>,
    ) {
        let window = self.schedule.overlap_alert_window_minutes();

        for pair in self.schedule.overlaps() {
            let Some(overlap) = clock.overlap_window(pair.first(), pair.second(), now) else {
                debug!(pair = %pair, "no overlap today");
                continue;
            };

            let minutes_to_overlap = overlap.minutes_until_start(now);
            let key = AlertKey::overlap(pair);

            debug!(
                pair = %pair,
                start = %overlap.start,
                end = %overlap.end,
                minutes_to_overlap,
                "checked overlap"
            );

            if !state.should_fire(today, &key, minutes_to_overlap, window) {
                continue;
            }

            let text = messages::overlap(pair, overlap.start, self.schedule.reference_label());

            self.deliver(&key, &text).await;
            state.mark_fired(today, &key);
            fired.push(key);
        }
    }

    async fn deliver(&self, key: &AlertKey, text: &str) {
        match self.notifier.send(text).await {
            Ok(()) => info!(alert = %key, "alert sent"),
            Err(error) => error!(alert = %key, "alert delivery failed: {error:?}"),
        }
    }
}
