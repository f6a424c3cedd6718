use chrono::offset::LocalResult;
use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeDelta,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::types::market::Market;

/// Time arithmetic for session opens and overlaps.
///
/// Each market's open and close are placed on "today" as seen from that
/// market's own timezone. Only alert bucketing (`today`) and weekend detection
/// use the reference timezone, so near midnight a market can be evaluated
/// against a different calendar day than the one alerts are recorded under.
#[derive(Debug, Clone, Copy)]
pub struct SessionClock {
    reference: Tz,
}

/// The intersection of two sessions' trading hours, in the reference timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl OverlapWindow {
    pub fn minutes_until_start(&self, now: DateTime<Utc>) -> f64 {
        minutes_between(now, self.start)
    }
}

impl SessionClock {
    pub fn new(reference: Tz) -> Self {
        Self { reference }
    }

    pub fn reference(&self) -> Tz {
        self.reference
    }

    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.reference).date_naive()
    }

    pub fn is_weekend(&self, now: DateTime<Utc>) -> bool {
        matches!(
            now.with_timezone(&self.reference).weekday(),
            Weekday::Sat | Weekday::Sun
        )
    }

    /// Today's open for `market`, in the market's timezone.
    pub fn open_at(&self, market: &Market, now: DateTime<Utc>) -> DateTime<Tz> {
        local_instant(market, market.open(), now)
    }

    /// Today's close for `market`, in the market's timezone.
    pub fn close_at(&self, market: &Market, now: DateTime<Utc>) -> DateTime<Tz> {
        local_instant(market, market.close(), now)
    }

    /// Minutes from `now` until today's open. Negative once the open has passed.
    pub fn minutes_to_open(&self, market: &Market, now: DateTime<Utc>) -> f64 {
        minutes_between(now, self.open_at(market, now))
    }

    pub fn overlap_window(
        &self,
        first: &Market,
        second: &Market,
        now: DateTime<Utc>,
    ) -> Option<OverlapWindow> {
        let to_reference = |instant: DateTime<Tz>| instant.with_timezone(&self.reference);

        let start = to_reference(self.open_at(first, now))
            .max(to_reference(self.open_at(second, now)));
        let end = to_reference(self.close_at(first, now))
            .min(to_reference(self.close_at(second, now)));

        (start < end).then_some(OverlapWindow { start, end })
    }
}

fn local_instant(market: &Market, time: NaiveTime, now: DateTime<Utc>) -> DateTime<Tz> {
    let timezone = market.timezone();
    let local_today = now.with_timezone(&timezone).date_naive();

    localize(timezone, local_today, time)
}

/// Resolves a wall-clock time to an instant using the zone's standard-time
/// reading: ambiguous times take the later instant, and times inside a DST gap
/// keep the offset in force before the gap (02:30 in a 02:00-03:00 gap lands on
/// 03:30).
fn localize(timezone: Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Tz> {
    let local = date.and_time(time);

    match timezone.from_local_datetime(&local) {
        LocalResult::Single(instant) | LocalResult::Ambiguous(_, instant) => instant,
        LocalResult::None => {
            let offset = offset_before_gap(timezone, local);
            let utc = local - TimeDelta::seconds(i64::from(offset.local_minus_utc()));

            timezone.from_utc_datetime(&utc)
        }
    }
}

fn offset_before_gap(timezone: Tz, local: NaiveDateTime) -> FixedOffset {
    let mut earlier = local;

    loop {
        earlier -= TimeDelta::minutes(1);
        if let Some(instant) = timezone.from_local_datetime(&earlier).latest() {
            return instant.offset().fix();
        }
    }
}

fn minutes_between(from: DateTime<Utc>, to: DateTime<Tz>) -> f64 {
    let delta = to.with_timezone(&Utc) - from;

    delta.num_milliseconds() as f64 / 60_000.0
}
