use chrono::DateTime;
use chrono_tz::Tz;

use crate::types::{market::Market, overlap_pair::OverlapPair};

pub const TEST_ALERT: &str = "🚨 TEST ALERT: Telegram group integration working";

const TIME_FORMAT: &str = "%I:%M %p";

/// `open_at` must already be in the reference timezone.
pub fn opening(
    market: &Market,
    open_at: DateTime<Tz>,
    minutes_to_open: f64,
    label: &str,
) -> String {
    format!(
        "🔔 {market} market OPENING soon\n⏰ {} {label} (in {} min)",
        open_at.format(TIME_FORMAT),
        minutes_to_open.trunc() as i64
    )
}

pub fn overlap(pair: &OverlapPair, start: DateTime<Tz>, label: &str) -> String {
    format!(
        "🔥 {pair} session overlap starting soon\n⏰ {} {label}",
        start.format(TIME_FORMAT)
    )
}
