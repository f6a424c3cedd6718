use std::fmt;

use anyhow::{Context, Result, anyhow, bail};
use chrono::NaiveTime;
use chrono_tz::Tz;

/// A trading session with fixed local opening hours.
#[derive(Clone, PartialEq, Eq)]
pub struct Market {
    name: String,
    timezone: Tz,
    open: NaiveTime,
    close: NaiveTime,
}

impl Market {
    pub fn new(name: String, timezone: Tz, open: NaiveTime, close: NaiveTime) -> Result<Self> {
        let market = Self {
            name,
            timezone,
            open,
            close,
        };
        market.validate()?;

        Ok(market)
    }

    /// Builds a market from its textual configuration: an IANA timezone and
    /// `HH:MM` open/close times.
    pub fn parse(name: &str, timezone: &str, open: &str, close: &str) -> Result<Self> {
        let timezone = parse_timezone(timezone)?;
        let open = parse_local_time(open).with_context(|| format!("invalid open time for {name}"))?;
        let close =
            parse_local_time(close).with_context(|| format!("invalid close time for {name}"))?;

        Self::new(name.to_string(), timezone, open, close)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("market name must not be empty");
        }
        if self.open == self.close {
            bail!(
                "market {} opens and closes at the same time ({})",
                self.name,
                self.open.format("%H:%M")
            );
        }
        Ok(())
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl fmt::Debug for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Market({} {} {}-{})",
            self.name,
            self.timezone.name(),
            self.open.format("%H:%M"),
            self.close.format("%H:%M")
        )
    }
}

pub fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|error| anyhow!("invalid timezone \"{raw}\": {error}"))
}

pub fn parse_local_time(raw: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .with_context(|| format!("\"{raw}\" is not a HH:MM time"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_market() {
        let market = Market::parse("Tokyo", "Asia/Tokyo", "09:00", "18:00").unwrap();

        assert_eq!(market.name(), "Tokyo");
        assert_eq!(market.timezone(), chrono_tz::Asia::Tokyo);
        assert_eq!(market.open(), NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(market.close(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
    }

    #[test]
    fn rejects_unknown_timezone() {
        let error = Market::parse("Mars", "Mars/Olympus", "09:00", "18:00").unwrap_err();

        assert!(error.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(Market::parse("Tokyo", "Asia/Tokyo", "9am", "18:00").is_err());
        assert!(Market::parse("Tokyo", "Asia/Tokyo", "09:00", "25:00").is_err());
    }

    #[test]
    fn accepts_overnight_session() {
        let market = Market::parse("Overnight", "Asia/Tokyo", "22:00", "06:00").unwrap();

        assert!(market.close() < market.open());
    }

    #[test]
    fn rejects_zero_length_session() {
        assert!(Market::parse("Tokyo", "Asia/Tokyo", "09:00", "09:00").is_err());
    }

    #[test]
    fn rejects_blank_name() {
        assert!(Market::parse("  ", "Asia/Tokyo", "09:00", "18:00").is_err());
    }
}
