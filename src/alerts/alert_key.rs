use std::fmt;

use crate::types::{market::Market, overlap_pair::OverlapPair};

/// Identifies one alert within a day, e.g. `Tokyo_open` or
/// `overlap_London_New York`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlertKey(String);

impl AlertKey {
    pub fn opening(market: &Market) -> Self {
        Self(format!("{}_open", market.name()))
    }

    pub fn overlap(pair: &OverlapPair) -> Self {
        Self(format!(
            "overlap_{}_{}",
            pair.first().name(),
            pair.second().name()
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AlertKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_match_persisted_format() {
        let london = Market::parse("London", "Europe/London", "08:00", "17:00").unwrap();
        let new_york = Market::parse("New York", "America/New_York", "08:00", "17:00").unwrap();

        assert_eq!(AlertKey::opening(&london).as_str(), "London_open");
        assert_eq!(
            AlertKey::overlap(&OverlapPair::new(london, new_york)).as_str(),
            "overlap_London_New York"
        );
    }
}
