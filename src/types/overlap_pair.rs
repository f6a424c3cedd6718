use std::fmt;

use crate::types::market::Market;

/// Two sessions whose trading hours may intersect. Order is significant for
/// alert keys and messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlapPair {
    first: Market,
    second: Market,
}

impl OverlapPair {
    pub fn new(first: Market, second: Market) -> Self {
        Self { first, second }
    }

    pub fn first(&self) -> &Market {
        &self.first
    }

    pub fn second(&self) -> &Market {
        &self.second
    }
}

impl fmt::Display for OverlapPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}–{}", self.first, self.second)
    }
}
