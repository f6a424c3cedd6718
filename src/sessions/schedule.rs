use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use chrono_tz::Tz;
use serde::Deserialize;

use crate::sessions::session_clock::SessionClock;
use crate::types::market::{Market, parse_timezone};
use crate::types::overlap_pair::OverlapPair;

const BUILTIN_SCHEDULE: &str = include_str!("../../sessions.yml");

/// The static set of sessions to watch and how early to warn about them.
#[derive(Debug, Clone)]
pub struct Schedule {
    reference_timezone: Tz,
    reference_label: String,
    opening_alert_window_minutes: u32,
    overlap_alert_window_minutes: u32,
    markets: Vec<Market>,
    overlaps: Vec<OverlapPair>,
}

#[derive(Debug, Deserialize)]
struct ScheduleConfig {
    reference_timezone: String,
    #[serde(default)]
    reference_label: Option<String>,
    opening_alert_window_minutes: u32,
    overlap_alert_window_minutes: u32,
    markets: Vec<MarketConfig>,
    #[serde(default)]
    overlaps: Vec<(String, String)>,
}

#[derive(Debug, Deserialize)]
struct MarketConfig {
    name: String,
    timezone: String,
    open: String,
    close: String,
}

impl Schedule {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Self::builtin(),
        }
    }

    pub fn builtin() -> Result<Self> {
        Self::from_yaml(BUILTIN_SCHEDULE).context("built-in session schedule is invalid")
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read session schedule {}", path.display()))?;

        Self::from_yaml(&raw)
            .with_context(|| format!("invalid session schedule {}", path.display()))
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        let config: ScheduleConfig =
            serde_yaml::from_str(raw).context("failed to parse session schedule")?;

        Self::from_config(config)
    }

    fn from_config(config: ScheduleConfig) -> Result<Self> {
        let reference_timezone = parse_timezone(&config.reference_timezone)
            .context("invalid reference_timezone")?;

        let markets = config
            .markets
            .iter()
            .map(|market| {
                Market::parse(&market.name, &market.timezone, &market.open, &market.close)
                    .with_context(|| format!("invalid market \"{}\"", market.name))
            })
            .collect::<Result<Vec<_>>>()?;

        if markets.is_empty() {
            bail!("schedule must list at least one market");
        }

        let mut seen = HashSet::new();
        for market in &markets {
            if !seen.insert(market.name()) {
                bail!("market \"{}\" is listed more than once", market.name());
            }
        }

        let find = |name: &str| {
            markets
                .iter()
                .find(|market| market.name() == name)
                .cloned()
                .ok_or_else(|| anyhow!("overlap refers to unknown market \"{name}\""))
        };

        let overlaps = config
            .overlaps
            .iter()
            .map(|(first, second)| {
                if first == second {
                    bail!("overlap pairs market \"{first}\" with itself");
                }
                Ok(OverlapPair::new(find(first.as_str())?, find(second.as_str())?))
            })
            .collect::<Result<Vec<_>>>()?;

        let reference_label = config
            .reference_label
            .unwrap_or_else(|| reference_timezone.name().to_string());

        Ok(Self {
            reference_timezone,
            reference_label,
            opening_alert_window_minutes: config.opening_alert_window_minutes,
            overlap_alert_window_minutes: config.overlap_alert_window_minutes,
            markets,
            overlaps,
        })
    }

    pub fn clock(&self) -> SessionClock {
        SessionClock::new(self.reference_timezone)
    }

    pub fn reference_timezone(&self) -> Tz {
        self.reference_timezone
    }

    /// Suffix printed after reference-timezone times in messages, e.g. `IST`.
    pub fn reference_label(&self) -> &str {
        &self.reference_label
    }

    pub fn opening_alert_window_minutes(&self) -> u32 {
        self.opening_alert_window_minutes
    }

    pub fn overlap_alert_window_minutes(&self) -> u32 {
        self.overlap_alert_window_minutes
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn overlaps(&self) -> &[OverlapPair] {
        &self.overlaps
    }
}
