use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::alerts::alert_state::AlertState;

/// JSON file holding the whole [`AlertState`].
///
/// Runs are expected not to overlap; there is no locking. A second concurrent
/// run can read stale state and re-send or lose an alert.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns an empty state when the file does not exist. A file that exists
    /// but cannot be read or parsed is an error.
    pub fn load(&self) -> Result<AlertState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %self.path.display(), "no alert state yet, starting empty");
                return Ok(AlertState::new());
            }
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("failed to read alert state {}", self.path.display()));
            }
        };

        serde_json::from_str(&raw)
            .with_context(|| format!("alert state {} is corrupt", self.path.display()))
    }

    /// Writes to a sibling temp file and renames it over the target, so readers
    /// see either the old document or the new one.
    pub fn save(&self, state: &AlertState) -> Result<()> {
        let json = serde_json::to_string(state).context("failed to serialize alert state")?;
        let staging = self.staging_path();

        fs::write(&staging, json)
            .with_context(|| format!("failed to write alert state {}", staging.display()))?;
        fs::rename(&staging, &self.path)
            .with_context(|| format!("failed to replace alert state {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "alert state saved");

        Ok(())
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_else(|| "state.json".into());
        name.push(".tmp");

        self.path.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alerts::alert_key::AlertKey;
    use crate::types::market::Market;
    use chrono::NaiveDate;

    fn sample_state() -> AlertState {
        let tokyo = Market::parse("Tokyo", "Asia/Tokyo", "09:00", "18:00").unwrap();
        let london = Market::parse("London", "Europe/London", "08:00", "17:00").unwrap();

        let mut state = AlertState::new();
        state.mark_fired(NaiveDate::from_ymd_opt(2026, 10, 13).unwrap(), &AlertKey::opening(&tokyo));
        state.mark_fired(NaiveDate::from_ymd_opt(2026, 10, 14).unwrap(), &AlertKey::opening(&london));
        state
    }

    #[test]
    fn save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("state.json"));
        let state = sample_state();

        store.save(&state).unwrap();

        assert_eq!(store.load().unwrap(), state);
        assert!(!dir.path().join("state.json.tmp").exists());
    }

    #[test]
    fn load_then_save_preserves_existing_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(
            &path,
            r#"{ "2026-10-13": { "Tokyo_open": true, "overlap_Tokyo_London": false } }"#,
        )
        .unwrap();
        let store = StateStore::new(&path);

        let loaded = store.load().unwrap();
        store.save(&loaded).unwrap();

        let reread: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(
            reread,
            serde_json::json!({"2026-10-13": {"Tokyo_open": true, "overlap_Tokyo_London": false}})
        );
    }

    #[test]
    fn missing_file_loads_empty_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("absent.json"));

        assert_eq!(store.load().unwrap(), AlertState::new());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "{not json").unwrap();

        let error = StateStore::new(&path).load().unwrap_err();

        assert!(error.to_string().contains("corrupt"));
    }

    #[test]
    fn empty_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "").unwrap();

        assert!(StateStore::new(&path).load().is_err());
    }

    #[test]
    fn unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        // A directory exists but cannot be read as a file.
        assert!(StateStore::new(dir.path()).load().is_err());
    }

    #[test]
    fn save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().join("missing").join("state.json"));

        assert!(store.save(&sample_state()).is_err());
    }
}
