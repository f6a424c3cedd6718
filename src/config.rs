use std::path::PathBuf;

use crate::scenario::delivery::Delivery;

/// Everything a run needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    pub delivery: Delivery,
    pub state_file: PathBuf,
    /// `None` uses the schedule compiled into the binary.
    pub schedule_path: Option<PathBuf>,
    pub send_test_alert: bool,
}
