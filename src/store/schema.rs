use serde::{Deserialize, Serialize};

use crate::session::result::HistoryEntry;

const SCHEMA_VERSION: u32 = 1;

/// Session lengths offered by the menu, in seconds.
pub const DURATIONS: [u32; 3] = [15, 30, 60];

pub const DEFAULT_DURATION: u32 = 30;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryData {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    #[serde(default)]
    pub entries: Vec<HistoryEntry>,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            entries: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_last_duration")]
    pub last_duration: u32,
}

fn default_last_duration() -> u32 {
    DEFAULT_DURATION
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            last_duration: default_last_duration(),
        }
    }
}

impl Settings {
    /// Hand-edited files may hold a length the menu doesn't offer.
    pub fn normalize(&mut self) {
        if !DURATIONS.contains(&self.last_duration) {
            self.last_duration = default_last_duration();
        }
    }
}
