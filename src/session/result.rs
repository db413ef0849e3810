use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Final score of a finished session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionResult {
    pub wpm: u32,
    pub accuracy: f64,
    pub duration_secs: u32,
}

/// One line of the persisted history log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub wpm: u32,
    pub accuracy: f64,
    pub duration: u32,
    pub date: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn from_result(result: &SessionResult, date: DateTime<Utc>) -> Self {
        Self {
            wpm: result.wpm,
            accuracy: result.accuracy,
            duration: result.duration_secs,
            date,
        }
    }
}

/// Highest WPM recorded for `duration`, if any session of that length exists.
pub fn personal_best(entries: &[HistoryEntry], duration: u32) -> Option<u32> {
    entries
        .iter()
        .filter(|e| e.duration == duration)
        .map(|e| e.wpm)
        .max()
}
