use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Serialize, de::DeserializeOwned};

use crate::session::result::{self, HistoryEntry};
use crate::store::schema::{HistoryData, Settings};

const HISTORY_FILE: &str = "history.json";
const SETTINGS_FILE: &str = "settings.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn new() -> Result<Self> {
        Self::with_base_dir(Self::default_dir())
    }

    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    pub fn default_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("wpmx")
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Missing, unreadable and corrupt files all yield the default.
    fn load<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.file_path(name);
        if !path.exists() {
            return T::default();
        }
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "unreadable store file, using defaults");
                return T::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "corrupt store file, using defaults");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, name: &str, data: &T) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let json = serde_json::to_string_pretty(data)?;
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(json.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    pub fn load_history(&self) -> HistoryData {
        self.load(HISTORY_FILE)
    }

    pub fn save_history(&self, data: &HistoryData) -> Result<()> {
        self.save(HISTORY_FILE, data)
    }

    pub fn append_result(&self, entry: HistoryEntry) -> Result<()> {
        let mut history = self.load_history();
        history.entries.push(entry);
        self.save_history(&history)
    }

    pub fn personal_best(&self, duration: u32) -> Option<u32> {
        result::personal_best(&self.load_history().entries, duration)
    }

    pub fn load_settings(&self) -> Settings {
        let mut settings: Settings = self.load(SETTINGS_FILE);
        settings.normalize();
        settings
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        self.save(SETTINGS_FILE, settings)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use tempfile::TempDir;

    use super::*;

    fn make_test_store() -> (TempDir, JsonStore) {
        let dir = TempDir::new().unwrap();
        let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
        (dir, store)
    }

    fn entry(wpm: u32, duration: u32) -> HistoryEntry {
        HistoryEntry {
            wpm,
            accuracy: 90.0,
            duration,
            date: Utc::now(),
        }
    }

    #[test]
    fn empty_store_yields_defaults() {
        let (_dir, store) = make_test_store();
        assert!(store.load_history().entries.is_empty());
        assert_eq!(store.load_settings(), Settings::default());
        assert_eq!(store.personal_best(30), None);
    }

    #[test]
    fn append_result_accumulates() {
        let (_dir, store) = make_test_store();
        store.append_result(entry(40, 15)).unwrap();
        store.append_result(entry(65, 15)).unwrap();
        store.append_result(entry(80, 60)).unwrap();

        let history = store.load_history();
        assert_eq!(history.entries.len(), 3);
        assert_eq!(history.entries[1].wpm, 65);
        assert_eq!(store.personal_best(15), Some(65));
        assert_eq!(store.personal_best(60), Some(80));
        assert_eq!(store.personal_best(30), None);
    }

    #[test]
    fn corrupt_history_falls_back_to_empty() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(HISTORY_FILE), "{ not json").unwrap();
        assert!(store.load_history().entries.is_empty());

        // Still writable afterwards.
        store.append_result(entry(50, 30)).unwrap();
        assert_eq!(store.load_history().entries.len(), 1);
    }

    #[test]
    fn corrupt_settings_fall_back_to_default() {
        let (_dir, store) = make_test_store();
        fs::write(store.file_path(SETTINGS_FILE), "[1, 2, 3]").unwrap();
        assert_eq!(store.load_settings().last_duration, 30);
    }

    #[test]
    fn settings_round_trip_and_normalize() {
        let (_dir, store) = make_test_store();
        store.save_settings(&Settings { last_duration: 60 }).unwrap();
        assert_eq!(store.load_settings().last_duration, 60);

        fs::write(store.file_path(SETTINGS_FILE), r#"{"last_duration": 7}"#).unwrap();
        assert_eq!(store.load_settings().last_duration, 30);
    }

    #[test]
    fn save_leaves_no_tmp_files() {
        let (dir, store) = make_test_store();
        store.save_settings(&Settings::default()).unwrap();
        store.append_result(entry(1, 15)).unwrap();

        let tmp_files: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().and_then(|x| x.to_str()) == Some("tmp"))
            .collect();
        assert!(tmp_files.is_empty(), "no residual .tmp files");
    }
}
