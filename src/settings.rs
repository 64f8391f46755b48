use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, sync::RwLock, time::Duration};

use crate::{
    catalog::Genre,
    db::Plan,
    timer::{DEFAULT_TICK_INTERVAL, MAX_TICK_INTERVAL},
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct UserSettings {
    /// Plan a subscription uses when the caller names none.
    pub selected_plan: Plan,
    pub selected_genre: Genre,
    pub tick_interval_secs: u64,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            selected_plan: Plan::Bronze,
            selected_genre: Genre::Romance,
            tick_interval_secs: DEFAULT_TICK_INTERVAL.as_secs(),
        }
    }
}

/// JSON-backed preferences. `path == None` keeps them in memory only.
pub struct SettingsStore {
    path: Option<PathBuf>,
    data: RwLock<UserSettings>,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        let data = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring unreadable settings at {}: {err}", path.display());
                UserSettings::default()
            })
        } else {
            UserSettings::default()
        };

        Ok(Self {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            path: None,
            data: RwLock::new(UserSettings::default()),
        }
    }

    pub fn get(&self) -> UserSettings {
        self.data
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn selected_plan(&self) -> Plan {
        self.get().selected_plan
    }

    pub fn selected_genre(&self) -> Genre {
        self.get().selected_genre
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(
            self.get()
                .tick_interval_secs
                .clamp(1, MAX_TICK_INTERVAL.as_secs()),
        )
    }

    pub fn update_selected_plan(&self, plan: Plan) -> Result<()> {
        self.update(|settings| settings.selected_plan = plan)
    }

    pub fn update_selected_genre(&self, genre: Genre) -> Result<()> {
        self.update(|settings| settings.selected_genre = genre)
    }

    fn update(&self, apply: impl FnOnce(&mut UserSettings)) -> Result<()> {
        let mut guard = self
            .data
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut next = guard.clone();
        apply(&mut next);
        self.persist(&next)?;
        *guard = next;
        Ok(())
    }

    fn persist(&self, data: &UserSettings) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let serialized = serde_json::to_string_pretty(data)?;
        fs::write(path, serialized)
            .with_context(|| format!("Failed to write settings to {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json")).unwrap();

        assert_eq!(store.selected_plan(), Plan::Bronze);
        assert_eq!(store.selected_genre(), Genre::Romance);
        assert_eq!(store.tick_interval(), Duration::from_secs(60));
    }

    #[test]
    fn test_updates_persist_across_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let store = SettingsStore::new(path.clone()).unwrap();
        store.update_selected_plan(Plan::Gold).unwrap();
        store.update_selected_genre(Genre::Fantasy).unwrap();

        let reloaded = SettingsStore::new(path).unwrap();
        assert_eq!(reloaded.selected_plan(), Plan::Gold);
        assert_eq!(reloaded.selected_genre(), Genre::Fantasy);
    }

    #[test]
    fn test_partial_and_corrupt_files_fall_back() {
        let dir = tempfile::tempdir().unwrap();

        let partial = dir.path().join("partial.json");
        fs::write(&partial, r#"{ "selected_plan": "Silver", "tick_interval_secs": 0 }"#).unwrap();
        let store = SettingsStore::new(partial).unwrap();
        assert_eq!(store.selected_plan(), Plan::Silver);
        assert_eq!(store.selected_genre(), Genre::Romance);
        assert_eq!(store.tick_interval(), Duration::from_secs(1));

        let corrupt = dir.path().join("corrupt.json");
        fs::write(&corrupt, "not json").unwrap();
        let store = SettingsStore::new(corrupt).unwrap();
        assert_eq!(store.get(), UserSettings::default());
    }

    #[test]
    fn test_huge_tick_interval_is_capped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{ "tick_interval_secs": 18446744073709551615 }"#).unwrap();

        let store = SettingsStore::new(path).unwrap();
        assert_eq!(store.tick_interval(), MAX_TICK_INTERVAL);
    }

    #[test]
    fn test_failed_write_keeps_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be written as a file.
        assert!(SettingsStore::new(dir.path().to_path_buf()).is_err());
        let store = SettingsStore {
            path: Some(dir.path().to_path_buf()),
            data: RwLock::new(UserSettings::default()),
        };

        assert!(store.update_selected_plan(Plan::Gold).is_err());
        assert_eq!(store.selected_plan(), Plan::Bronze);
    }
}
