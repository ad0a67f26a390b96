//! Classic-mode progress: best star rating per opponent
//!
//! Wire format matches the browser build's local-storage value:
//! `{"<mode>": {"<opponent>": <stars>}}`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Most stars a single win can earn
pub const MAX_STARS: u8 = 3;

/// Best star ratings, keyed by game mode then opponent name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress {
    modes: BTreeMap<String, BTreeMap<String, u8>>,
}

impl Progress {
    /// Local-storage key used by the browser build
    pub const STORAGE_KEY: &'static str = "airHockeyProgress";

    pub fn new() -> Self {
        Self::default()
    }

    /// Best rating so far (0 if never beaten)
    pub fn stars(&self, mode: &str, opponent: &str) -> u8 {
        self.modes
            .get(mode)
            .and_then(|opponents| opponents.get(opponent))
            .copied()
            .unwrap_or(0)
    }

    /// Record a rating, keeping the best. Returns true if it improved the record.
    pub fn record(&mut self, mode: &str, opponent: &str, stars: u8) -> bool {
        let stars = stars.min(MAX_STARS);
        if stars == 0 {
            return false;
        }
        let best = self
            .modes
            .entry(mode.to_string())
            .or_default()
            .entry(opponent.to_string())
            .or_insert(0);
        if stars > *best {
            *best = stars;
            true
        } else {
            false
        }
    }

    /// Sum of best ratings in one mode
    pub fn total_stars(&self, mode: &str) -> u32 {
        self.modes
            .get(mode)
            .map(|opponents| opponents.values().map(|&s| u32::from(s)).sum())
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.modes.values().all(BTreeMap::is_empty)
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Load progress from a JSON file. A missing file is an empty record.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No progress found, starting fresh");
                return Ok(Self::new());
            }
            Err(source) => return Err(StoreError::io(path, source)),
        };
        let progress = Self::from_json(&json)?;
        log::info!("Loaded progress for {} modes", progress.modes.len());
        Ok(progress)
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| StoreError::io(path, source))?;
        log::info!("Progress saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_best() {
        let mut progress = Progress::new();
        assert!(progress.is_empty());
        assert!(progress.record("arcade", "Tiny Tornado", 1));
        assert!(progress.record("arcade", "Tiny Tornado", 2));
        assert!(!progress.record("arcade", "Tiny Tornado", 1));
        assert_eq!(progress.stars("arcade", "Tiny Tornado"), 2);
        assert_eq!(progress.stars("arcade", "Mars"), 0);
    }

    #[test]
    fn test_zero_and_excess_stars() {
        let mut progress = Progress::new();
        assert!(!progress.record("space", "Lunar", 0));
        assert!(progress.is_empty());
        progress.record("space", "Lunar", 9);
        assert_eq!(progress.stars("space", "Lunar"), MAX_STARS);
    }

    #[test]
    fn test_wire_format() {
        let mut progress = Progress::new();
        progress.record("barGame", "Defense Dio", 3);
        progress.record("barGame", "Lightning Larry", 1);
        assert_eq!(
            progress.to_json().unwrap(),
            r#"{"barGame":{"Defense Dio":3,"Lightning Larry":1}}"#
        );
        assert_eq!(progress.total_stars("barGame"), 4);
    }

    #[test]
    fn test_parse_stored_value() {
        let progress = Progress::from_json(r#"{"tournament":{"Danny Hynes":2}}"#).unwrap();
        assert_eq!(progress.stars("tournament", "Danny Hynes"), 2);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = std::env::temp_dir().join("air-hockey-progress-does-not-exist.json");
        let progress = Progress::load(&path).unwrap();
        assert!(progress.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("air-hockey-progress-{}.json", std::process::id()));
        let mut progress = Progress::new();
        progress.record("arcade", "Zippy the Striker", 2);
        progress.save(&path).unwrap();
        let loaded = Progress::load(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(loaded, progress);
    }
}
