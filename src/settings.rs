//! Host preferences
//!
//! Read once at startup from an optional JSON file. Nothing is written back.

use serde::{Deserialize, Serialize};

use crate::sim::{Difficulty, GameSession};

/// Environment variable naming the settings file
pub const SETTINGS_ENV: &str = "SLINGSHOT_SETTINGS";

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tier highlighted when the difficulty menu opens
    pub difficulty: Difficulty,
    /// Let the session play itself (the headless host has no pointer device)
    pub autoplay: bool,
    /// Projectile trails in the render snapshot
    pub trails: bool,
    /// Aim preview dots while dragging
    pub trajectory_preview: bool,
    /// Seed for generated levels past the authored table
    pub seed: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,
            autoplay: true,
            trails: true,
            trajectory_preview: true,
            seed: 0x5EED,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Load settings from the file named by `SLINGSHOT_SETTINGS`, falling
    /// back to defaults when unset or unreadable
    pub fn load() -> Self {
        let Ok(path) = std::env::var(SETTINGS_ENV) else {
            log::info!("Using default settings");
            return Self::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path);
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}; using defaults", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Cannot read {}: {}; using defaults", path, e);
                Self::default()
            }
        }
    }

    /// Fresh session configured from these settings, on the difficulty menu
    pub fn new_session(&self) -> GameSession {
        let mut session = GameSession::new(self.seed);
        session.pending_difficulty = self.difficulty;
        session.record_trails = self.trails;
        session.trajectory_preview = self.trajectory_preview;
        session
    }
}
