//! Difficulty tiers and the physics/layout parameters they select
//!
//! One profile is active per session. It is threaded explicitly into
//! integration, collision response and level construction.

use serde::{Deserialize, Serialize};

/// Difficulty tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    /// Parameter bundle for this tier
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                difficulty: *self,
                gravity: 0.45,
                drag: 0.96,
                elasticity: 0.8,
                shot_budget: 7,
                power_divisor: 4.0,
                target_distance_factor: 0.7,
            },
            Difficulty::Normal => DifficultyProfile {
                difficulty: *self,
                gravity: 0.5,
                drag: 0.97,
                elasticity: 0.75,
                shot_budget: 5,
                power_divisor: 4.5,
                target_distance_factor: 1.0,
            },
            Difficulty::Hard => DifficultyProfile {
                difficulty: *self,
                gravity: 0.6,
                drag: 0.98,
                elasticity: 0.7,
                shot_budget: 3,
                power_divisor: 5.0,
                target_distance_factor: 1.3,
            },
        }
    }
}

/// Physics and layout parameters selected by a [`Difficulty`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    /// Tier this bundle came from
    pub difficulty: Difficulty,
    /// Per-frame downward velocity increment
    pub gravity: f32,
    /// Per-frame multiplicative velocity damping, in (0, 1]
    pub drag: f32,
    /// Fraction of velocity kept (sign-reversed) after a bounce, in [0, 1]
    pub elasticity: f32,
    /// Projectiles allotted per level attempt
    pub shot_budget: u32,
    /// Pull distance is divided by this to get launch speed
    pub power_divisor: f32,
    /// Multiplier applied to target x placement
    pub target_distance_factor: f32,
}

impl Default for DifficultyProfile {
    fn default() -> Self {
        Difficulty::default().profile()
    }
}
