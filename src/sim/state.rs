//! Game session state and the per-frame render snapshot
//!
//! The session is the single owner of the active level and projectile. Every
//! transition goes through an explicit method here; `tick` decides which one
//! to call.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{PhysicsBody, launch_velocity, predict_trajectory};
use super::difficulty::{Difficulty, DifficultyProfile};
use super::level::{Level, Obstacle, Target};
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Choosing a difficulty before the first level
    DifficultySelect,
    /// Projectile sits in the slingshot; player may drag it
    Aiming,
    /// Projectile is flying
    ProjectileInMotion,
    /// Short pause after a shot settles
    WaitingForNextShot,
    /// All targets down; waiting for confirm
    LevelComplete,
    /// Out of shots; waiting for confirm
    GameOver,
}

/// Complete game session state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    pub phase: GamePhase,
    /// Active parameter bundle; only changed through `start`
    pub profile: DifficultyProfile,
    /// Menu highlight while in `DifficultySelect`
    pub pending_difficulty: Difficulty,
    pub level: Level,
    pub body: PhysicsBody,
    pub shots_remaining: u32,
    /// Host-clock time (ms) at which the pause ends
    pub next_shot_deadline: Option<u64>,
    /// Pointer currently holds the projectile
    pub dragging: bool,
    pub score: u64,
    /// Seed for generated levels
    pub seed: u64,
    /// Record projectile trails while in flight
    pub record_trails: bool,
    /// Emit an aim preview while dragging
    pub trajectory_preview: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameSession {
    /// Create a session waiting on the difficulty menu
    pub fn new(seed: u64) -> Self {
        let profile = DifficultyProfile::default();
        Self {
            phase: GamePhase::DifficultySelect,
            profile,
            pending_difficulty: profile.difficulty,
            level: Level::new(1, &profile, seed),
            body: PhysicsBody::at_anchor(),
            shots_remaining: profile.shot_budget,
            next_shot_deadline: None,
            dragging: false,
            score: 0,
            seed,
            record_trails: true,
            trajectory_preview: true,
            time_ticks: 0,
        }
    }

    #[inline]
    pub fn difficulty(&self) -> Difficulty {
        self.profile.difficulty
    }

    /// Move to `phase`. Leaving the pause drops its deadline, and any pull in
    /// progress is let go; every way back into `Aiming` loads a fresh projectile.
    pub(crate) fn enter(&mut self, phase: GamePhase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
        }
        if phase != GamePhase::WaitingForNextShot {
            self.next_shot_deadline = None;
        }
        self.dragging = false;
        self.phase = phase;
    }

    /// Apply a difficulty and start from level 1. Everything that depends on
    /// the profile is rebuilt together: level, projectile, shots, score.
    pub fn start(&mut self, difficulty: Difficulty) {
        self.profile = difficulty.profile();
        self.pending_difficulty = difficulty;
        log::info!("Difficulty set to {}", difficulty.as_str());
        self.restart();
    }

    /// Back to level 1 with the current profile
    pub fn restart(&mut self) {
        self.level = Level::new(1, &self.profile, self.seed);
        self.shots_remaining = self.level.shot_budget;
        self.score = 0;
        self.body = PhysicsBody::at_anchor();
        self.enter(GamePhase::Aiming);
    }

    /// Advance to the next level with a full shot budget
    pub fn next_level(&mut self) {
        self.level = Level::new(self.level.index + 1, &self.profile, self.seed);
        self.shots_remaining = self.level.shot_budget;
        self.body = PhysicsBody::at_anchor();
        self.enter(GamePhase::Aiming);
    }

    /// Load a fresh projectile into the slingshot
    pub fn prepare_next_shot(&mut self) {
        self.body = PhysicsBody::at_anchor();
        self.enter(GamePhase::Aiming);
    }

    /// Start dragging if the pointer lands near the projectile
    pub fn begin_drag(&mut self, pointer: Vec2) -> bool {
        if self.body.launched || self.body.pos.distance(pointer) >= PICKUP_RADIUS {
            return false;
        }
        self.dragging = true;
        true
    }

    /// Follow the pointer, clamped to the maximum pull distance
    pub fn drag_to(&mut self, pointer: Vec2) {
        if self.dragging {
            self.body.follow_pointer(SLINGSHOT_ANCHOR, pointer, MAX_DRAG);
        }
    }

    /// Release the projectile and spend a shot
    pub fn release(&mut self, pointer: Vec2) {
        if !self.dragging || self.shots_remaining == 0 {
            return;
        }
        self.body.follow_pointer(SLINGSHOT_ANCHOR, pointer, MAX_DRAG);
        let vel = launch_velocity(SLINGSHOT_ANCHOR, pointer, self.profile.power_divisor);
        self.body.launch(vel);
        self.shots_remaining -= 1;
        log::debug!(
            "Launch from {:?} vel {:?} ({} shots left)",
            pointer,
            vel,
            self.shots_remaining
        );
        self.enter(GamePhase::ProjectileInMotion);
    }

    /// Level cleared: bank the unused-shot bonus
    pub(crate) fn complete_level(&mut self) {
        let bonus = self.shots_remaining as u64 * SHOT_BONUS;
        self.score += bonus;
        log::info!(
            "Level {} complete, bonus {} (score {})",
            self.level.index,
            bonus,
            self.score
        );
        self.enter(GamePhase::LevelComplete);
    }

    /// Current shot is over: pause before the next one, or end the game
    pub(crate) fn finish_shot(&mut self, now_ms: u64) {
        if self.shots_remaining > 0 {
            self.enter(GamePhase::WaitingForNextShot);
            self.next_shot_deadline = Some(now_ms + SHOT_PAUSE_MS);
        } else if self.level.is_complete() {
            self.complete_level();
        } else {
            log::info!(
                "Out of shots on level {} with {} targets standing",
                self.level.index,
                self.level.targets_remaining()
            );
            self.enter(GamePhase::GameOver);
        }
    }

    /// Aim preview for the current pull, if dragging
    pub fn aim_preview(&self) -> Vec<Vec2> {
        if !self.dragging || !self.trajectory_preview {
            return Vec::new();
        }
        let vel = launch_velocity(SLINGSHOT_ANCHOR, self.body.pos, self.profile.power_divisor);
        predict_trajectory(self.body.pos, vel, self.profile.gravity)
    }

    /// Everything the render layer needs for this frame
    pub fn snapshot(&self) -> RenderSnapshot {
        RenderSnapshot {
            phase: self.phase,
            difficulty: self.difficulty(),
            pending_difficulty: self.pending_difficulty,
            level_index: self.level.index,
            body_pos: self.body.pos,
            body_vel: self.body.vel,
            body_radius: self.body.radius,
            launched: self.body.launched,
            at_rest: self.body.at_rest,
            trail: if self.record_trails {
                self.body.trail.clone()
            } else {
                Vec::new()
            },
            targets: self.level.targets.clone(),
            obstacles: self.level.obstacles.clone(),
            shots_remaining: self.shots_remaining,
            score: self.score,
            dragging: self.dragging,
            aim_preview: self.aim_preview(),
        }
    }
}

/// Per-frame output consumed by the render layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub pending_difficulty: Difficulty,
    pub level_index: u32,
    pub body_pos: Vec2,
    pub body_vel: Vec2,
    pub body_radius: f32,
    pub launched: bool,
    pub at_rest: bool,
    pub trail: Vec<Vec2>,
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
    pub shots_remaining: u32,
    pub score: u64,
    pub dragging: bool,
    pub aim_preview: Vec<Vec2>,
}
