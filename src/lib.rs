//! Slingshot - a single-screen 2D projectile arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, levels, game state machine)
//! - `settings`: Host preferences loaded from JSON
//!
//! Rendering and input polling live outside this crate. A host feeds gesture and
//! key events into [`sim::tick`] once per frame and draws the returned
//! [`sim::RenderSnapshot`].

pub mod settings;
pub mod sim;

pub use settings::Settings;

use glam::Vec2;

/// Game configuration constants
///
/// Screen coordinates: origin top-left, +y points down toward the ground.
pub mod consts {
    use glam::Vec2;

    /// Logical frame rate. Physics constants are per-frame, not per-second.
    pub const FRAME_RATE: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE as f32;
    /// Fixed simulation timestep in milliseconds (host clock units)
    pub const SIM_DT_MS: u64 = 1000 / FRAME_RATE as u64;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play-field dimensions
    pub const WIDTH: f32 = 800.0;
    pub const HEIGHT: f32 = 600.0;
    /// Thickness of the ground strip along the bottom edge
    pub const GROUND_HEIGHT: f32 = 20.0;

    /// Slingshot anchor: where every fresh projectile is placed
    pub const SLINGSHOT_ANCHOR: Vec2 = Vec2::new(100.0, HEIGHT - 100.0);
    /// Pointer must press within this distance of the projectile to grab it
    pub const PICKUP_RADIUS: f32 = 50.0;
    /// Maximum pull-back distance from the anchor while aiming
    pub const MAX_DRAG: f32 = 150.0;
    /// Launch speed cap (units per frame)
    pub const MAX_LAUNCH_SPEED: f32 = 30.0;

    /// Projectile radius
    pub const BODY_RADIUS: f32 = 15.0;
    /// Rest predicate: slow threshold, applies only near the ground
    pub const REST_SPEED_GROUNDED: f32 = 0.5;
    /// Rest predicate: very slow threshold, applies at any height
    pub const REST_SPEED_ANYWHERE: f32 = 0.2;
    /// Height of the near-ground band used by the rest predicate
    pub const REST_GROUND_MARGIN: f32 = 10.0;
    /// Ground bounces keep this fraction of the wall elasticity
    pub const GROUND_BOUNCE_FACTOR: f32 = 0.8;
    /// Extra horizontal damping on ground contact
    pub const GROUND_FRICTION: f32 = 0.9;

    /// Target footprint
    pub const TARGET_WIDTH: f32 = 40.0;
    pub const TARGET_HEIGHT: f32 = 60.0;

    /// Pause between a shot settling and the next projectile appearing
    pub const SHOT_PAUSE_MS: u64 = 1000;

    /// Maximum number of trail points to store
    pub const TRAIL_LENGTH: usize = 20;
    /// Aim preview samples (frames ahead)
    pub const PREVIEW_STEPS: u32 = 30;

    /// Points per target knocked down
    pub const TARGET_SCORE: u64 = 100;
    /// Points per unused shot when a level is cleared
    pub const SHOT_BONUS: u64 = 50;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Clamp `point` so it lies no further than `max_dist` from `origin`,
/// keeping its direction from `origin`.
#[inline]
pub fn clamp_to_radius(origin: Vec2, point: Vec2, max_dist: f32) -> Vec2 {
    let offset = point - origin;
    let dist = offset.length();
    if dist > max_dist {
        origin + offset * (max_dist / dist)
    } else {
        point
    }
}

/// Y coordinate of the ground surface
#[inline]
pub fn ground_y() -> f32 {
    consts::HEIGHT - consts::GROUND_HEIGHT
}
