//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical frame rate, per-frame physics constants
//! - Seeded RNG only (generated levels)
//! - Time only via the host-supplied millisecond clock
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod difficulty;
pub mod level;
pub mod rect;
pub mod state;
pub mod tick;

pub use body::{PhysicsBody, launch_velocity, predict_trajectory};
pub use collision::{
    CollisionAxis, ObstacleContact, circle_rect_overlap, collide_obstacles, resolve_obstacle,
    resolve_target,
};
pub use difficulty::{Difficulty, DifficultyProfile};
pub use level::{AUTHORED_LEVELS, Layout, Level, Obstacle, Target};
pub use rect::Rect;
pub use state::{GamePhase, GameSession, RenderSnapshot};
pub use tick::{InputEvent, Key, TickInput, autoplay_events, handle_event, plan_shot, tick};
