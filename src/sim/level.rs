//! Level layouts: targets to knock down and obstacles in the way
//!
//! Levels 1-3 come from a fixed table. Later levels are generated from a
//! seeded RNG so a run is reproducible for a given seed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use super::rect::Rect;
use crate::consts::*;

/// Number of hand-authored layouts
pub const AUTHORED_LEVELS: u32 = 3;

/// Static obstacle: deflects the projectile, never consumed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub rect: Rect,
}

impl Obstacle {
    pub const fn new(rect: Rect) -> Self {
        Self { rect }
    }
}

/// A target to knock down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Target {
    pub rect: Rect,
    /// Flips to true once; only a fresh level resets it
    pub hit: bool,
}

impl Target {
    /// Standard-size target with its top-left corner at `pos`
    pub fn new(pos: Vec2) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, TARGET_WIDTH, TARGET_HEIGHT),
            hit: false,
        }
    }
}

/// Unscaled layout: target top-left corners and obstacle rectangles
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub targets: Vec<Vec2>,
    pub obstacles: Vec<Rect>,
}

/// One level attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    /// 1-based level number
    pub index: u32,
    pub targets: Vec<Target>,
    pub obstacles: Vec<Obstacle>,
    /// Shots allotted, copied from the difficulty profile
    pub shot_budget: u32,
}

impl Level {
    /// Build level `index` for the given profile. `seed` only matters for
    /// generated levels (past the authored table).
    ///
    /// Target x coordinates are multiplied by the profile's distance factor;
    /// target y and all obstacle coordinates are left as laid out.
    pub fn new(index: u32, profile: &DifficultyProfile, seed: u64) -> Self {
        let index = index.max(1);
        let layout = authored_layout(index).unwrap_or_else(|| generated_layout(index, seed));

        let factor = profile.target_distance_factor;
        let targets = layout
            .targets
            .iter()
            .map(|&pos| {
                let mut target = Target::new(pos);
                target.rect = target.rect.scaled_x(factor);
                target
            })
            .collect();
        let obstacles = layout.obstacles.into_iter().map(Obstacle::new).collect();

        let level = Self {
            index,
            targets,
            obstacles,
            shot_budget: profile.shot_budget,
        };
        log::info!(
            "Level {} built: {} targets, {} obstacles, {} shots",
            level.index,
            level.targets.len(),
            level.obstacles.len(),
            level.shot_budget
        );
        level
    }

    /// All targets hit (vacuously true for an empty target list)
    pub fn is_complete(&self) -> bool {
        self.targets.iter().all(|t| t.hit)
    }

    /// Number of targets still standing
    pub fn targets_remaining(&self) -> usize {
        self.targets.iter().filter(|t| !t.hit).count()
    }
}

/// Hand-authored layouts for levels 1-3
pub fn authored_layout(index: u32) -> Option<Layout> {
    let layout = match index {
        1 => Layout {
            targets: vec![
                Vec2::new(400.0, HEIGHT - 80.0),
                Vec2::new(450.0, HEIGHT - 80.0),
                Vec2::new(500.0, HEIGHT - 80.0),
            ],
            obstacles: Vec::new(),
        },
        2 => Layout {
            targets: vec![Vec2::new(450.0, HEIGHT - 80.0), Vec2::new(550.0, HEIGHT - 80.0)],
            obstacles: vec![
                Rect::new(400.0, HEIGHT - 150.0, 20.0, 130.0),
                Rect::new(500.0, HEIGHT - 100.0, 100.0, 20.0),
            ],
        },
        3 => Layout {
            targets: vec![
                Vec2::new(400.0, HEIGHT - 200.0),
                Vec2::new(500.0, HEIGHT - 300.0),
                Vec2::new(600.0, HEIGHT - 80.0),
            ],
            obstacles: vec![
                Rect::new(450.0, HEIGHT - 150.0, 20.0, 130.0),
                Rect::new(550.0, HEIGHT - 250.0, 100.0, 20.0),
                Rect::new(650.0, HEIGHT - 150.0, 20.0, 130.0),
            ],
        },
        _ => return None,
    };
    Some(layout)
}

/// Procedural layout for levels past the authored table
///
/// Target count and obstacle count grow with the level index (capped). Every
/// generated level has at least one target, so it never completes on entry.
pub fn generated_layout(index: u32, seed: u64) -> Layout {
    // Mix level index into the run seed so each level differs within a run
    let level_seed = (index as u64).wrapping_mul(2654435761).wrapping_add(seed);
    let mut rng = Pcg32::seed_from_u64(level_seed);

    let extra = index.saturating_sub(AUTHORED_LEVELS);
    let num_targets = (2 + extra).min(5) as usize;
    let num_obstacles = (1 + extra).min(4) as usize;

    let mut targets = Vec::with_capacity(num_targets);
    for _ in 0..num_targets {
        let x = rng.random_range(350.0..600.0_f32).round();
        // Half stand on the ground, half float at a reachable height
        let y = if rng.random_bool(0.5) {
            HEIGHT - 80.0
        } else {
            HEIGHT - rng.random_range(180.0..320.0_f32).round()
        };
        targets.push(Vec2::new(x, y));
    }

    let target_rects: Vec<Rect> = targets
        .iter()
        .map(|p| Rect::new(p.x, p.y, TARGET_WIDTH, TARGET_HEIGHT))
        .collect();

    let mut obstacles = Vec::with_capacity(num_obstacles);
    let mut attempts = 0;
    while obstacles.len() < num_obstacles && attempts < num_obstacles * 8 {
        attempts += 1;
        let x = rng.random_range(330.0..680.0_f32).round();
        let candidate = if rng.random_bool(0.5) {
            // Upright post standing on the ground
            Rect::new(x, HEIGHT - 150.0, 20.0, 130.0)
        } else {
            // Floating slab
            let y = HEIGHT - rng.random_range(120.0..350.0_f32).round();
            Rect::new(x, y, 100.0, 20.0)
        };

        let blocked = target_rects.iter().any(|t| t.intersects(&candidate))
            || obstacles.iter().any(|o: &Rect| o.intersects(&candidate));
        if !blocked {
            obstacles.push(candidate);
        }
    }

    log::debug!(
        "Generated level {} (seed {}): {} targets, {} obstacles",
        index,
        seed,
        targets.len(),
        obstacles.len()
    );

    Layout { targets, obstacles }
}
