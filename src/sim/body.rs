//! Projectile physics: per-frame integration and play-field boundaries
//!
//! Integration is explicit Euler at the fixed logical frame rate. Gravity and
//! drag are per-frame quantities and are never scaled by elapsed time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyProfile;
use crate::consts::*;
use crate::{clamp_to_radius, ground_y, polar_to_cartesian};

/// The projectile's physical state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Set once, on release
    pub launched: bool,
    /// Terminal: no further integration once set
    pub at_rest: bool,
    /// Position history for rendering (newest last)
    #[serde(skip)]
    pub trail: Vec<Vec2>,
}

impl PhysicsBody {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius: BODY_RADIUS,
            launched: false,
            at_rest: false,
            trail: Vec::with_capacity(TRAIL_LENGTH),
        }
    }

    /// A fresh, unlaunched projectile sitting in the slingshot
    pub fn at_anchor() -> Self {
        Self::new(SLINGSHOT_ANCHOR)
    }

    /// Whether integration should run this frame
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.launched && !self.at_rest
    }

    /// Record current position to trail (call each frame while moving)
    pub fn record_trail(&mut self) {
        if self.trail.len() >= TRAIL_LENGTH {
            self.trail.remove(0);
        }
        self.trail.push(self.pos);
    }

    /// Drag the unlaunched projectile toward `pointer`, keeping it within
    /// `max_drag` of `anchor`. Ignored once launched.
    pub fn follow_pointer(&mut self, anchor: Vec2, pointer: Vec2, max_drag: f32) {
        if self.launched {
            return;
        }
        self.pos = clamp_to_radius(anchor, pointer, max_drag);
        self.vel = Vec2::ZERO;
    }

    /// Release the projectile with `vel`. A launch too slow to satisfy the
    /// rest predicate comes to rest immediately.
    pub fn launch(&mut self, vel: Vec2) {
        if self.launched {
            return;
        }
        self.vel = vel;
        self.launched = true;
        if vel.x.abs() < REST_SPEED_ANYWHERE && vel.y.abs() < REST_SPEED_ANYWHERE {
            log::debug!("Degenerate launch {:?}, body at rest", vel);
            self.at_rest = true;
        }
    }

    /// Advance one frame: gravity, drag, motion, rest check, then boundaries
    pub fn integrate(&mut self, profile: &DifficultyProfile) {
        if !self.is_moving() {
            return;
        }

        self.vel.y += profile.gravity;
        self.vel *= profile.drag;
        self.pos += self.vel;

        if self.satisfies_rest() {
            self.at_rest = true;
        }

        self.apply_boundaries(profile.elasticity);
    }

    /// Rest predicate: slow and near the ground, or very slow anywhere
    pub fn satisfies_rest(&self) -> bool {
        let (vx, vy) = (self.vel.x.abs(), self.vel.y.abs());
        let near_ground = self.pos.y > ground_y() - self.radius - REST_GROUND_MARGIN;

        (vx < REST_SPEED_GROUNDED && vy < REST_SPEED_GROUNDED && near_ground)
            || (vx < REST_SPEED_ANYWHERE && vy < REST_SPEED_ANYWHERE)
    }

    /// Grounded rest test for a body sitting on a supporting surface other
    /// than the ground (an obstacle's top face)
    pub fn satisfies_supported_rest(&self) -> bool {
        self.vel.x.abs() < REST_SPEED_GROUNDED && self.vel.y.abs() < REST_SPEED_GROUNDED
    }

    /// Reflect off the four play-field edges. Horizontal and vertical checks
    /// are independent, so a corner hit reflects both components.
    fn apply_boundaries(&mut self, elasticity: f32) {
        let r = self.radius;

        if self.pos.x - r < 0.0 {
            self.pos.x = r;
            self.vel.x *= -elasticity;
        } else if self.pos.x + r > WIDTH {
            self.pos.x = WIDTH - r;
            self.vel.x *= -elasticity;
        }

        if self.pos.y - r < 0.0 {
            self.pos.y = r;
            self.vel.y *= -elasticity;
        } else if self.pos.y + r > ground_y() {
            // Ground contact is lossier than a wall
            self.pos.y = ground_y() - r;
            self.vel.y *= -elasticity * GROUND_BOUNCE_FACTOR;
            self.vel.x *= GROUND_FRICTION;
        }
    }

    /// Center has left the play field
    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.x < 0.0 || self.pos.x > WIDTH || self.pos.y > HEIGHT
    }
}

/// Launch velocity for a pull from `anchor` released at `release`.
///
/// The projectile flies away from the release point, back through the anchor.
/// Speed is the pull distance over `power_divisor`, capped at
/// [`MAX_LAUNCH_SPEED`]. A zero-length pull yields a zero vector.
pub fn launch_velocity(anchor: Vec2, release: Vec2, power_divisor: f32) -> Vec2 {
    let delta = anchor - release;
    let speed = (delta.length() / power_divisor).min(MAX_LAUNCH_SPEED);
    let angle = delta.y.atan2(delta.x);
    polar_to_cartesian(speed, angle)
}

/// Aim preview: ballistic positions (no drag, no bounces) one frame apart,
/// stopping at the first point outside the play field.
pub fn predict_trajectory(start: Vec2, vel: Vec2, gravity: f32) -> Vec<Vec2> {
    let mut points = Vec::with_capacity(PREVIEW_STEPS as usize);
    for step in 1..PREVIEW_STEPS {
        let t = step as f32;
        let p = start + vel * t + Vec2::new(0.0, 0.5 * gravity * t * t);
        if p.x < 0.0 || p.x > WIDTH || p.y < 0.0 || p.y > HEIGHT {
            break;
        }
        points.push(p);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Difficulty;

    fn flying(pos: Vec2, vel: Vec2) -> PhysicsBody {
        let mut body = PhysicsBody::new(pos);
        body.launched = true;
        body.vel = vel;
        body
    }

    #[test]
    fn test_unlaunched_body_does_not_move() {
        let profile = Difficulty::Normal.profile();
        let mut body = PhysicsBody::at_anchor();
        body.integrate(&profile);
        assert_eq!(body.pos, SLINGSHOT_ANCHOR);
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_integrate_applies_gravity_then_drag() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(400.0, 200.0), Vec2::new(10.0, -5.0));
        body.integrate(&profile);

        let expected_vel = Vec2::new(10.0 * 0.97, (-5.0 + 0.5) * 0.97);
        assert!((body.vel - expected_vel).length() < 0.0001);
        assert!((body.pos - (Vec2::new(400.0, 200.0) + expected_vel)).length() < 0.0001);
        assert!(!body.at_rest);
    }

    #[test]
    fn test_right_wall_reflection() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(WIDTH - 20.0, 200.0), Vec2::new(20.0, 0.0));
        body.integrate(&profile);
        assert_eq!(body.pos.x, WIDTH - body.radius);
        assert!(body.vel.x < 0.0);
        assert!((body.vel.x + 20.0 * 0.97 * 0.75).abs() < 0.0001);
    }

    #[test]
    fn test_ceiling_reflection() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(400.0, 20.0), Vec2::new(0.0, -20.0));
        body.integrate(&profile);
        assert_eq!(body.pos.y, body.radius);
        assert!(body.vel.y > 0.0);
    }

    #[test]
    fn test_ground_contact_is_lossier() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(400.0, ground_y() - 20.0), Vec2::new(10.0, 10.0));
        body.integrate(&profile);

        let vy_before = (10.0 + 0.5) * 0.97;
        let vx_before = 10.0 * 0.97;
        assert_eq!(body.pos.y, ground_y() - body.radius);
        assert!((body.vel.y + vy_before * 0.75 * 0.8).abs() < 0.0001);
        assert!((body.vel.x - vx_before * 0.9).abs() < 0.0001);
    }

    #[test]
    fn test_corner_reflects_both_axes() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(10.0, 10.0), Vec2::new(-20.0, -20.0));
        body.integrate(&profile);
        assert_eq!(body.pos, Vec2::splat(body.radius));
        assert!(body.vel.x > 0.0 && body.vel.y > 0.0);
    }

    #[test]
    fn test_rest_near_ground() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(400.0, ground_y() - BODY_RADIUS), Vec2::new(0.3, -0.4));
        body.integrate(&profile);
        assert!(body.at_rest);
    }

    #[test]
    fn test_slow_body_in_air_not_at_rest_unless_very_slow() {
        let mut body = flying(Vec2::new(400.0, 200.0), Vec2::new(0.3, 0.3));
        assert!(!body.satisfies_rest());
        body.vel = Vec2::new(0.1, -0.1);
        assert!(body.satisfies_rest());
    }

    #[test]
    fn test_supported_rest_ignores_height() {
        let mut body = flying(Vec2::new(400.0, 200.0), Vec2::new(0.3, -0.21));
        assert!(!body.satisfies_rest());
        assert!(body.satisfies_supported_rest());
        body.vel.x = 0.6;
        assert!(!body.satisfies_supported_rest());
    }

    #[test]
    fn test_body_eventually_settles() {
        let profile = Difficulty::Normal.profile();
        let mut body = flying(Vec2::new(300.0, 300.0), Vec2::new(8.0, -6.0));
        for _ in 0..2000 {
            body.integrate(&profile);
            if body.at_rest {
                break;
            }
        }
        assert!(body.at_rest);
    }

    #[test]
    fn test_follow_pointer_clamps_to_max_drag() {
        let mut body = PhysicsBody::at_anchor();
        body.follow_pointer(SLINGSHOT_ANCHOR, SLINGSHOT_ANCHOR + Vec2::new(-300.0, 0.0), MAX_DRAG);
        assert!((body.pos - (SLINGSHOT_ANCHOR - Vec2::new(MAX_DRAG, 0.0))).length() < 0.001);
        assert_eq!(body.vel, Vec2::ZERO);
    }

    #[test]
    fn test_launch_velocity_capped() {
        let vel = launch_velocity(Vec2::new(100.0, 500.0), Vec2::new(-200.0, 500.0), 4.5);
        assert!((vel.length() - MAX_LAUNCH_SPEED).abs() < 0.001);
        assert!(vel.x > 0.0);
    }

    #[test]
    fn test_zero_pull_launch_rests_immediately() {
        let vel = launch_velocity(SLINGSHOT_ANCHOR, SLINGSHOT_ANCHOR, 4.5);
        assert_eq!(vel, Vec2::ZERO);

        let mut body = PhysicsBody::at_anchor();
        body.launch(vel);
        assert!(body.launched);
        assert!(body.at_rest);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut body = PhysicsBody::at_anchor();
        for i in 0..(TRAIL_LENGTH + 5) {
            body.pos.x = i as f32;
            body.record_trail();
        }
        assert_eq!(body.trail.len(), TRAIL_LENGTH);
        assert_eq!(body.trail[0].x, 5.0);
        assert_eq!(body.trail[TRAIL_LENGTH - 1].x, (TRAIL_LENGTH + 4) as f32);
    }

    #[test]
    fn test_predict_trajectory_stops_off_field() {
        let points = predict_trajectory(Vec2::new(100.0, 500.0), Vec2::new(30.0, 0.0), 0.5);
        assert!(!points.is_empty());
        assert!(points.len() < (PREVIEW_STEPS - 1) as usize);
        assert!(points.iter().all(|p| p.x <= WIDTH && p.y <= HEIGHT));
    }
}
