//! Collision detection and response between the projectile and level geometry
//!
//! Obstacles deflect the projectile. Targets only register a hit; they never
//! change the projectile's motion.

use glam::Vec2;

use super::body::PhysicsBody;
use super::level::{Obstacle, Target};
use super::rect::Rect;

/// Axis along which an obstacle pushes the projectile back out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionAxis {
    Horizontal,
    Vertical,
}

/// Face of an obstacle the projectile was pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleContact {
    Side,
    /// Pushed up onto the obstacle; the top face supports the body like the ground
    Top,
    Bottom,
}

/// Check overlap between a circle and an axis-aligned rectangle
///
/// The circle center is clamped to the rectangle to find the nearest point;
/// the shapes overlap when that point is strictly closer than `radius`.
#[inline]
pub fn circle_rect_overlap(center: Vec2, radius: f32, rect: &Rect) -> bool {
    let nearest = rect.clamp_point(center);
    nearest.distance(center) < radius
}

/// Pick the collision normal axis from the offset between the rectangle's
/// center and `point`. The larger offset wins; ties go horizontal.
pub fn dominant_axis(rect: &Rect, point: Vec2) -> CollisionAxis {
    let offset = point - rect.center();
    if offset.x.abs() >= offset.y.abs() {
        CollisionAxis::Horizontal
    } else {
        CollisionAxis::Vertical
    }
}

/// Bounce the projectile off an obstacle
///
/// Single pass: the velocity component along the dominant axis is reflected
/// and scaled by `elasticity`, and the body is moved just outside the
/// obstacle's face on that axis. Returns the face it left through, or None
/// when there was no overlap.
pub fn resolve_obstacle(
    body: &mut PhysicsBody,
    obstacle: &Obstacle,
    elasticity: f32,
) -> Option<ObstacleContact> {
    let rect = &obstacle.rect;
    if !circle_rect_overlap(body.pos, body.radius, rect) {
        return None;
    }

    let center = rect.center();
    let contact = match dominant_axis(rect, body.pos) {
        CollisionAxis::Horizontal => {
            body.vel.x *= -elasticity;
            body.pos.x = if body.pos.x < center.x {
                rect.left() - body.radius
            } else {
                rect.right() + body.radius
            };
            ObstacleContact::Side
        }
        CollisionAxis::Vertical if body.pos.y < center.y => {
            body.vel.y *= -elasticity;
            body.pos.y = rect.top() - body.radius;
            ObstacleContact::Top
        }
        CollisionAxis::Vertical => {
            body.vel.y *= -elasticity;
            body.pos.y = rect.bottom() + body.radius;
            ObstacleContact::Bottom
        }
    };

    log::debug!("Obstacle bounce ({:?}) at {:?}, vel now {:?}", contact, body.pos, body.vel);
    Some(contact)
}

/// Resolve every obstacle against a moving body, then apply the grounded
/// rest test if one of them left the body sitting on its top face.
/// Does nothing once the body is at rest.
pub fn collide_obstacles(body: &mut PhysicsBody, obstacles: &[Obstacle], elasticity: f32) {
    if !body.is_moving() {
        return;
    }

    let mut supported = false;
    for obstacle in obstacles {
        if resolve_obstacle(body, obstacle, elasticity) == Some(ObstacleContact::Top) {
            supported = true;
        }
    }
    if supported && body.satisfies_supported_rest() {
        log::debug!("Body settled on an obstacle at {:?}", body.pos);
        body.at_rest = true;
    }
}

/// Register a hit on a target. Already-hit targets are ignored.
///
/// Returns true only on the call that flips the target to hit.
pub fn resolve_target(target: &mut Target, body: &PhysicsBody) -> bool {
    if target.hit {
        return false;
    }
    if circle_rect_overlap(body.pos, body.radius, &target.rect) {
        target.hit = true;
        return true;
    }
    false
}
