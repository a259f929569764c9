//! Fixed timestep simulation tick
//!
//! Each tick drains the frame's input events in order, then advances the
//! simulation for whatever phase the session ends up in. The host supplies a
//! monotonic millisecond clock; nothing here reads the wall clock.

use glam::Vec2;

use super::body::{PhysicsBody, launch_velocity};
use super::collision::{collide_obstacles, resolve_target};
use super::difficulty::{Difficulty, DifficultyProfile};
use super::level::Obstacle;
use super::rect::Rect;
use super::state::{GamePhase, GameSession};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Recognized keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Start over from level 1
    Restart,
    /// Skip the pause between shots
    Ready,
    /// Highlight a tier in the menu, or switch tier mid-session
    SelectDifficulty(Difficulty),
    /// Accept the highlighted tier
    ConfirmDifficulty,
    /// Dismiss the level-complete / game-over overlay
    Continue,
}

/// Gesture and key events derived from raw device input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    DragStart(Vec2),
    DragMove(Vec2),
    DragRelease(Vec2),
    Key(Key),
    /// Pointer click on an overlay or menu
    ConfirmClick,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Events in arrival order
    pub events: Vec<InputEvent>,
    /// Demo mode - the session plays itself
    pub autoplay: bool,
}

impl TickInput {
    pub fn with_events(events: Vec<InputEvent>) -> Self {
        Self {
            events,
            autoplay: false,
        }
    }
}

/// Advance the session by one logical frame
pub fn tick(session: &mut GameSession, input: &TickInput, now_ms: u64) {
    session.time_ticks += 1;

    for event in &input.events {
        handle_event(session, *event);
    }
    if input.autoplay {
        for event in autoplay_events(session) {
            handle_event(session, event);
        }
    }

    match session.phase {
        GamePhase::WaitingForNextShot => {
            if session.next_shot_deadline.is_some_and(|deadline| now_ms >= deadline) {
                session.prepare_next_shot();
            }
        }
        GamePhase::ProjectileInMotion => step_flight(session, now_ms),
        _ => {}
    }
}

/// Apply one input event. Events that make no sense in the current phase
/// are dropped.
pub fn handle_event(session: &mut GameSession, event: InputEvent) {
    let phase = session.phase;
    match (phase, event) {
        (GamePhase::Aiming, InputEvent::DragStart(p)) => {
            session.begin_drag(p);
        }
        (GamePhase::Aiming, InputEvent::DragMove(p)) => session.drag_to(p),
        (GamePhase::Aiming, InputEvent::DragRelease(p)) if session.dragging => session.release(p),

        (GamePhase::DifficultySelect, InputEvent::Key(Key::Restart)) => {
            session.start(session.pending_difficulty)
        }
        (_, InputEvent::Key(Key::Restart)) => {
            log::info!("Restart requested");
            session.restart();
        }

        (GamePhase::WaitingForNextShot, InputEvent::Key(Key::Ready)) => session.prepare_next_shot(),

        (GamePhase::DifficultySelect, InputEvent::Key(Key::SelectDifficulty(d))) => {
            session.pending_difficulty = d;
        }
        (_, InputEvent::Key(Key::SelectDifficulty(d))) => {
            // Mid-session switch discards the current run entirely
            session.start(d);
        }

        (
            GamePhase::DifficultySelect,
            InputEvent::Key(Key::ConfirmDifficulty) | InputEvent::ConfirmClick,
        ) => session.start(session.pending_difficulty),

        (GamePhase::LevelComplete, InputEvent::Key(Key::Continue) | InputEvent::ConfirmClick) => {
            session.next_level()
        }
        (GamePhase::GameOver, InputEvent::Key(Key::Continue) | InputEvent::ConfirmClick) => {
            session.restart()
        }

        (phase, event) => log::trace!("Ignored {:?} in {:?}", event, phase),
    }
}

/// One frame of flight: integrate, collide, then check for the end of the shot
fn step_flight(session: &mut GameSession, now_ms: u64) {
    if session.record_trails && session.body.is_moving() {
        session.body.record_trail();
    }
    session.body.integrate(&session.profile);
    // Skipped when integration just brought the body to rest
    collide_obstacles(&mut session.body, &session.level.obstacles, session.profile.elasticity);

    for target in &mut session.level.targets {
        if resolve_target(target, &session.body) {
            session.score += TARGET_SCORE;
            log::debug!("Target at {:?} hit (score {})", target.rect.center(), session.score);
        }
    }

    // Completion wins over the rest / out-of-bounds branch in the same frame
    if session.level.is_complete() {
        session.complete_level();
        return;
    }

    if session.body.at_rest || session.body.is_out_of_bounds() {
        session.finish_shot(now_ms);
    }
}

/// Demo driver: confirm menus and overlays, and fire at the first standing
/// target when the slingshot is loaded.
pub fn autoplay_events(session: &GameSession) -> Vec<InputEvent> {
    match session.phase {
        GamePhase::DifficultySelect => vec![InputEvent::Key(Key::ConfirmDifficulty)],
        GamePhase::LevelComplete | GamePhase::GameOver => vec![InputEvent::Key(Key::Continue)],
        GamePhase::Aiming if !session.dragging && !session.body.launched => {
            match plan_shot(session) {
                Some(release) => vec![
                    InputEvent::DragStart(session.body.pos),
                    InputEvent::DragMove(release),
                    InputEvent::DragRelease(release),
                ],
                None => Vec::new(),
            }
        }
        _ => Vec::new(),
    }
}

/// Pull angles sampled by the autoplay planner (radians, screen space)
const PLAN_ANGLES: u32 = 24;
/// Pull distances sampled by the autoplay planner
const PLAN_PULLS: [f32; 7] = [40.0, 60.0, 80.0, 100.0, 115.0, 130.0, 150.0];
/// Frames simulated per candidate
const PLAN_MAX_FRAMES: u32 = 400;

/// Choose a release point whose simulated flight passes closest to the
/// first standing target. Returns None when no target is left.
pub fn plan_shot(session: &GameSession) -> Option<Vec2> {
    let goal = session.level.targets.iter().find(|t| !t.hit)?.rect;

    let mut best: Option<(f32, Vec2)> = None;
    for i in 0..PLAN_ANGLES {
        // Launch directions from straight right (0) to steeply up (-80 deg);
        // the pull points the opposite way.
        let launch_angle = -(80.0_f32.to_radians()) * i as f32 / (PLAN_ANGLES - 1) as f32;
        let pull_angle = launch_angle + std::f32::consts::PI;
        for pull in PLAN_PULLS {
            let release = SLINGSHOT_ANCHOR + polar_to_cartesian(pull, pull_angle);
            let miss = simulate_shot(&session.profile, &session.level.obstacles, release, &goal);
            if best.is_none_or(|(best_miss, _)| miss < best_miss) {
                best = Some((miss, release));
            }
        }
    }

    best.map(|(miss, release)| {
        log::debug!("Autoplay aiming at {:?}, predicted miss {:.1}", goal.center(), miss);
        release
    })
}

/// Fly a throwaway projectile and report how close it gets to `goal`
/// (distance from the body's edge to the rectangle; <= 0 means contact).
fn simulate_shot(
    profile: &DifficultyProfile,
    obstacles: &[Obstacle],
    release: Vec2,
    goal: &Rect,
) -> f32 {
    let mut body = PhysicsBody::new(release);
    body.launch(launch_velocity(SLINGSHOT_ANCHOR, release, profile.power_divisor));

    let mut closest = f32::MAX;
    for _ in 0..PLAN_MAX_FRAMES {
        body.integrate(profile);
        collide_obstacles(&mut body, obstacles, profile.elasticity);

        let gap = goal.clamp_point(body.pos).distance(body.pos) - body.radius;
        closest = closest.min(gap);
        if gap < 0.0 || !body.is_moving() || body.is_out_of_bounds() {
            break;
        }
    }
    closest
}
