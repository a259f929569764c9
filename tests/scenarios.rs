use glam::Vec2;

use slingshot::consts::*;
use slingshot::sim::{
    Difficulty, GamePhase, GameSession, InputEvent, Key, Level, PhysicsBody, Target, TickInput,
    launch_velocity, resolve_target, tick,
};

fn started(difficulty: Difficulty) -> GameSession {
    let mut session = GameSession::new(7);
    session.start(difficulty);
    session
}

fn shoot(session: &mut GameSession, release: Vec2, now_ms: u64) {
    let input = TickInput::with_events(vec![
        InputEvent::DragStart(session.body.pos),
        InputEvent::DragMove(release),
        InputEvent::DragRelease(release),
    ]);
    tick(session, &input, now_ms);
}

/// Tick with no input until the shot is over; returns the host clock reached
fn fly_until_settled(session: &mut GameSession, mut now_ms: u64) -> u64 {
    for _ in 0..10_000 {
        if session.phase != GamePhase::ProjectileInMotion {
            break;
        }
        now_ms += SIM_DT_MS;
        tick(session, &TickInput::default(), now_ms);
    }
    now_ms
}

// ── Level construction ───────────────────────────────────────────────────────

#[test]
fn level_one_normal_completes_after_three_hits() {
    let mut level = Level::new(1, &Difficulty::Normal.profile(), 0);
    let xs: Vec<f32> = level.targets.iter().map(|t| t.rect.x).collect();
    assert_eq!(xs, vec![400.0, 450.0, 500.0]);
    assert!(!level.is_complete());

    for i in 0..level.targets.len() {
        let mut body = PhysicsBody::new(level.targets[i].rect.center());
        body.launched = true;
        assert!(resolve_target(&mut level.targets[i], &body));
        if i + 1 < level.targets.len() {
            assert!(!level.is_complete());
        }
    }
    assert!(level.is_complete());
}

// ── Launch ───────────────────────────────────────────────────────────────────

#[test]
fn launch_vector_matches_pull() {
    let anchor = Vec2::new(100.0, 500.0);
    let release = Vec2::new(50.0, 600.0);
    let vel = launch_velocity(anchor, release, 4.5);

    let distance = (50.0_f32 * 50.0 + 100.0 * 100.0).sqrt();
    let speed = (distance / 4.5).min(30.0);
    let angle = (500.0_f32 - 600.0).atan2(100.0 - 50.0);
    assert!((speed - 24.845).abs() < 0.01);
    assert!((vel.x - angle.cos() * speed).abs() < 0.0001);
    assert!((vel.y - angle.sin() * speed).abs() < 0.0001);
    // Pulled down-left, so it flies up-right
    assert!(vel.x > 0.0 && vel.y < 0.0);
}

#[test]
fn session_release_uses_profile_power() {
    assert_eq!(SLINGSHOT_ANCHOR, Vec2::new(100.0, 500.0));
    let mut session = started(Difficulty::Normal);

    assert!(session.begin_drag(SLINGSHOT_ANCHOR));
    session.drag_to(Vec2::new(50.0, 600.0));
    session.release(Vec2::new(50.0, 600.0));

    assert_eq!(session.phase, GamePhase::ProjectileInMotion);
    assert_eq!(session.shots_remaining, 4);
    let expected = launch_velocity(SLINGSHOT_ANCHOR, Vec2::new(50.0, 600.0), 4.5);
    assert!((session.body.vel - expected).length() < 0.0001);
}

// ── Shot budget ──────────────────────────────────────────────────────────────

#[test]
fn last_shot_missing_ends_the_game() {
    let mut session = started(Difficulty::Normal);
    session.shots_remaining = 1;

    // Straight up; comes back down on the slingshot side, far from the targets
    shoot(&mut session, SLINGSHOT_ANCHOR + Vec2::new(0.0, 60.0), 0);
    assert_eq!(session.shots_remaining, 0);
    fly_until_settled(&mut session, 0);

    assert_eq!(session.phase, GamePhase::GameOver);
    assert!(!session.level.is_complete());
    assert_eq!(session.next_shot_deadline, None);
}

#[test]
fn completion_beats_rest_in_the_same_frame() {
    let mut session = started(Difficulty::Normal);
    session.shots_remaining = 1;
    // A single target covering the slingshot, so a zero-pull shot both rests
    // and clears the level on its first frame
    session.level.targets = vec![Target::new(SLINGSHOT_ANCHOR - Vec2::new(20.0, 30.0))];

    shoot(&mut session, SLINGSHOT_ANCHOR, 0);
    assert!(session.body.at_rest);
    assert_eq!(session.phase, GamePhase::LevelComplete);
    assert_eq!(session.score, TARGET_SCORE);
}

#[test]
fn shots_left_means_a_pause_then_a_fresh_projectile() {
    let mut session = started(Difficulty::Easy);
    shoot(&mut session, SLINGSHOT_ANCHOR + Vec2::new(0.0, 60.0), 0);
    let settled_at = fly_until_settled(&mut session, 0);

    assert_eq!(session.phase, GamePhase::WaitingForNextShot);
    assert_eq!(session.next_shot_deadline, Some(settled_at + SHOT_PAUSE_MS));

    tick(&mut session, &TickInput::default(), settled_at + SHOT_PAUSE_MS / 2);
    assert_eq!(session.phase, GamePhase::WaitingForNextShot);

    tick(&mut session, &TickInput::default(), settled_at + SHOT_PAUSE_MS);
    assert_eq!(session.phase, GamePhase::Aiming);
    assert_eq!(session.shots_remaining, 6);
    assert!(!session.body.launched);
}

// ── Difficulty ───────────────────────────────────────────────────────────────

#[test]
fn reselecting_difficulty_resets_the_session() {
    let mut session = started(Difficulty::Normal);
    shoot(&mut session, SLINGSHOT_ANCHOR + Vec2::new(-100.0, 60.0), 0);
    assert_eq!(session.phase, GamePhase::ProjectileInMotion);

    let input = TickInput::with_events(vec![InputEvent::Key(Key::SelectDifficulty(Difficulty::Hard))]);
    tick(&mut session, &input, 16);

    assert_eq!(session.phase, GamePhase::Aiming);
    assert_eq!(session.difficulty(), Difficulty::Hard);
    assert_eq!(session.profile, Difficulty::Hard.profile());
    assert_eq!(session.level.index, 1);
    assert_eq!(session.shots_remaining, 3);
    assert!((session.level.targets[0].rect.x - 400.0 * 1.3).abs() < 0.001);
    assert!(!session.body.launched);
    assert_eq!(session.body.pos, SLINGSHOT_ANCHOR);
}

// ── Autoplay ─────────────────────────────────────────────────────────────────

#[test]
fn autoplay_clears_first_level_on_easy() {
    let mut session = GameSession::new(3);
    session.pending_difficulty = Difficulty::Easy;
    let input = TickInput {
        autoplay: true,
        ..Default::default()
    };

    let mut reached = false;
    for frame in 0..20_000u64 {
        tick(&mut session, &input, frame * SIM_DT_MS);
        if session.level.index >= 2 {
            reached = true;
            break;
        }
        assert_ne!(session.phase, GamePhase::GameOver);
    }
    assert!(reached);
    assert!(session.score >= 3 * TARGET_SCORE);
}
