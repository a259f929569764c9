//! Slingshot entry point
//!
//! Headless native host: runs the simulation at a fixed 60 Hz and logs what a
//! renderer would draw. There is no window or pointer device, so the session
//! is driven by autoplay. Runs until the process is signalled to exit.

use std::time::{Duration, Instant};

use slingshot::Settings;
use slingshot::consts::*;
use slingshot::sim::{GamePhase, GameSession, TickInput, tick};

/// Game instance holding all host-side state
struct Game {
    session: GameSession,
    input: TickInput,
    start: Instant,
    accumulator: f32,
    last_time: Instant,
    // FPS tracking
    frame_count: u32,
    fps_window_start: Instant,
    fps: u32,
    // Track phase for logging
    last_phase: GamePhase,
    last_level: u32,
}

impl Game {
    fn new(settings: &Settings) -> Self {
        let session = settings.new_session();
        let now = Instant::now();
        Self {
            last_phase: session.phase,
            last_level: session.level.index,
            session,
            input: TickInput {
                events: Vec::new(),
                autoplay: settings.autoplay,
            },
            start: now,
            accumulator: 0.0,
            last_time: now,
            frame_count: 0,
            fps_window_start: now,
            fps: 0,
        }
    }

    /// Host clock in milliseconds since startup
    fn now_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    /// Run simulation ticks
    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_time).as_secs_f32().min(0.1);
        self.last_time = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let now_ms = self.now_ms();
            tick(&mut self.session, &self.input, now_ms);
            self.accumulator -= SIM_DT;
            substeps += 1;

            // Events are one-shot
            self.input.events.clear();
        }

        self.frame_count += 1;
        let elapsed = now.duration_since(self.fps_window_start);
        if elapsed >= Duration::from_secs(1) {
            self.fps = (self.frame_count as f32 / elapsed.as_secs_f32()).round() as u32;
            self.frame_count = 0;
            self.fps_window_start = now;
            log::debug!("{} fps, {} ticks", self.fps, self.session.time_ticks);
        }
    }

    /// Stand-in for drawing: report state changes
    fn render(&mut self) {
        let phase = self.session.phase;
        if phase != self.last_phase {
            match phase {
                GamePhase::LevelComplete => log::info!(
                    "Level {} cleared with {} shots to spare, score {}",
                    self.session.level.index,
                    self.session.shots_remaining,
                    self.session.score
                ),
                GamePhase::GameOver => log::info!(
                    "Game over on level {}, final score {}",
                    self.session.level.index,
                    self.session.score
                ),
                _ => {}
            }
            self.last_phase = phase;
        }

        if self.session.level.index != self.last_level {
            log::info!(
                "Now playing level {} ({})",
                self.session.level.index,
                self.session.difficulty().as_str()
            );
            self.last_level = self.session.level.index;
        }

        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(&self.session.snapshot()) {
                Ok(json) => log::trace!("{}", json),
                Err(e) => log::warn!("Snapshot serialization failed: {}", e),
            }
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Slingshot (headless) starting...");

    let settings = Settings::load();
    if !settings.autoplay {
        log::warn!("Autoplay disabled and no input device attached; the menu will wait forever");
    }
    log::info!(
        "Settings: difficulty {}, seed {}, autoplay {}",
        settings.difficulty.as_str(),
        settings.seed,
        settings.autoplay
    );

    let mut game = Game::new(&settings);
    let frame = Duration::from_millis(SIM_DT_MS);

    loop {
        let frame_start = Instant::now();
        game.update();
        game.render();

        if let Some(remaining) = frame.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(remaining);
        }
    }
}
