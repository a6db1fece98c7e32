//! Fixed-timestep game loop
//!
//! Each loop iteration drains input, applies clicks to the screen machine,
//! runs as many 60 Hz ticks as the elapsed wall time allows (up to a cap),
//! and renders exactly once. Rendering is not paced: the loop goes straight
//! into the next iteration, so a fast renderer draws several frames per tick.
//! Ticks on the play screen step the simulation; on every other screen they
//! only advance the rainbow hue.

use std::time::{Duration, Instant};

use glam::Vec2;

use crate::input::{InputQueue, InputSender, steer_direction};
use crate::renderer::{FrameSnapshot, RenderError, Renderer};
use crate::settings::Settings;
use crate::sim::{Simulation, TickInput, tick};
use crate::ui::{Layout, Screen, ScreenMachine};

/// Monotonic time source for the loop
pub trait Clock {
    /// Time elapsed since some fixed origin
    fn now(&mut self) -> Duration;
}

/// Wall clock backed by `Instant`
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> Duration {
        self.start.elapsed()
    }
}

/// What one loop iteration did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Fixed ticks run
    pub ticks: u32,
    /// Whole ticks discarded because the backlog exceeded the catch-up cap
    pub dropped_ticks: u32,
    /// Clicks that hit a button
    pub clicks_handled: u32,
}

/// Game instance: simulation, screens, input and loop timing
pub struct Game {
    sim: Simulation,
    screens: ScreenMachine,
    layout: Layout,
    input: InputQueue,
    canvas: Vec2,
    tick_dt: f64,
    max_catch_up_ticks: u32,
    accumulator: f64,
    last_time: Option<Duration>,
    frames: u64,
}

impl Game {
    /// Create a game on the menu screen plus the sender the platform feeds
    pub fn new(seed: u64, settings: Settings, canvas: Vec2) -> (Self, InputSender) {
        let (tx, input) = InputQueue::channel();
        log::info!(
            "Game created: seed {}, canvas {}x{}, {} Hz",
            seed,
            canvas.x,
            canvas.y,
            settings.tick_hz
        );
        let game = Self {
            sim: Simulation::new(seed, settings),
            screens: ScreenMachine::new(),
            layout: Layout::new(canvas),
            input,
            canvas,
            tick_dt: settings.tick_dt(),
            max_catch_up_ticks: settings.max_catch_up_ticks,
            accumulator: 0.0,
            last_time: None,
            frames: 0,
        };
        (game, tx)
    }

    pub fn screen(&self) -> Screen {
        self.screens.screen()
    }

    pub fn sim(&self) -> &Simulation {
        &self.sim
    }

    pub fn canvas(&self) -> Vec2 {
        self.canvas
    }

    pub fn pointer(&self) -> Option<Vec2> {
        self.input.pointer()
    }

    /// Frames rendered by `run`
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True once the platform side has dropped every sender
    pub fn input_closed(&self) -> bool {
        self.input.is_disconnected()
    }

    /// Canvas size changed (window resize)
    pub fn resize(&mut self, canvas: Vec2) {
        if canvas == self.canvas {
            return;
        }
        log::info!("Canvas resized to {}x{}", canvas.x, canvas.y);
        self.canvas = canvas;
        self.layout = Layout::new(canvas);
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot::capture(self.screen(), self.canvas, self.input.pointer(), &self.sim)
    }

    /// Everything except rendering for one loop iteration, `dt` seconds
    /// after the previous one
    pub fn frame(&mut self, dt: f64) -> FrameStats {
        let mut stats = FrameStats::default();

        let input = self.input.drain();
        for click in input.clicks {
            if let Some(button) = self.screens.handle_click(click, &self.layout, &mut self.sim) {
                log::debug!("Clicked {} on {}", button.label(), self.screen().as_str());
                stats.clicks_handled += 1;
            }
        }

        if dt.is_finite() && dt > 0.0 {
            self.accumulator += dt;
        }

        while self.accumulator >= self.tick_dt && stats.ticks < self.max_catch_up_ticks {
            self.step();
            self.accumulator -= self.tick_dt;
            stats.ticks += 1;
        }

        // Too far behind: forget the rest rather than spiral
        if self.accumulator >= self.tick_dt {
            let backlog = (self.accumulator / self.tick_dt).floor();
            self.accumulator -= backlog * self.tick_dt;
            stats.dropped_ticks = backlog as u32;
            log::warn!(
                "Loop fell behind, dropped {} ticks after running {}",
                stats.dropped_ticks,
                stats.ticks
            );
        }

        stats
    }

    /// Run a single fixed tick
    pub fn step(&mut self) {
        match self.screens.screen() {
            Screen::Play => {
                let steer = self.input.pointer().and_then(|p| {
                    steer_direction(p, self.canvas, self.sim.settings.steer_deadzone)
                });
                let outcome = tick(&mut self.sim, &TickInput { steer });
                self.screens.handle_outcome(outcome);
            }
            Screen::Menu | Screen::Shop | Screen::Help | Screen::Win | Screen::Lose => {
                self.sim.advance_rainbow();
            }
        }
    }

    /// Drive the loop until `keep_running` returns false.
    ///
    /// Renders once per iteration, without sleeping between iterations, and
    /// returns the number of iterations. Render failures are logged and the
    /// loop carries on.
    pub fn run<C: Clock, R: Renderer>(
        &mut self,
        clock: &mut C,
        renderer: &mut R,
        mut keep_running: impl FnMut(&Game) -> bool,
    ) -> u64 {
        let mut iterations = 0;
        while keep_running(self) {
            let now = clock.now();
            let dt = match self.last_time.replace(now) {
                Some(prev) => now.saturating_sub(prev).as_secs_f64(),
                None => 0.0,
            };

            let stats = self.frame(dt);
            log::trace!("Frame {}: {:?}", self.frames, stats);

            match renderer.render(&self.snapshot()) {
                Ok(()) => {}
                Err(RenderError::SurfaceLost) => {
                    log::warn!("Render surface lost, skipping frame");
                }
                Err(e) => {
                    log::error!("Render error: {}", e);
                }
            }
            self.frames += 1;
            iterations += 1;
        }
        iterations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, CANVAS_WIDTH, DESTINATIONS, RAINBOW_STEP};
    use crate::sim::Enemy;

    const DT: f64 = 1.0 / 60.0;
    const PLAY_BUTTON: Vec2 = Vec2::new(320.0, 160.0);

    /// Clock that moves `step` every time it is read
    #[derive(Default)]
    struct ManualClock {
        now: Duration,
        step: Duration,
    }

    impl ManualClock {
        fn stepping(step: Duration) -> Self {
            Self {
                now: Duration::ZERO,
                step,
            }
        }
    }

    impl Clock for ManualClock {
        fn now(&mut self) -> Duration {
            let now = self.now;
            self.now += self.step;
            now
        }
    }

    #[derive(Default)]
    struct CountingRenderer {
        frames: Vec<Screen>,
        fail: bool,
    }

    impl Renderer for CountingRenderer {
        fn render(&mut self, frame: &FrameSnapshot) -> Result<(), RenderError> {
            self.frames.push(frame.screen);
            if self.fail {
                return Err(RenderError::Backend("test".into()));
            }
            Ok(())
        }
    }

    fn quiet_settings() -> Settings {
        Settings {
            initial_enemies: 0,
            ..Settings::default()
        }
    }

    fn new_game(settings: Settings) -> (Game, InputSender) {
        Game::new(42, settings, Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT))
    }

    #[test]
    fn test_starts_on_menu_idle() {
        let (game, _tx) = new_game(Settings::default());
        assert_eq!(game.screen(), Screen::Menu);
        assert!(game.sim().enemies.is_empty());
        assert_eq!(game.pointer(), None);
    }

    #[test]
    fn test_menu_ticks_only_advance_rainbow() {
        let (mut game, _tx) = new_game(Settings::default());
        let mut ticks = 0;
        for _ in 0..60 {
            ticks += game.frame(DT).ticks;
        }
        assert_eq!(ticks, 60);
        assert_eq!(game.sim().timer.ticks, 0);
        let hue = game.sim().color.rainbow_hue;
        assert!((hue - 60.0 * RAINBOW_STEP).abs() < 1e-4, "hue {hue}");
    }

    #[test]
    fn test_partial_ticks_accumulate() {
        let (mut game, _tx) = new_game(Settings::default());
        assert_eq!(game.frame(DT / 2.0).ticks, 0);
        assert_eq!(game.frame(DT * 0.75).ticks, 1);
        assert!(game.accumulator < DT);
    }

    #[test]
    fn test_catch_up_cap_drops_backlog() {
        let (mut game, _tx) = new_game(Settings::default());
        let stats = game.frame(2.0);
        assert_eq!(stats.ticks, 30);
        assert!((89..=90).contains(&stats.dropped_ticks), "{stats:?}");
        assert!(game.accumulator < DT);

        // Next frame is back to normal
        let stats = game.frame(DT);
        assert!(stats.ticks <= 2);
        assert_eq!(stats.dropped_ticks, 0);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let (mut game, _tx) = new_game(Settings::default());
        assert_eq!(game.frame(-1.0).ticks, 0);
        assert_eq!(game.frame(f64::NAN).ticks, 0);
        assert_eq!(game.frame(f64::INFINITY).ticks, 0);
        assert_eq!(game.accumulator, 0.0);
    }

    #[test]
    fn test_click_starts_run() {
        let (mut game, tx) = new_game(Settings::default());
        tx.click_released(PLAY_BUTTON).unwrap();
        let stats = game.frame(0.0);
        assert_eq!(stats.clicks_handled, 1);
        assert_eq!(game.screen(), Screen::Play);
        assert_eq!(game.sim().enemies.len(), 3);

        // Clicks on the play screen do nothing
        tx.click_released(PLAY_BUTTON).unwrap();
        assert_eq!(game.frame(0.0).clicks_handled, 0);
        assert_eq!(game.screen(), Screen::Play);
    }

    #[test]
    fn test_play_ticks_advance_timer() {
        let (mut game, tx) = new_game(quiet_settings());
        tx.click_released(PLAY_BUTTON).unwrap();
        game.frame(0.0);
        for _ in 0..60 {
            game.frame(DT);
        }
        assert_eq!(game.sim().timer.ticks, 60);
        assert_eq!(game.sim().timer.seconds(), 1);
    }

    #[test]
    fn test_pointer_steers_player() {
        let (mut game, tx) = new_game(quiet_settings());
        // The play click leaves the pointer above center, then move it right
        tx.click_released(PLAY_BUTTON).unwrap();
        tx.pointer_moved(Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT / 2.0)).unwrap();
        game.frame(DT);

        let step = game.sim().settings.player_step;
        assert!((game.sim().player - Vec2::new(step, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_caught_goes_to_lose() {
        let (mut game, tx) = new_game(quiet_settings());
        tx.click_released(PLAY_BUTTON).unwrap();
        game.frame(0.0);

        let speed = game.sim.settings.enemy_speed;
        game.sim.enemies.push(Enemy::new(Vec2::new(0.5, 0.0), speed));
        game.frame(DT);
        assert_eq!(game.screen(), Screen::Lose);
        assert_eq!(game.sim().timer.ticks, 0);

        // Further ticks leave the lost run alone
        let enemy = game.sim().enemies[0].pos;
        game.frame(DT * 10.0);
        assert_eq!(game.sim().enemies[0].pos, enemy);
    }

    #[test]
    fn test_last_visit_goes_to_win() {
        let (mut game, tx) = new_game(quiet_settings());
        tx.click_released(PLAY_BUTTON).unwrap();
        game.frame(0.0);

        for dest in game.sim.destinations.iter_mut().take(DESTINATIONS.len() - 1) {
            dest.visited = true;
        }
        let (x, y) = DESTINATIONS[DESTINATIONS.len() - 1];
        game.sim.player = Vec2::new(x, y);
        game.frame(DT);
        assert_eq!(game.screen(), Screen::Win);
        assert_eq!(game.sim().remaining(), 0);

        // The finished run stays frozen: no spawns, no movement, no timer
        let enemies = game.sim().enemies.clone();
        let destinations = game.sim().destinations.clone();
        let timer = game.sim().timer;
        for _ in 0..30 {
            game.frame(DT);
        }
        assert_eq!(game.screen(), Screen::Win);
        assert_eq!(game.sim().enemies, enemies);
        assert_eq!(game.sim().destinations, destinations);
        assert!(game.sim().destinations.iter().all(|d| d.visited));
        assert_eq!(game.sim().timer, timer);
    }

    #[test]
    fn test_resize_rebuilds_layout() {
        let (mut game, tx) = new_game(Settings::default());
        game.resize(Vec2::new(1280.0, 960.0));
        // Old play button position now misses; the scaled one hits
        tx.click_released(PLAY_BUTTON).unwrap();
        game.frame(0.0);
        assert_eq!(game.screen(), Screen::Menu);
        tx.click_released(PLAY_BUTTON * 2.0).unwrap();
        game.frame(0.0);
        assert_eq!(game.screen(), Screen::Play);
    }

    #[test]
    fn test_run_renders_once_per_iteration() {
        let (mut game, tx) = new_game(quiet_settings());
        tx.click_released(PLAY_BUTTON).unwrap();

        // A quarter tick (rounded up) between iterations
        let mut clock = ManualClock::stepping(Duration::from_nanos(4_166_667));
        let mut renderer = CountingRenderer::default();
        let iterations = game.run(&mut clock, &mut renderer, |g| g.frames() < 241);

        assert_eq!(iterations, 241);
        assert_eq!(renderer.frames.len(), 241);
        assert!(renderer.frames.iter().all(|s| *s == Screen::Play));
        // One simulated second: 60 ticks, four renders for each
        assert_eq!(game.sim().timer.ticks, 60);
    }

    #[test]
    fn test_rendering_is_not_paced_by_ticks() {
        let (mut game, _tx) = new_game(Settings::default());
        let mut clock = ManualClock::default();
        let mut renderer = CountingRenderer::default();
        let iterations = game.run(&mut clock, &mut renderer, |g| g.frames() < 100);

        // The loop never sleeps, so a frozen clock still gets every render
        assert_eq!(iterations, 100);
        assert_eq!(renderer.frames.len(), 100);
        assert_eq!(clock.now, Duration::ZERO);
        assert_eq!(game.sim().color.rainbow_hue, 0.0);
    }

    #[test]
    fn test_render_errors_do_not_stop_loop() {
        let (mut game, _tx) = new_game(Settings::default());
        let mut clock = ManualClock::default();
        let mut renderer = CountingRenderer {
            fail: true,
            ..Default::default()
        };
        let iterations = game.run(&mut clock, &mut renderer, |g| g.frames() < 5);
        assert_eq!(iterations, 5);
        assert_eq!(renderer.frames.len(), 5);
    }

    #[test]
    fn test_input_closed_after_sender_dropped() {
        let (mut game, tx) = new_game(Settings::default());
        drop(tx);
        assert!(!game.input_closed());
        game.frame(0.0);
        assert!(game.input_closed());
    }
}
