//! Run Away entry point
//!
//! Native builds run a headless session: a scripted pilot feeds pointer
//! events through the same input channel a window would, the loop runs in
//! real time, and the final frame is printed as JSON.
//!
//! Usage: `run-away [seconds] [seed]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

    use glam::Vec2;
    use run_away::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
    use run_away::projection::Projector;
    use run_away::renderer::SceneRenderer;
    use run_away::ui::{Button, Layout, Screen};
    use run_away::{Game, Settings, SystemClock};

    const DEFAULT_SECONDS: f64 = 60.0;

    env_logger::init();
    log::info!("Run Away (native, headless) starting...");

    let mut args = std::env::args().skip(1);
    let seconds = args
        .next()
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
        .unwrap_or(DEFAULT_SECONDS);
    let seed = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    let settings = Settings::load();
    let canvas = Vec2::new(CANVAS_WIDTH, CANVAS_HEIGHT);
    let (mut game, input) = Game::new(seed, settings, canvas);

    let layout = Layout::new(canvas);
    let projector = Projector::new(canvas, settings.bounds());
    // Limits too large for Instant fall back to the default
    let now = Instant::now();
    let deadline = deadline_after(now, seconds).unwrap_or_else(|| {
        log::warn!("Time limit of {seconds}s is out of range, using {DEFAULT_SECONDS}s");
        now + Duration::from_secs_f64(DEFAULT_SECONDS)
    });
    let mut clicked_play = false;

    // The pilot stands in for the platform: it clicks PLAY once, then keeps
    // the pointer on the nearest unvisited destination
    let pilot = |game: &Game| -> bool {
        if Instant::now() >= deadline {
            log::info!("Time limit of {seconds}s reached");
            return false;
        }
        match game.screen() {
            Screen::Menu if !clicked_play => {
                let Some(play) = layout.region(Screen::Menu, Button::Play) else {
                    log::error!("Menu has no play button");
                    return false;
                };
                clicked_play = input.click_released(play.center()).is_ok();
                clicked_play
            }
            Screen::Play => {
                let sim = game.sim();
                let target = sim
                    .destinations
                    .iter()
                    .filter(|d| !d.visited)
                    .min_by(|a, b| {
                        a.pos.distance(sim.player).total_cmp(&b.pos.distance(sim.player))
                    });
                if let Some(dest) = target {
                    let pointer = projector.world_to_screen(dest.pos, sim.player);
                    if let Err(e) = input.pointer_moved(pointer) {
                        log::error!("Pilot lost the game loop: {e}");
                        return false;
                    }
                }
                true
            }
            Screen::Win | Screen::Lose => false,
            Screen::Menu | Screen::Shop | Screen::Help => true,
        }
    };

    let mut clock = SystemClock::new();
    let mut renderer = SceneRenderer::new();
    let frames = game.run(&mut clock, &mut renderer, pilot);

    let snapshot = game.snapshot();
    log::info!(
        "Finished on {} after {} frames: {} destinations left, time {}, {} triangles in last frame",
        snapshot.screen.as_str(),
        frames,
        snapshot.destinations_left(),
        snapshot.timer,
        renderer.last_frame().triangle_count()
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {e}"),
    }
}

/// `now + seconds`, or None when that is not a representable instant
#[cfg(not(target_arch = "wasm32"))]
fn deadline_after(now: std::time::Instant, seconds: f64) -> Option<std::time::Instant> {
    std::time::Duration::try_from_secs_f64(seconds)
        .ok()
        .and_then(|limit| now.checked_add(limit))
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Browser builds embed the library; there is no binary entry point
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_deadline_after() {
        let now = Instant::now();
        assert_eq!(deadline_after(now, 2.5), Some(now + Duration::from_millis(2500)));

        // Too large for Duration or Instant
        assert_eq!(deadline_after(now, 1e20), None);
        assert_eq!(deadline_after(now, f64::MAX), None);
        assert_eq!(deadline_after(now, -1.0), None);
    }
}
