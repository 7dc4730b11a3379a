//! Curve Runner entry point
//!
//! Headless host: drives the session with the autopilot and logs what a
//! render backend would draw.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use curve_runner::assets::Assets;
use curve_runner::renderer::{FrameData, FrameSink};
use curve_runner::settings::Settings;
use curve_runner::sim::autopilot;
use curve_runner::Session;

/// Frame sink that reports the HUD through the log
struct LogSink {
    interval: u64,
    frames: u64,
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &FrameData, assets: &Assets) {
        self.frames += 1;
        if self.interval == 0 || self.frames % self.interval != 0 {
            return;
        }
        let car = assets.car();
        log::debug!(
            "frame {}: {} road vertices, {} barrier vertices, {} obstacles, car {:?}",
            self.frames,
            frame.road.vertices.len(),
            frame.barriers.len(),
            frame.obstacles.len(),
            frame.car_color(car)
        );
        log::info!("{}", frame.hud.lines().join(" | "));
    }
}

fn main() {
    env_logger::init();
    log::info!("Curve Runner (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&PathBuf::from(path)),
        None => Settings::default(),
    };
    let assets = Assets::load(&settings);

    let delay = Duration::from_millis(settings.frame_delay_ms);
    let max_ticks = settings.demo_max_ticks;
    let runs = settings.demo_runs;

    let mut sink = LogSink {
        interval: settings.hud_log_interval,
        frames: 0,
    };
    let mut session = Session::new(settings, assets);

    for _ in 0..max_ticks {
        let input = autopilot::steer(&session.state);
        let frame = session.frame(&input);
        sink.present(&frame, &session.assets);

        if session.last_outcome().game_over {
            log::info!("Run {} over", session.runs_finished());
            if session.runs_finished() >= runs {
                break;
            }
        }
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }

    let summary = session.summary();
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {e}"),
    }
}
