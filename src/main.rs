//! VERDANT: a touch-driven puzzle about growing a tiny forest
//!
//! Tap the field to put down growth tiles before the countdown runs out.
//! The interesting machinery is the screen plumbing, not the puzzle:
//! - an event bus with revocable subscriptions (`event`)
//! - a widget tree built from RON documents (`ui`)
//! - per-screen tasks ticked by a container (`task`, `game`)
//! - a persistent play-record store (`records`)
//! - an eased 3D field camera (`game::field_camera`)

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod app;
mod args;
mod config;
mod defer;
mod event;
mod game;
mod input;
mod records;
mod task;
mod ui;

use macroquad::prelude::*;

use app::App;
use config::AppConfig;

const PARAMS: &str = include_str!("../assets/params.ron");

fn window_conf() -> Conf {
    // This runs before main can report a config error properly; fall back
    // to a plain window and let main print what went wrong.
    let (title, width, height) = match AppConfig::parse(PARAMS) {
        Ok(config) => (
            format!("{} v{}", config.window.title, VERSION),
            config.window.width,
            config.window.height,
        ),
        Err(_) => (format!("verdant v{}", VERSION), 960, 640),
    };
    Conf {
        window_title: title,
        window_width: width,
        window_height: height,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = match AppConfig::parse(PARAMS) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("params.ron: {}", e);
            return;
        }
    };

    let mut app = match App::new(config, records::default_path()) {
        Ok(app) => app,
        Err(e) => {
            eprintln!("startup failed: {}", e);
            return;
        }
    };
    app.load_fonts().await;

    loop {
        let current_time = get_time();
        let delta_time = get_frame_time() as f64;

        app.update(current_time, delta_time);

        clear_background(Color::new(0.07, 0.10, 0.08, 1.0));
        app.draw();

        next_frame().await;
    }
}
