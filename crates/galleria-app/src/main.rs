//! Headless gallery session.
//!
//! Loads the configuration and a gallery description, then drives a scripted
//! visit for a fixed number of frames, logging every interaction event.

use std::process::ExitCode;

use clap::Parser;
use glam::Vec2;
use tracing::{error, info, warn};
use winit::event::{ElementState, TouchPhase};
use winit::keyboard::KeyCode;

use galleria_app::GallerySession;
use galleria_app::platform::PlatformDirs;
use galleria_config::{CliArgs, Config, ControlScheme};
use galleria_input::{InputEvent, RawKeyEvent, TouchEvent};
use galleria_scene::GalleryLayout;

/// Simulated frame time.
const FRAME_DT: f32 = 1.0 / 60.0;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let dirs = match &args.config {
        Some(dir) => PlatformDirs::with_config_dir(dir),
        None => match PlatformDirs::resolve() {
            Ok(dirs) => dirs,
            Err(e) => {
                eprintln!("Failed to resolve platform directories: {e}");
                return ExitCode::FAILURE;
            }
        },
    };
    if let Err(e) = dirs.create_dirs() {
        eprintln!("Failed to create platform directories: {e}");
        return ExitCode::FAILURE;
    }

    let mut config = match Config::load_or_create(&dirs.config_dir) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config, using defaults: {e}");
            Config::default()
        }
    };
    config.apply_cli_overrides(&args);

    galleria_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    let layout = match load_layout(&config) {
        Ok(layout) => layout,
        Err(e) => {
            error!(error = %e, "could not load gallery description");
            return ExitCode::FAILURE;
        }
    };
    let mut session = match GallerySession::new(layout, &config) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "could not start session");
            return ExitCode::FAILURE;
        }
    };

    run(&mut session, args.frames);
    ExitCode::SUCCESS
}

fn load_layout(config: &Config) -> Result<GalleryLayout, galleria_scene::LayoutError> {
    match &config.session.gallery {
        Some(path) => GalleryLayout::load(path),
        None => {
            info!("no gallery configured; using the bundled demo");
            GalleryLayout::from_json_str(galleria_app::DEMO_GALLERY)
        }
    }
}

/// Drive a short scripted visit.
fn run(session: &mut GallerySession, frames: u32) {
    if let Err(e) = session.lock() {
        warn!(error = %e, "could not enable controls");
        return;
    }
    let center = session.viewport() * 0.5;
    for frame in 0..frames {
        for event in scripted_input(session.scheme(), frame, center) {
            session.handle_input(event);
        }
        if session.scheme() == ControlScheme::Guided && frame == 1 {
            session.toggle_auto_walk();
        }
        session.frame(FRAME_DT);

        for event in session.drain_events() {
            info!(frame, ?event, "interaction");
        }
        if session.detail_item().is_some() && frame % 120 == 119 {
            if let Err(e) = session.close_detail() {
                warn!(error = %e, "could not re-enable controls");
            }
        }
    }
    let p = session.camera().position;
    info!(frames, x = p.x, z = p.z, "visit finished");
}

/// Input for `frame`: walk and look around on a keyboard, or tap the view
/// center on touch.
fn scripted_input(scheme: ControlScheme, frame: u32, center: Vec2) -> Vec<InputEvent> {
    match scheme {
        ControlScheme::Continuous => {
            let key = |state| InputEvent::Key(RawKeyEvent::code(KeyCode::KeyW, state));
            match frame % 240 {
                0 => vec![key(ElementState::Pressed)],
                60 => vec![key(ElementState::Released)],
                61..=120 => vec![InputEvent::PointerMotion { dx: 8.0, dy: 0.0 }],
                180 => vec![InputEvent::Click {
                    x: center.x,
                    y: center.y,
                }],
                _ => Vec::new(),
            }
        }
        ControlScheme::Guided => match frame % 600 {
            599 => {
                let touch = |phase| {
                    InputEvent::Touch(TouchEvent {
                        id: 1,
                        phase,
                        position: center,
                    })
                };
                vec![touch(TouchPhase::Started), touch(TouchPhase::Ended)]
            }
            _ => Vec::new(),
        },
    }
}
