//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const CONFIG_FILE: &str = "config.ron";

/// Top-level viewer configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Movement and look tuning for both control schemes.
    pub controls: ControlsConfig,
    /// Waypoint and placement geometry.
    pub layout: LayoutConfig,
    /// Picking settings.
    pub interaction: InteractionConfig,
    /// View camera.
    pub camera: CameraConfig,
    /// Which scheme and which gallery to run.
    pub session: SessionConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// How the visitor moves.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ControlScheme {
    /// Keyboard movement with captured-pointer look.
    #[default]
    Continuous,
    /// Touch joystick, swipe look and the waypoint tour.
    Guided,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ControlsConfig {
    pub continuous: ContinuousControls,
    pub guided: GuidedControls,
}

/// Keyboard/pointer scheme tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContinuousControls {
    /// World units per second.
    pub move_speed: f32,
    /// Radians per pixel of pointer motion.
    pub look_speed: f32,
}

/// Touch scheme tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuidedControls {
    /// Joystick speed in world units per second.
    pub move_speed: f32,
    /// Radians per pixel of swipe.
    pub look_speed: f32,
    /// Waypoint traversal speed in world units per second.
    pub auto_walk_speed: f32,
    /// Radians of yaw per pixel of rotation-wheel drag.
    pub rotation_speed: f32,
    /// Joystick magnitude ignored as noise.
    pub joystick_deadzone: f32,
    /// Joystick widget radius in pixels.
    pub joystick_radius: f32,
    /// Swipe distance in pixels that counts as manual input.
    pub swipe_threshold: f32,
    /// Distance at which traversal snaps to its waypoint.
    pub arrival_threshold: f32,
    /// Seconds spent at a waypoint during auto-walk.
    pub dwell_seconds: f32,
    /// Orientation blend rate per second.
    pub orientation_blend_rate: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Distance between a waypoint and its wall.
    pub view_distance: f32,
    /// Camera height at waypoints.
    pub eye_height: f32,
    /// Distance items are pulled off the wall plane.
    pub wall_inset: f32,
    /// Gap kept between the camera and the walls.
    pub bounds_margin: f32,
    /// Item skipped by the guided tour (the cover piece).
    pub cover_item: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
    /// Aimed hover is suppressed beyond this distance.
    pub max_hover_distance: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Viewport width in pixels.
    pub viewport_width: u32,
    /// Viewport height in pixels.
    pub viewport_height: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    pub scheme: ControlScheme,
    /// Gallery description (JSON). `None` uses the bundled demo gallery.
    pub gallery: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for ContinuousControls {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            look_speed: 0.002,
        }
    }
}

impl Default for GuidedControls {
    fn default() -> Self {
        Self {
            move_speed: 3.5,
            look_speed: 0.003,
            auto_walk_speed: 1.5,
            rotation_speed: 0.012,
            joystick_deadzone: 0.05,
            joystick_radius: 50.0,
            swipe_threshold: 2.0,
            arrival_threshold: 0.1,
            dwell_seconds: 3.0,
            orientation_blend_rate: 3.0,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            view_distance: 2.5,
            eye_height: 1.6,
            wall_inset: 0.05,
            bounds_margin: 0.5,
            cover_item: Some("photo-cover".to_string()),
        }
    }
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            max_hover_distance: 5.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_degrees: 70.0,
            viewport_width: 1280,
            viewport_height: 720,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl CameraConfig {
    /// Width over height; 1 for a degenerate viewport.
    #[must_use]
    pub fn aspect(&self) -> f32 {
        if self.viewport_height == 0 {
            return 1.0;
        }
        self.viewport_width as f32 / self.viewport_height as f32
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first
    /// if the file does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            return Ok(config);
        }
        let config = Self::read(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Write `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_error = |source| ConfigError::WriteError {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_error)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;
        std::fs::write(&path, serialized).map_err(write_error)
    }

    /// Re-read the file. `Some` only when its contents differ from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = Self::read(&config_dir.join(CONFIG_FILE))?;
        if &fresh == self {
            return Ok(None);
        }
        log::info!("Config reloaded with changes");
        Ok(Some(fresh))
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })
    }
}
