//! Configuration for the gallery viewer.
//!
//! Settings persist to disk as RON, tolerate missing and unknown fields, and
//! can be overridden from the command line.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    CameraConfig, Config, ContinuousControls, ControlScheme, ControlsConfig, DebugConfig,
    GuidedControls, InteractionConfig, LayoutConfig, SessionConfig,
};
pub use error::ConfigError;
