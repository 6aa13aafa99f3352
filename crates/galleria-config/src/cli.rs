//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, ControlScheme};

/// Gallery viewer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "galleria", about = "Virtual gallery navigation session")]
pub struct CliArgs {
    /// Control scheme.
    #[arg(long, value_enum)]
    pub scheme: Option<ControlScheme>,

    /// Gallery description (JSON).
    #[arg(long)]
    pub gallery: Option<PathBuf>,

    /// Number of frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(scheme) = args.scheme {
            self.session.scheme = scheme;
        }
        if let Some(ref gallery) = args.gallery {
            self.session.gallery = Some(gallery.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
