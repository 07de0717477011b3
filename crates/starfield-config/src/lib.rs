//! Configuration for the starfield terminal app.
//!
//! The config file is TOML with three optional sections:
//!
//! ```toml
//! [starfield]
//! pulse_speed = 0.02
//! hue_base = 220
//!
//! [display]
//! fps = 60
//! pixel_scale = 4
//!
//! [logging]
//! level = "debug"
//! ```
//!
//! A missing file yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Result, WrapErr, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use starfield_core::StarfieldConfig;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "STARFIELD_CONFIG";

const CONFIG_FILE_NAME: &str = "config.toml";
const LOG_FILE_NAME: &str = "starfield.log";

/// Highest frame rate accepted from the config file.
pub const MAX_FPS: u32 = 240;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Particle field tunables.
    pub starfield: StarfieldConfig,
    /// Terminal presentation settings.
    pub display: DisplayConfig,
    /// Log output settings.
    pub logging: LoggingConfig,
}

/// Terminal presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Target frames per second.
    pub fps: u32,
    /// Device pixels per raster pixel along each axis.
    ///
    /// A terminal cell shows two raster pixels stacked vertically, so a
    /// `cols x rows` terminal hosts a viewport of
    /// `cols * pixel_scale` by `rows * 2 * pixel_scale` device pixels.
    pub pixel_scale: u32,
    /// Show the key help line at the bottom of the screen.
    pub show_help: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            fps: 60,
            pixel_scale: 4,
            show_help: true,
        }
    }
}

/// Log output settings. Logging is off unless a level is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `"debug"` or `"starfield_background=trace"`.
    pub level: Option<String>,
    /// Log file path. Defaults to `starfield.log` in the data directory.
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    /// Resolved log file path, if one can be determined.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME)))
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "starfield")
}

impl Config {
    /// Location of the config file: `$STARFIELD_CONFIG` if set, otherwise
    /// `config.toml` in the platform config directory.
    pub fn path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load the config from its default location, falling back to defaults
    /// when no file exists.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load and validate the config at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&contents)
            .wrap_err_with(|| format!("invalid config file {}", path.display()))
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).wrap_err("failed to parse config")?;
        config.validate()?;
        Ok(config)
    }

    /// Write the config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let contents = toml::to_string_pretty(self).wrap_err("failed to serialize config")?;
        fs::write(path, contents)
            .wrap_err_with(|| format!("failed to write config file {}", path.display()))
    }

    /// Reject values the engine or the terminal host cannot work with.
    pub fn validate(&self) -> Result<()> {
        let star = &self.starfield;
        for (name, value) in [
            ("pulse_speed", star.pulse_speed),
            ("max_radius", star.max_radius),
            ("max_drift_speed", star.max_drift_speed),
            ("hue_spread", star.hue_spread),
            ("trail_length_min", star.trail_length_min),
            ("trail_length_max", star.trail_length_max),
        ] {
            ensure!(
                value.is_finite() && value >= 0.0,
                "starfield.{name} must be a non-negative number, got {value}"
            );
        }
        ensure!(star.hue_base.is_finite(), "starfield.hue_base must be finite");
        ensure!(
            star.pixels_per_star > 0,
            "starfield.pixels_per_star must be greater than zero"
        );
        ensure!(
            (0.0..=1.0).contains(&star.trail_probability),
            "starfield.trail_probability must be between 0 and 1, got {}",
            star.trail_probability
        );
        ensure!(
            star.trail_length_min <= star.trail_length_max,
            "starfield.trail_length_min ({}) exceeds trail_length_max ({})",
            star.trail_length_min,
            star.trail_length_max
        );
        for (name, value) in [("saturation", star.saturation), ("lightness", star.lightness)] {
            ensure!(
                (0.0..=100.0).contains(&value),
                "starfield.{name} must be a percentage, got {value}"
            );
        }
        ensure!(
            (1..=MAX_FPS).contains(&self.display.fps),
            "display.fps must be between 1 and {MAX_FPS}, got {}",
            self.display.fps
        );
        ensure!(
            self.display.pixel_scale > 0,
            "display.pixel_scale must be greater than zero"
        );
        Ok(())
    }
}
