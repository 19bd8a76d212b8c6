//! Configuration management for depthviz.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::colormaps::DEFAULT_RESOLUTION;
use crate::colorize::MaxValue;
use crate::error::{DepthvizError, Result};

/// Command-line arguments for depthviz
#[derive(Parser, Debug)]
#[command(name = "depthviz")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to JSON configuration file
    #[arg(short, long, global = true, env = "DEPTHVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "DEPTHVIZ_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Number of samples in the built-in colormaps
    #[arg(long, global = true, env = "DEPTHVIZ_RESOLUTION")]
    pub resolution: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Colorize an array file and write it as a PNG
    Render {
        /// JSON array file with shape HxW, 1xHxW or 3xHxW
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Colormap for single-channel input
        #[arg(long)]
        colormap: Option<String>,

        /// Normalization maximum, or "auto" for the array maximum
        #[arg(long)]
        max_value: Option<MaxValue>,

        /// Also write the 3xHxW float image as a JSON array file
        #[arg(long)]
        dump: Option<PathBuf>,
    },

    /// Print the output folder for a set of hyperparameters
    SavePath {
        /// JSON file with the run's hyperparameters
        args: PathBuf,

        /// JSON file with the default hyperparameters
        #[arg(long)]
        defaults: Option<PathBuf>,
    },

    /// List the registered colormaps
    Colormaps,
}

/// Colormap configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColormapConfig {
    /// Number of samples in the built-in colormaps
    #[serde(default = "default_resolution")]
    pub resolution: usize,

    /// Colormap used when none is requested
    #[serde(default = "default_colormap")]
    pub default_colormap: String,

    /// Normalization maximum used when none is requested (None = auto)
    #[serde(default = "default_max_value")]
    pub default_max_value: Option<f32>,
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Colormap configuration
    #[serde(default)]
    pub colormaps: ColormapConfig,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<(Self, Command)> {
        let args = Args::parse();
        let config = Self::from_args(&args)?;
        Ok((config, args.command))
    }

    /// Build the configuration from already parsed arguments
    pub fn from_args(args: &Args) -> Result<Self> {
        let mut config = Config::default();

        if let Some(config_path) = &args.config {
            let json_config = Self::load_from_file(config_path)?;
            config.merge(json_config);
        }

        if let Some(log_level) = &args.log_level {
            config.log_level = log_level.clone();
        }
        if let Some(resolution) = args.resolution {
            config.colormaps.resolution = resolution;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        self.colormaps = other.colormaps;
        self.log_level = other.log_level;
    }

    /// Normalization maximum to use when the caller gives none
    pub fn default_max_value(&self) -> MaxValue {
        match self.colormaps.default_max_value {
            Some(value) => MaxValue::Fixed(value),
            None => MaxValue::Auto,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.colormaps.resolution < 2 {
            return Err(DepthvizError::Config {
                message: format!(
                    "Colormap resolution must be at least 2, got {}",
                    self.colormaps.resolution
                ),
            });
        }

        if self.colormaps.default_colormap.is_empty() {
            return Err(DepthvizError::Config {
                message: "Default colormap cannot be empty".to_string(),
            });
        }

        if let Some(value) = self.colormaps.default_max_value {
            if value == 0.0 || !value.is_finite() {
                return Err(DepthvizError::Config {
                    message: format!("Default max value must be finite and non-zero, got {}", value),
                });
            }
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(DepthvizError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colormaps: ColormapConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ColormapConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            default_colormap: default_colormap(),
            default_max_value: default_max_value(),
        }
    }
}

// Default value functions for serde
fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_colormap() -> String {
    "rainbow".to_string()
}

fn default_max_value() -> Option<f32> {
    Some(crate::colorize::DEFAULT_MAX_VALUE)
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.colormaps.resolution, 1000);
        assert_eq!(config.colormaps.default_colormap, "rainbow");
        assert_eq!(config.default_max_value(), MaxValue::Fixed(255.0));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_config_merge() {
        let mut config1 = Config::default();
        let mut config2 = Config::default();

        config2.colormaps.resolution = 256;
        config2.colormaps.default_max_value = None;

        config1.merge(config2);

        assert_eq!(config1.colormaps.resolution, 256);
        assert_eq!(config1.default_max_value(), MaxValue::Auto);
    }

    #[test]
    fn test_partial_json_config() {
        let config: Config =
            serde_json::from_str(r#"{"colormaps": {"default_colormap": "magma"}}"#).unwrap();
        assert_eq!(config.colormaps.default_colormap, "magma");
        assert_eq!(config.colormaps.resolution, 1000);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_args_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("depthviz.json");
        std::fs::write(&path, r#"{"colormaps": {"resolution": 64}, "log_level": "warn"}"#)
            .unwrap();

        let args = Args::parse_from([
            "depthviz",
            "--config",
            path.to_str().unwrap(),
            "--log-level",
            "debug",
            "colormaps",
        ]);
        let config = Config::from_args(&args).unwrap();

        assert_eq!(config.colormaps.resolution, 64);
        assert_eq!(config.log_level, "debug");
        assert!(matches!(args.command, Command::Colormaps));
    }

    #[test]
    fn test_render_args() {
        let args = Args::parse_from([
            "depthviz",
            "render",
            "depth.json",
            "--output",
            "depth.png",
            "--max-value",
            "auto",
        ]);
        match args.command {
            Command::Render {
                input,
                max_value,
                colormap,
                ..
            } => {
                assert_eq!(input, PathBuf::from("depth.json"));
                assert_eq!(max_value, Some(MaxValue::Auto));
                assert!(colormap.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());

        let mut config = Config::default();
        config.colormaps.resolution = 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.colormaps.default_colormap = "".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.colormaps.default_max_value = Some(0.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }
}
