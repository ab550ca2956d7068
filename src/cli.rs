//! Command line interface for Fielddrift

use clap::Parser;
use std::fmt;
use std::path::Path;

use crate::config::{ConfigError, SimulationConfig};
use crate::physics::boundary::BoundaryMode;

/// CLI-specific errors
#[derive(Debug)]
pub enum CliError {
    /// Configuration file could not be loaded
    ConfigLoad(String),
    /// Configuration loaded but holds unusable constants
    InvalidConfig(ConfigError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::ConfigLoad(msg) => write!(f, "Failed to load configuration: {msg}"),
            CliError::InvalidConfig(e) => write!(f, "Invalid configuration: {e}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::InvalidConfig(e) => Some(e),
            CliError::ConfigLoad(_) => None,
        }
    }
}

/// Fielddrift - a charged particle in a time-varying electric field
#[derive(Parser, Debug, Default)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file (TOML format)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Particle charge (overrides config file)
    #[arg(short = 'q', long, value_name = "VALUE", allow_negative_numbers = true)]
    pub charge: Option<f64>,

    /// Energy history capacity in samples (overrides config file)
    #[arg(long, value_name = "SAMPLES")]
    pub capacity: Option<usize>,

    /// Boundary handling: reflect or clamp_and_reflect
    #[arg(short = 'b', long, value_name = "MODE")]
    pub boundary: Option<BoundaryMode>,

    /// Stop after this many ticks
    #[arg(short = 'n', long, value_name = "TICKS")]
    pub max_ticks: Option<u64>,

    /// Ticks per second
    #[arg(short = 'r', long, value_name = "HZ")]
    pub tick_rate: Option<f64>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// Loads configuration from file or defaults, then applies command-line overrides
pub fn load_and_apply_config(args: &Args) -> Result<SimulationConfig, CliError> {
    let mut config = if let Some(config_path) = &args.config {
        println!("Loading configuration from: {config_path}");
        SimulationConfig::load_layered(Some(Path::new(config_path)))
            .map_err(|e| CliError::ConfigLoad(e.to_string()))?
    } else {
        SimulationConfig::load_from_user_config()
    };

    if let Some(charge) = args.charge {
        println!("Overriding particle charge to: {charge}");
        config.physics.charge = charge;
    }

    if let Some(capacity) = args.capacity {
        println!("Overriding history capacity to: {capacity}");
        config.history.capacity = capacity;
    }

    if let Some(boundary) = args.boundary {
        println!("Using boundary mode: {boundary}");
        config.physics.boundary = boundary;
    }

    if let Some(max_ticks) = args.max_ticks {
        println!("Stopping after {max_ticks} ticks");
        config.runner.max_ticks = Some(max_ticks);
    }

    if let Some(tick_rate) = args.tick_rate {
        println!("Overriding tick rate to: {tick_rate} Hz");
        config.runner.tick_rate_hz = tick_rate;
    }

    config.validate().map_err(CliError::InvalidConfig)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("fielddrift").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_overrides() {
        let args = parse(&["-q", "-2.5", "--capacity", "5", "-b", "clamp", "-n", "8"]);

        assert_eq!(args.charge, Some(-2.5));
        assert_eq!(args.capacity, Some(5));
        assert_eq!(args.boundary, Some(BoundaryMode::ClampAndReflect));
        assert_eq!(args.max_ticks, Some(8));
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_rejects_unknown_boundary() {
        let result =
            Args::try_parse_from(["fielddrift", "--boundary", "wrap"].iter().copied());
        assert!(result.is_err());
    }

    #[test]
    fn test_overrides_apply_to_loaded_config() {
        let path = std::env::temp_dir().join(format!(
            "fielddrift-cli-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[physics]\ncharge = 3.0\n").unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            capacity: Some(12),
            max_ticks: Some(100),
            ..Default::default()
        };
        let config = load_and_apply_config(&args);
        std::fs::remove_file(&path).ok();

        let config = config.unwrap();
        assert_eq!(config.physics.charge, 3.0);
        assert_eq!(config.history.capacity, 12);
        assert_eq!(config.runner.max_ticks, Some(100));
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "fielddrift-cli-invalid-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "").unwrap();

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            capacity: Some(0),
            ..Default::default()
        };
        let result = load_and_apply_config(&args);
        std::fs::remove_file(&path).ok();

        assert!(matches!(
            result,
            Err(CliError::InvalidConfig(ConfigError::ZeroHistoryCapacity))
        ));
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "fielddrift-cli-missing-{}.toml",
            std::process::id()
        ));

        let args = Args {
            config: Some(path.to_string_lossy().into_owned()),
            ..Default::default()
        };

        assert!(matches!(
            load_and_apply_config(&args),
            Err(CliError::ConfigLoad(_))
        ));
    }
}
