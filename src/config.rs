use crate::physics::boundary::BoundaryMode;
use crate::physics::math::Scalar;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Prefix for environment overrides, e.g. `FIELDDRIFT__PHYSICS__CHARGE=2`
pub const ENV_PREFIX: &str = "FIELDDRIFT";

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// A scale used as a divisor is zero
    ZeroScale(&'static str),
    /// The energy history must hold at least one sample
    ZeroHistoryCapacity,
    /// A value is NaN or infinite
    NonFinite(&'static str),
    /// A value that must be strictly positive is not
    NonPositive(&'static str),
    /// The tick rate does not give a representable, non-zero timestep
    TickRateOutOfRange(f64),
    /// The configuration file could not be read or parsed
    Load(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroScale(name) => write!(f, "{name} must not be zero"),
            ConfigError::ZeroHistoryCapacity => {
                write!(f, "history.capacity must be greater than zero")
            }
            ConfigError::NonFinite(name) => write!(f, "{name} must be finite"),
            ConfigError::NonPositive(name) => write!(f, "{name} must be greater than zero"),
            ConfigError::TickRateOutOfRange(hz) => {
                write!(f, "runner.tick_rate_hz {hz} does not give a usable timestep")
            }
            ConfigError::Load(msg) => write!(f, "Failed to load configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<::config::ConfigError> for ConfigError {
    fn from(e: ::config::ConfigError) -> Self {
        ConfigError::Load(e.to_string())
    }
}

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub field: FieldConfig,
    pub history: HistoryConfig,
    pub runner: RunnerConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    pub charge: Scalar,
    pub coupling_constant: Scalar,
    pub world_width: Scalar,
    pub world_height: Scalar,
    pub start_x: Scalar,
    pub start_y: Scalar,
    pub boundary: BoundaryMode,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            charge: 1.0,
            coupling_constant: 0.1,
            world_width: 800.0,
            world_height: 600.0,
            start_x: 400.0,
            start_y: 300.0,
            boundary: BoundaryMode::Reflect,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct FieldConfig {
    pub spatial_scale: Scalar,
    pub temporal_scale: Scalar,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            spatial_scale: 50.0,
            temporal_scale: 50.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Number of samples kept for the energy plot (one per plotted pixel)
    pub capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        // Plot spans the window width minus a 20 px margin
        Self { capacity: 780 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct RunnerConfig {
    pub tick_rate_hz: f64,
    /// Stop after this many ticks; run until stopped externally when unset
    pub max_ticks: Option<u64>,
    pub exit_on_stop: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60.0,
            max_ticks: None,
            exit_on_stop: true,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    pub fn load_or_default(path: &str) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse config file {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(_) => {
                info!("Config file {} not found. Using defaults.", path);
                Self::default()
            }
        }
    }

    /// Location of the per-user configuration file, if the platform has one
    pub fn user_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "fielddrift")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Layer defaults, the configuration file at `path` and environment overrides
    ///
    /// A given `path` must exist.
    pub fn load_layered(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder =
            ::config::Config::builder().add_source(::config::Config::try_from(&Self::default())?);

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path.to_path_buf())
                    .format(::config::FileFormat::Toml)
                    .required(true),
            );
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        Ok(builder.build()?.try_deserialize()?)
    }

    /// Load the per-user configuration, falling back to defaults on any error
    pub fn load_from_user_config() -> Self {
        let path = Self::user_config_path().filter(|path| path.exists());
        match Self::load_layered(path.as_deref()) {
            Ok(config) => config,
            Err(e) => {
                warn!("{}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject constants that would make the simulation produce NaN or infinity
    pub fn validate(&self) -> Result<(), ConfigError> {
        let physics = &self.physics;

        finite("physics.charge", physics.charge)?;
        finite("physics.coupling_constant", physics.coupling_constant)?;
        positive("physics.world_width", physics.world_width)?;
        positive("physics.world_height", physics.world_height)?;
        finite("physics.start_x", physics.start_x)?;
        finite("physics.start_y", physics.start_y)?;

        non_zero("field.spatial_scale", self.field.spatial_scale)?;
        non_zero("field.temporal_scale", self.field.temporal_scale)?;

        if self.history.capacity == 0 {
            return Err(ConfigError::ZeroHistoryCapacity);
        }

        positive("runner.tick_rate_hz", self.runner.tick_rate_hz)?;
        self.runner.timestep()?;

        Ok(())
    }
}

impl RunnerConfig {
    /// Fixed timestep for the configured tick rate
    pub fn timestep(&self) -> Result<Duration, ConfigError> {
        match Duration::try_from_secs_f64(1.0 / self.tick_rate_hz) {
            Ok(timestep) if !timestep.is_zero() => Ok(timestep),
            _ => Err(ConfigError::TickRateOutOfRange(self.tick_rate_hz)),
        }
    }
}

fn finite(name: &'static str, value: Scalar) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

fn positive(name: &'static str, value: Scalar) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive(name))
    }
}

fn non_zero(name: &'static str, value: Scalar) -> Result<(), ConfigError> {
    finite(name, value)?;
    if value != 0.0 {
        Ok(())
    } else {
        Err(ConfigError::ZeroScale(name))
    }
}
