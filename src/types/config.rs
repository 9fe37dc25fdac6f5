//! Configuration structures for the crowd control system
//!
//! This module contains the facility configuration structure and validation
//! logic controlling routing constants, background loop cadence, and the
//! crowd flow simulator.

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Named defaults for the routing and monitoring constants
///
/// These are the tuning knobs of the system; every one of them can be
/// overridden through [`FacilityConfig`].
pub mod defaults {
    /// Congestion level above which a zone counts as critical (strict >)
    pub const CRITICAL_CONGESTION_THRESHOLD: f64 = 80.0;

    /// Hop radius searched for redistribution targets
    pub const REDISTRIBUTION_SEARCH_RADIUS: usize = 3;

    /// Estimated evacuation minutes per traversed edge
    pub const EVACUATION_MINUTES_PER_HOP: u32 = 2;

    /// Monitoring loop tick interval in milliseconds
    pub const MONITORING_INTERVAL_MS: u64 = 5_000;

    /// Crowd flow simulation tick interval in milliseconds
    pub const SIMULATION_INTERVAL_MS: u64 = 1_000;

    /// Total crowd flow simulation duration in milliseconds
    pub const SIMULATION_DURATION_MS: u64 = 60_000;

    /// Largest per-tick occupancy perturbation (applied as +/- delta)
    pub const MAX_FLOW_DELTA: i64 = 10;
}

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "facility-crowd-control",
    version = "0.1.0",
    about = "Facility Crowd Control - congestion-aware zone routing and evacuation planning",
    long_about = "Models a facility as a graph of capacity-bounded zones and computes congestion-aware routing decisions: shortest paths, evacuation routes under crowd-size constraints, critical-zone detection, and dynamic crowd redistribution.

EXAMPLES:
    # Run the built-in stadium demo scenario
    facility-crowd-control --demo

    # Load a facility layout from a file
    facility-crowd-control --layout venue.json

    # Use a configuration file with CLI overrides
    facility-crowd-control --config config.json --monitoring-interval-ms 2000

    # Generate a configuration template
    facility-crowd-control --print-config > my-config.json

    # Validate configuration without running
    facility-crowd-control --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)

    Use --print-config to generate a template configuration file."
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Facility layout file path (JSON format)
    #[arg(
        short,
        long,
        help = "Facility layout file path (JSON format)",
        long_help = "Path to a JSON facility layout (zones, connections, exits). Without this flag the built-in stadium demo layout is used."
    )]
    pub layout: Option<String>,

    /// Run the full demo scenario against the layout
    #[arg(short, long, help = "Run the demo scenario (crowd arrival, routing, evacuation)")]
    pub demo: bool,

    /// Congestion level above which a zone is critical
    #[arg(
        long,
        help = "Critical congestion threshold (0-100)",
        long_help = "Congestion level above which a zone counts as critical. Strict comparison: a zone at exactly the threshold is not critical. Default: 80"
    )]
    pub critical_threshold: Option<f64>,

    /// Hop radius searched for redistribution targets
    #[arg(long, help = "Redistribution search radius in hops")]
    pub redistribution_radius: Option<usize>,

    /// Estimated evacuation minutes per traversed edge
    #[arg(long, help = "Evacuation time estimate in minutes per hop")]
    pub minutes_per_hop: Option<u32>,

    /// Monitoring loop tick interval in milliseconds
    #[arg(long, help = "Monitoring tick interval in milliseconds")]
    pub monitoring_interval_ms: Option<u64>,

    /// Crowd flow simulation tick interval in milliseconds
    #[arg(long, help = "Simulation tick interval in milliseconds")]
    pub simulation_interval_ms: Option<u64>,

    /// Total crowd flow simulation duration in milliseconds
    #[arg(long, help = "Total simulation duration in milliseconds")]
    pub simulation_duration_ms: Option<u64>,

    /// Largest per-tick occupancy perturbation
    #[arg(long, help = "Largest per-tick occupancy perturbation (+/-)")]
    pub max_flow_delta: Option<i64>,

    /// Random seed for reproducible simulation runs
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Output path for the emergency evacuation plan (JSON)
    #[arg(long, help = "Output path for the evacuation plan JSON file")]
    pub plan_output: Option<String>,

    /// Output format for the status report
    #[arg(long, help = "Output format for the status report (json or text)")]
    pub output_format: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running
    #[arg(long, help = "Validate configuration without running")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Congestion level above which a zone is critical
    pub critical_threshold: Option<f64>,

    /// Hop radius searched for redistribution targets
    pub redistribution_radius: Option<usize>,

    /// Estimated evacuation minutes per traversed edge
    pub minutes_per_hop: Option<u32>,

    /// Monitoring loop tick interval in milliseconds
    pub monitoring_interval_ms: Option<u64>,

    /// Crowd flow simulation tick interval in milliseconds
    pub simulation_interval_ms: Option<u64>,

    /// Total crowd flow simulation duration in milliseconds
    pub simulation_duration_ms: Option<u64>,

    /// Largest per-tick occupancy perturbation
    pub max_flow_delta: Option<i64>,

    /// Random seed for reproducible simulation runs
    pub seed: Option<u64>,
}

/// Configuration for a facility crowd control instance
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacilityConfig {
    /// Congestion level above which a zone is critical (strict >)
    pub critical_threshold: f64,

    /// Hop radius searched for redistribution targets
    pub redistribution_radius: usize,

    /// Estimated evacuation minutes per traversed edge
    pub minutes_per_hop: u32,

    /// Monitoring loop tick interval in milliseconds
    pub monitoring_interval_ms: u64,

    /// Crowd flow simulation tick interval in milliseconds
    pub simulation_interval_ms: u64,

    /// Total crowd flow simulation duration in milliseconds
    pub simulation_duration_ms: u64,

    /// Largest per-tick occupancy perturbation (applied as +/- delta)
    pub max_flow_delta: i64,

    /// Random seed for reproducible simulation runs
    pub seed: Option<u64>,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for facility configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Critical threshold is outside the congestion scale
    #[error("Critical threshold must be between 0 and 100, got {0}")]
    InvalidCriticalThreshold(f64),

    /// Redistribution radius is invalid
    #[error("Redistribution radius must be greater than 0, got {0}")]
    InvalidRedistributionRadius(usize),

    /// Minutes per hop is invalid
    #[error("Minutes per hop must be greater than 0, got {0}")]
    InvalidMinutesPerHop(u32),

    /// A loop interval is invalid
    #[error("Interval for {field} must be greater than 0")]
    InvalidInterval {
        /// Name of the interval field
        field: String,
    },

    /// Flow delta bound is invalid
    #[error("Max flow delta must be greater than 0, got {0}")]
    InvalidMaxFlowDelta(i64),
}

impl Default for FacilityConfig {
    fn default() -> Self {
        Self {
            critical_threshold: defaults::CRITICAL_CONGESTION_THRESHOLD,
            redistribution_radius: defaults::REDISTRIBUTION_SEARCH_RADIUS,
            minutes_per_hop: defaults::EVACUATION_MINUTES_PER_HOP,
            monitoring_interval_ms: defaults::MONITORING_INTERVAL_MS,
            simulation_interval_ms: defaults::SIMULATION_INTERVAL_MS,
            simulation_duration_ms: defaults::SIMULATION_DURATION_MS,
            max_flow_delta: defaults::MAX_FLOW_DELTA,
            seed: None,
        }
    }
}

impl FacilityConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            critical_threshold: config_file
                .critical_threshold
                .unwrap_or(defaults.critical_threshold),
            redistribution_radius: config_file
                .redistribution_radius
                .unwrap_or(defaults.redistribution_radius),
            minutes_per_hop: config_file.minutes_per_hop.unwrap_or(defaults.minutes_per_hop),
            monitoring_interval_ms: config_file
                .monitoring_interval_ms
                .unwrap_or(defaults.monitoring_interval_ms),
            simulation_interval_ms: config_file
                .simulation_interval_ms
                .unwrap_or(defaults.simulation_interval_ms),
            simulation_duration_ms: config_file
                .simulation_duration_ms
                .unwrap_or(defaults.simulation_duration_ms),
            max_flow_delta: config_file.max_flow_delta.unwrap_or(defaults.max_flow_delta),
            seed: config_file.seed.or(defaults.seed),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.critical_threshold {
            config.critical_threshold = value;
        }
        if let Some(value) = args.redistribution_radius {
            config.redistribution_radius = value;
        }
        if let Some(value) = args.minutes_per_hop {
            config.minutes_per_hop = value;
        }
        if let Some(value) = args.monitoring_interval_ms {
            config.monitoring_interval_ms = value;
        }
        if let Some(value) = args.simulation_interval_ms {
            config.simulation_interval_ms = value;
        }
        if let Some(value) = args.simulation_duration_ms {
            config.simulation_duration_ms = value;
        }
        if let Some(value) = args.max_flow_delta {
            config.max_flow_delta = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !(0.0..=100.0).contains(&self.critical_threshold) {
            return Err(ConfigValidationError::InvalidCriticalThreshold(self.critical_threshold));
        }

        if self.redistribution_radius == 0 {
            return Err(ConfigValidationError::InvalidRedistributionRadius(
                self.redistribution_radius,
            ));
        }

        if self.minutes_per_hop == 0 {
            return Err(ConfigValidationError::InvalidMinutesPerHop(self.minutes_per_hop));
        }

        if self.monitoring_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidInterval {
                field: "monitoring_interval_ms".to_string(),
            });
        }

        if self.simulation_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidInterval {
                field: "simulation_interval_ms".to_string(),
            });
        }

        if self.max_flow_delta <= 0 {
            return Err(ConfigValidationError::InvalidMaxFlowDelta(self.max_flow_delta));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FacilityConfig::default();
        assert!(config.validate().is_ok());

        assert_eq!(config.critical_threshold, 80.0);
        assert_eq!(config.redistribution_radius, 3);
        assert_eq!(config.minutes_per_hop, 2);
        assert_eq!(config.monitoring_interval_ms, 5_000);
        assert_eq!(config.simulation_interval_ms, 1_000);
        assert_eq!(config.simulation_duration_ms, 60_000);
        assert_eq!(config.max_flow_delta, 10);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validation_rejects_bad_threshold() {
        let mut config = FacilityConfig::default();

        config.critical_threshold = -1.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidCriticalThreshold(_))
        ));

        config.critical_threshold = 100.5;
        assert!(config.validate().is_err());

        // Boundary values are allowed
        config.critical_threshold = 0.0;
        assert!(config.validate().is_ok());
        config.critical_threshold = 100.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let mut config = FacilityConfig::default();
        config.redistribution_radius = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidRedistributionRadius(0))
        ));

        let mut config = FacilityConfig::default();
        config.minutes_per_hop = 0;
        assert!(config.validate().is_err());

        let mut config = FacilityConfig::default();
        config.monitoring_interval_ms = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidInterval { .. })
        ));

        let mut config = FacilityConfig::default();
        config.max_flow_delta = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidMaxFlowDelta(0))
        ));
    }

    #[test]
    fn test_config_file_merges_with_defaults() {
        let config_file = ConfigFile {
            critical_threshold: Some(70.0),
            seed: Some(42),
            ..Default::default()
        };

        let config = FacilityConfig::from_config_file(config_file);

        assert_eq!(config.critical_threshold, 70.0);
        assert_eq!(config.seed, Some(42));

        // Unspecified fields fall back to defaults
        assert_eq!(config.redistribution_radius, defaults::REDISTRIBUTION_SEARCH_RADIUS);
        assert_eq!(config.minutes_per_hop, defaults::EVACUATION_MINUTES_PER_HOP);
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let args = CliArgs::parse_from([
            "facility-crowd-control",
            "--critical-threshold",
            "65",
            "--redistribution-radius",
            "5",
            "--seed",
            "7",
        ]);

        let config = FacilityConfig::from_cli_args(args).unwrap();
        assert_eq!(config.critical_threshold, 65.0);
        assert_eq!(config.redistribution_radius, 5);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.minutes_per_hop, defaults::EVACUATION_MINUTES_PER_HOP);
    }

    #[test]
    fn test_print_json_round_trip() {
        let config = FacilityConfig::default();
        let json = config.print_json().unwrap();

        let parsed: FacilityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.critical_threshold, config.critical_threshold);
        assert_eq!(parsed.redistribution_radius, config.redistribution_radius);
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let result = FacilityConfig::from_file("/nonexistent/config.json");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }
}
