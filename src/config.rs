use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PosepilotConfig {
    pub motion: MotionConfig,
    pub sender: SenderConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MotionConfig {
    /// Vertical shoulder samples kept for the jump scan (about one second)
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Consecutive backface frames needed before a reset fires
    #[serde(default = "default_reset_hold_frames")]
    pub reset_hold_frames: u32,

    /// Jump threshold as a multiple of the shoulder distance
    #[serde(default = "default_jump_threshold_factor")]
    pub jump_threshold_factor: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SenderConfig {
    /// Actuator endpoint host
    #[serde(default = "default_sender_host")]
    pub host: String,

    /// Actuator endpoint port
    #[serde(default = "default_sender_port")]
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemConfig {
    /// Log a throughput line every this many frames
    #[serde(default = "default_stats_interval_frames")]
    pub stats_interval_frames: u64,
}

impl PosepilotConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("posepilot.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            // Start with default values
            .set_default("motion.history_capacity", default_history_capacity() as i64)?
            .set_default(
                "motion.reset_hold_frames",
                default_reset_hold_frames() as i64,
            )?
            .set_default(
                "motion.jump_threshold_factor",
                default_jump_threshold_factor(),
            )?
            .set_default("sender.host", default_sender_host())?
            .set_default("sender.port", default_sender_port() as i64)?
            .set_default(
                "system.stats_interval_frames",
                default_stats_interval_frames() as i64,
            )?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with POSEPILOT_ prefix
            .add_source(Environment::with_prefix("POSEPILOT").separator("_"))
            .build()?;

        let config: PosepilotConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.motion.history_capacity == 0 {
            return Err(ConfigError::Message(
                "Motion history_capacity must be greater than 0".to_string(),
            ));
        }

        if self.motion.reset_hold_frames == 0 {
            return Err(ConfigError::Message(
                "Motion reset_hold_frames must be greater than 0".to_string(),
            ));
        }

        if !self.motion.jump_threshold_factor.is_finite()
            || self.motion.jump_threshold_factor <= 0.0
        {
            return Err(ConfigError::Message(
                "Motion jump_threshold_factor must be positive and finite".to_string(),
            ));
        }

        if self.sender.host.is_empty() {
            return Err(ConfigError::Message(
                "Sender host must not be empty".to_string(),
            ));
        }

        if self.sender.port == 0 {
            return Err(ConfigError::Message(
                "Sender port must be greater than 0".to_string(),
            ));
        }

        if self.system.stats_interval_frames == 0 {
            return Err(ConfigError::Message(
                "System stats_interval_frames must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for PosepilotConfig {
    fn default() -> Self {
        Self {
            motion: MotionConfig {
                history_capacity: default_history_capacity(),
                reset_hold_frames: default_reset_hold_frames(),
                jump_threshold_factor: default_jump_threshold_factor(),
            },
            sender: SenderConfig {
                host: default_sender_host(),
                port: default_sender_port(),
            },
            system: SystemConfig {
                stats_interval_frames: default_stats_interval_frames(),
            },
        }
    }
}

// Default value functions
fn default_history_capacity() -> usize {
    10
}
fn default_reset_hold_frames() -> u32 {
    10
}
fn default_jump_threshold_factor() -> f64 {
    2.0
}

fn default_sender_host() -> String {
    "localhost".to_string()
}
fn default_sender_port() -> u16 {
    2300
}

fn default_stats_interval_frames() -> u64 {
    100
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = PosepilotConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.motion.history_capacity, 10);
        assert_eq!(config.sender.port, 2300);
    }

    #[test]
    fn test_config_validation_rejects_bad_values() {
        let mut config = PosepilotConfig::default();
        config.motion.history_capacity = 0;
        assert!(config.validate().is_err());

        let mut config = PosepilotConfig::default();
        config.motion.reset_hold_frames = 0;
        assert!(config.validate().is_err());

        let mut config = PosepilotConfig::default();
        config.motion.jump_threshold_factor = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = PosepilotConfig::default();
        config.motion.jump_threshold_factor = -2.0;
        assert!(config.validate().is_err());

        let mut config = PosepilotConfig::default();
        config.sender.port = 0;
        assert!(config.validate().is_err());

        let mut config = PosepilotConfig::default();
        config.system.stats_interval_frames = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_file_values_override_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(file, "[sender]").unwrap();
        writeln!(file, "host = \"192.168.1.20\"").unwrap();
        writeln!(file, "port = 4000").unwrap();
        file.flush().unwrap();

        let config = PosepilotConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.sender.host, "192.168.1.20");
        assert_eq!(config.sender.port, 4000);
        // Untouched sections keep their defaults.
        assert_eq!(config.motion.history_capacity, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = PosepilotConfig::load_from_file("/nonexistent/posepilot.toml").unwrap();
        assert_eq!(config.sender.port, default_sender_port());
        assert_eq!(config.motion.jump_threshold_factor, 2.0);
    }
}
