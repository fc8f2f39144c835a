use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::resolver::ResolverConfig;
use super::timing::TimingConfig;

/// Main configuration structure for dnscheck
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct HarnessConfig {
    /// Resolver under test (host, port, zone)
    #[serde(default)]
    pub resolver: ResolverConfig,

    /// Timeout and polling bounds
    #[serde(default)]
    pub timing: TimingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. dnscheck.toml in current directory
    /// 3. /etc/dnscheck/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("dnscheck.toml").exists() {
            Self::from_file("dnscheck.toml")?
        } else if std::path::Path::new("/etc/dnscheck/config.toml").exists() {
            Self::from_file("/etc/dnscheck/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(host) = overrides.resolver_host {
            self.resolver.host = host;
        }
        if let Some(port) = overrides.resolver_port {
            self.resolver.port = port;
        }
        if let Some(zone) = overrides.zone {
            self.resolver.zone = zone;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resolver.port == 0 {
            return Err(ConfigError::Validation(
                "Resolver port cannot be 0".to_string(),
            ));
        }
        if self.resolver.zone.is_empty() {
            return Err(ConfigError::Validation("Zone cannot be empty".to_string()));
        }
        if self.timing.query_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }
        if self.timing.poll_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "Poll interval cannot be 0".to_string(),
            ));
        }
        if self.timing.propagation_timeout_ms < self.timing.poll_interval_ms {
            return Err(ConfigError::Validation(
                "Propagation timeout is shorter than the poll interval".to_string(),
            ));
        }
        Ok(())
    }

    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string)
            .map_err(|e| ConfigError::FileWrite(path.to_string(), e.to_string()))?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub resolver_host: Option<String>,
    pub resolver_port: Option<u16>,
    pub zone: Option<String>,
    pub log_level: Option<String>,
}
