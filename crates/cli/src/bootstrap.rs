use dnscheck_domain::{CliOverrides, ConfigError, HarnessConfig};
use tracing_subscriber::EnvFilter;

pub fn load_config(
    path: Option<&str>,
    overrides: CliOverrides,
) -> Result<HarnessConfig, ConfigError> {
    let config = HarnessConfig::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn init_logging(config: &HarnessConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
