use serde::{Deserialize, Serialize};

/// The resolver under test. Host and port are fixed parameters of the
/// harness, not discovered at runtime; the default is a local loopback
/// resolver on port 1053.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ResolverConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Zone the conformance record names live under.
    #[serde(default = "default_zone")]
    pub zone: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            zone: default_zone(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    1053
}

fn default_zone() -> String {
    "example.org".to_string()
}
