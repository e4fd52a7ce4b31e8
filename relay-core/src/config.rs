use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

/// Connection settings for the downstream weather provider.
///
/// Example TOML:
/// ```toml
/// [downstream]
/// host = "weatherapi-com.p.rapidapi.com"
/// api_key = "..."
/// keystore_path = "/etc/weather-relay/client.p12"
/// keystore_password = "..."
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DownstreamConfig {
    pub host: String,
    pub api_key: String,
    pub keystore_path: PathBuf,
    pub keystore_password: String,

    /// Connection establishment bound in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Full request bound in seconds. Never unlimited.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_timeout_secs() -> u64 {
    30
}

impl DownstreamConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Top-level configuration for the relay.
#[derive(Debug, Clone, Deserialize)]
pub struct RelayConfig {
    pub downstream: DownstreamConfig,
}

impl RelayConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Parse configuration from TOML contents and validate the bounds.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let cfg: RelayConfig =
            toml::from_str(contents).context("Failed to parse configuration TOML")?;

        if cfg.downstream.timeout_secs == 0 || cfg.downstream.connect_timeout_secs == 0 {
            bail!("Downstream timeouts must be non-zero; unlimited requests are not supported");
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        [downstream]
        host = "weatherapi-com.p.rapidapi.com"
        api_key = "KEY"
        keystore_path = "/etc/weather-relay/client.p12"
        keystore_password = "secret"
    "#;

    #[test]
    fn parses_minimal_config_with_default_timeouts() {
        let cfg = RelayConfig::from_toml(SAMPLE).expect("sample config must parse");

        assert_eq!(cfg.downstream.host, "weatherapi-com.p.rapidapi.com");
        assert_eq!(cfg.downstream.connect_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.downstream.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn explicit_timeouts_override_defaults() {
        let toml = format!("{SAMPLE}\nconnect_timeout_secs = 2\ntimeout_secs = 5\n");
        let cfg = RelayConfig::from_toml(&toml).expect("config must parse");

        assert_eq!(cfg.downstream.connect_timeout(), Duration::from_secs(2));
        assert_eq!(cfg.downstream.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let toml = format!("{SAMPLE}\ntimeout_secs = 0\n");
        let err = RelayConfig::from_toml(&toml).unwrap_err();

        assert!(err.to_string().contains("must be non-zero"));
    }

    #[test]
    fn missing_keystore_password_is_rejected() {
        let toml = r#"
            [downstream]
            host = "weatherapi-com.p.rapidapi.com"
            api_key = "KEY"
            keystore_path = "/etc/weather-relay/client.p12"
        "#;

        assert!(RelayConfig::from_toml(toml).is_err());
    }
}
