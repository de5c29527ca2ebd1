//! Configuration commands.

use url::Url;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dumps the effective configuration as TOML.
pub fn dump(config: &ClientConfig) -> ClientResult<()> {
    let dumped = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to encode config: {}", e)))?;
    print!("{}", dumped);
    Ok(())
}

/// Validates the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    if let Some(ref api_url) = config.api_url {
        Url::parse(api_url)
            .map_err(|e| ClientError::Config(format!("invalid api_url {api_url:?}: {e}")))?;
    }
    if config.service.timeout == 0 {
        return Err(ClientError::Config(
            "service.timeout must be greater than zero".to_string(),
        ));
    }
    println!("Configuration OK.");
    Ok(())
}

/// Prints the configuration file path.
pub fn path() -> ClientResult<()> {
    println!("{}", ClientConfig::default_path().display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServiceSettings;

    #[test]
    fn default_config_validates() {
        assert!(validate(&ClientConfig::default()).is_ok());
    }

    #[test]
    fn bad_api_url_rejected() {
        let config = ClientConfig {
            api_url: Some("not a url".to_string()),
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }

    #[test]
    fn zero_timeout_rejected() {
        let config = ClientConfig {
            service: ServiceSettings { timeout: 0 },
            ..Default::default()
        };
        assert!(validate(&config).is_err());
    }
}
