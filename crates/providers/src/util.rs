//! Shared utility functions for provider adapters.

use std::time::Duration;

use dl_domain::config::LlmConfig;
use dl_domain::error::{Error, Result};

/// Convert a [`reqwest::Error`] into the domain [`Error`] type.
///
/// Timeout errors map to [`Error::Timeout`]; everything else maps to
/// [`Error::Http`].
pub(crate) fn from_reqwest(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::Timeout(e.to_string())
    } else {
        Error::Http(e.to_string())
    }
}

/// HTTP client with the configured generation timeout.
pub(crate) fn build_client(cfg: &LlmConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_millis(cfg.timeout_ms))
        .build()
        .map_err(from_reqwest)
}

/// Resolve the API key from the env var named in `api_key_env`.
///
/// `Ok(None)` when no env var is configured; an error when it is configured
/// but unset.
pub fn resolve_api_key(cfg: &LlmConfig) -> Result<Option<String>> {
    let Some(ref env_var) = cfg.api_key_env else {
        return Ok(None);
    };
    match std::env::var(env_var) {
        Ok(key) if !key.trim().is_empty() => Ok(Some(key)),
        _ => Err(Error::Config(format!(
            "environment variable '{env_var}' not set or empty"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_env_var_means_no_key() {
        let cfg = LlmConfig::default();
        assert!(resolve_api_key(&cfg).unwrap().is_none());
    }

    #[test]
    fn missing_env_var_is_config_error() {
        let cfg = LlmConfig {
            api_key_env: Some("DL_TEST_KEY_THAT_IS_NEVER_SET_1234".into()),
            ..LlmConfig::default()
        };
        assert!(matches!(resolve_api_key(&cfg), Err(Error::Config(_))));
    }
}
