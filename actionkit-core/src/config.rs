use std::time::Duration;

use serde::Deserialize;

use crate::{error::ActionError, web::WebAuthenticationCallback};

/// Default deadline of a browser fingerprinting session.
pub const DEFAULT_WEB_FINGERPRINT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default gap between the end of a browser presentation and the start of the next one.
pub const DEFAULT_PRESENTATION_INTERVAL: Duration = Duration::from_secs(1);

/// Configuration of an [`crate::ActionResolver`].
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ResolverConfig {
    /// Time given to the fingerprinting page to redirect back before a timeout token is sent.
    pub web_fingerprint_timeout: Duration,
    /// Minimum gap between two browser presentations.
    pub presentation_interval: Duration,
    /// Whether browser sessions should avoid sharing cookies with the user's browser.
    pub prefers_ephemeral_web_session: bool,
    /// How browser sessions recognize the return to the app.
    pub web_authentication_callback: Option<WebAuthenticationCallback>,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            web_fingerprint_timeout: DEFAULT_WEB_FINGERPRINT_TIMEOUT,
            presentation_interval: DEFAULT_PRESENTATION_INTERVAL,
            prefers_ephemeral_web_session: true,
            web_authentication_callback: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawResolverConfig {
    web_fingerprint_timeout_ms: Option<u64>,
    presentation_interval_ms: Option<u64>,
    prefers_ephemeral_web_session: Option<bool>,
    web_authentication_callback: Option<WebAuthenticationCallback>,
}

impl ResolverConfig {
    /// Parses a JSON configuration. Missing fields keep their default value.
    ///
    /// ```
    /// use std::time::Duration;
    /// use actionkit_core::ResolverConfig;
    ///
    /// let config = ResolverConfig::from_json(r#"{"webFingerprintTimeoutMs": 5000}"#).unwrap();
    /// assert_eq!(config.web_fingerprint_timeout, Duration::from_secs(5));
    /// assert!(config.prefers_ephemeral_web_session);
    /// ```
    ///
    /// # Errors
    /// Returns `ActionError::Decode` if `json` is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self, ActionError> {
        let raw: RawResolverConfig = serde_json::from_str(json).map_err(|e| {
            log::error!("Invalid resolver configuration: {e}.");
            ActionError::Decode {
                error: format!("invalid resolver configuration: {e}"),
            }
        })?;
        let defaults = Self::default();
        Ok(Self {
            web_fingerprint_timeout: raw
                .web_fingerprint_timeout_ms
                .map_or(defaults.web_fingerprint_timeout, Duration::from_millis),
            presentation_interval: raw
                .presentation_interval_ms
                .map_or(defaults.presentation_interval, Duration::from_millis),
            prefers_ephemeral_web_session: raw
                .prefers_ephemeral_web_session
                .unwrap_or(defaults.prefers_ephemeral_web_session),
            web_authentication_callback: raw.web_authentication_callback,
        })
    }
}

/// Returns the default resolver configuration.
#[uniffi::export]
#[must_use]
pub fn default_resolver_config() -> ResolverConfig {
    ResolverConfig::default()
}

/// Parses a JSON resolver configuration, see [`ResolverConfig::from_json`].
///
/// # Errors
/// Returns `ActionError::Decode` if `json` is not a valid configuration.
#[uniffi::export]
pub fn resolver_config_from_json(json: &str) -> Result<ResolverConfig, ActionError> {
    ResolverConfig::from_json(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_empty_object_yields_defaults() {
        assert_eq!(
            ResolverConfig::from_json("{}").unwrap(),
            ResolverConfig::default()
        );
    }

    #[test]
    fn test_all_fields() {
        let config = ResolverConfig::from_json(
            r#"{
                "webFingerprintTimeoutMs": 2500,
                "presentationIntervalMs": 0,
                "prefersEphemeralWebSession": false,
                "webAuthenticationCallback": {"type": "https", "host": "shop.test", "path": "/3ds"}
            }"#,
        )
        .unwrap();
        assert_eq!(config.web_fingerprint_timeout, Duration::from_millis(2500));
        assert_eq!(config.presentation_interval, Duration::ZERO);
        assert!(!config.prefers_ephemeral_web_session);
        assert_eq!(
            config.web_authentication_callback,
            Some(WebAuthenticationCallback::Https {
                host: "shop.test".to_string(),
                path: "/3ds".to_string()
            })
        );
    }

    #[test]
    fn test_scheme_callback() {
        let config = ResolverConfig::from_json(
            r#"{"webAuthenticationCallback": {"type": "scheme", "scheme": "shop"}}"#,
        )
        .unwrap();
        assert_eq!(
            config.web_authentication_callback,
            Some(WebAuthenticationCallback::Scheme {
                scheme: "shop".to_string()
            })
        );
    }

    #[test_case("" ; "empty")]
    #[test_case("[]" ; "not an object")]
    #[test_case(r#"{"webFingerprintTimeoutMs": -1}"# ; "negative timeout")]
    #[test_case(r#"{"webFingerprintTimeout": 10}"# ; "unknown field")]
    #[test_case(r#"{"webAuthenticationCallback": {"type": "ftp"}}"# ; "unknown callback")]
    fn test_invalid_config_is_a_decode_error(json: &str) {
        assert!(matches!(
            ResolverConfig::from_json(json),
            Err(ActionError::Decode { .. })
        ));
    }
}
