//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Environment variables: `RPRESENCE_*` prefix
//! 3. Explicit command-line arguments (applied by the CLI layer)
//!
//! There is no config file.

use std::collections::HashMap;

use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Assets;

/// Application identifier registered with the chat application.
pub const DEFAULT_CLIENT_ID: &str = "798647747678568488";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "RPRESENCE";

/// Unified configuration for rpresence.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Application identifier sent in the handshake
    pub client_id: String,
    /// Second presence line
    pub details: String,
    /// Large image asset key
    pub large_image: String,
    /// Large image hover text
    pub large_text: String,
    /// Small image asset key
    pub small_image: String,
    /// Small image hover text
    pub small_text: String,
    /// Default distance between start and end timestamps; 0 leaves end unset
    pub session_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            client_id: DEFAULT_CLIENT_ID.to_string(),
            details: "details = mpv".to_string(),
            large_image: "mpv".to_string(),
            large_text: "large_text = mpv Media Player".to_string(),
            small_image: "player_stop".to_string(),
            small_text: "small_text = Idle".to_string(),
            session_secs: 60,
        }
    }
}

impl Settings {
    /// Default image assets as a domain value.
    pub fn assets(&self) -> Assets {
        Assets {
            large_image: self.large_image.clone(),
            large_text: self.large_text.clone(),
            small_image: self.small_image.clone(),
            small_text: self.small_text.clone(),
        }
    }

    /// Load settings: compiled defaults, then `RPRESENCE_*` from the process environment.
    pub fn load() -> Result<Self, ApplicationError> {
        let env = Environment::with_prefix(ENV_PREFIX);
        let settings = Self::apply_env_overrides(Self::default(), env)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Same as [`Settings::load`], reading overrides from `vars` instead of the process.
    ///
    /// Keys use the full variable name, e.g. `RPRESENCE_CLIENT_ID`.
    pub fn load_from(vars: HashMap<String, String>) -> Result<Self, ApplicationError> {
        let source = Environment::with_prefix(ENV_PREFIX).source(Some(vars));
        let settings = Self::apply_env_overrides(Self::default(), source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Apply RPRESENCE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(env.prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("client_id") {
            settings.client_id = val;
        }
        if let Ok(val) = config.get_string("details") {
            settings.details = val;
        }
        if let Ok(val) = config.get_string("large_image") {
            settings.large_image = val;
        }
        if let Ok(val) = config.get_string("large_text") {
            settings.large_text = val;
        }
        if let Ok(val) = config.get_string("small_image") {
            settings.small_image = val;
        }
        if let Ok(val) = config.get_string("small_text") {
            settings.small_text = val;
        }
        if let Ok(val) = config.get_string("session_secs") {
            settings.session_secs = val.trim().parse().map_err(|e| ApplicationError::Config {
                message: format!("{ENV_PREFIX}_SESSION_SECS={val:?}: {e}"),
            })?;
        }

        debug!("settings after env overrides: {:?}", settings);
        Ok(settings)
    }

    /// Reject settings the chat application would refuse.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        if self.client_id.is_empty() || !self.client_id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ApplicationError::Config {
                message: format!("client_id must be a numeric snowflake, got {:?}", self.client_id),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn given_no_overrides_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(HashMap::new()).expect("load defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.client_id, DEFAULT_CLIENT_ID);
        assert_eq!(settings.session_secs, 60);
    }

    #[test]
    fn given_env_overrides_when_loading_then_replaces_values() {
        let settings = Settings::load_from(vars(&[
            ("RPRESENCE_CLIENT_ID", "123456789"),
            ("RPRESENCE_LARGE_IMAGE", "vlc"),
            ("RPRESENCE_SESSION_SECS", "0"),
        ]))
        .expect("load overrides");

        assert_eq!(settings.client_id, "123456789");
        assert_eq!(settings.large_image, "vlc");
        assert_eq!(settings.session_secs, 0);
        // untouched
        assert_eq!(settings.small_image, "player_stop");
    }

    #[test]
    fn given_unprefixed_vars_when_loading_then_ignores_them() {
        let settings =
            Settings::load_from(vars(&[("CLIENT_ID", "1"), ("OTHER_DETAILS", "x")])).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn given_non_numeric_session_secs_when_loading_then_config_error() {
        let err = Settings::load_from(vars(&[("RPRESENCE_SESSION_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_non_numeric_client_id_when_loading_then_config_error() {
        let err = Settings::load_from(vars(&[("RPRESENCE_CLIENT_ID", "my-app")])).unwrap_err();
        assert!(matches!(err, ApplicationError::Config { .. }));
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_all_keys() {
        let toml = Settings::default().to_toml().unwrap();
        for key in [
            "client_id",
            "details",
            "large_image",
            "large_text",
            "small_image",
            "small_text",
            "session_secs",
        ] {
            assert!(toml.contains(key), "missing {key} in:\n{toml}");
        }
    }

    #[test]
    fn given_settings_when_assets_then_maps_fields() {
        let assets = Settings::default().assets();
        assert_eq!(assets.large_image, "mpv");
        assert_eq!(assets.small_text, "small_text = Idle");
    }
}
