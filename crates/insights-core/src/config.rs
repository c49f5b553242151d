//! ============================================================================
//! Gate Configuration - Trial window, grant duration, unlock code
//! ============================================================================
//! Fixed configuration for the access wall. Values are code-level defaults
//! with optional environment overrides; nothing is runtime-reloadable.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Default free-trial window in seconds
pub const DEFAULT_FREE_TRIAL_SECS: i64 = 600;

/// Default unlock grant duration in hours
pub const DEFAULT_ACCESS_HOURS: i64 = 24;

/// Default static unlock code. A shared secret at configuration level,
/// not secret-strength: the access wall is a soft paywall, not a
/// security boundary.
pub const DEFAULT_UNLOCK_CODE: &str = "vip24";

/// Environment override for the free-trial window (seconds)
pub const ENV_FREE_TRIAL_SECS: &str = "INSIGHTS_FREE_TRIAL_SECS";
/// Environment override for the unlock grant duration (hours)
pub const ENV_ACCESS_HOURS: &str = "INSIGHTS_ACCESS_HOURS";
/// Environment override for the unlock code
pub const ENV_UNLOCK_CODE: &str = "INSIGHTS_UNLOCK_CODE";

/// Configuration errors raised while reading environment overrides
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {var}: expected a positive integer")]
    InvalidDuration { var: &'static str, value: String },
}

/// Access-wall configuration (can be customized per deployment)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateConfig {
    /// Seconds of unconditional access after a session is first observed
    pub free_trial_secs: i64,
    /// Hours of access granted by a correct unlock code
    pub access_hours: i64,
    /// Static unlock code the viewer must submit once locked
    pub unlock_code: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            free_trial_secs: DEFAULT_FREE_TRIAL_SECS,
            access_hours: DEFAULT_ACCESS_HOURS,
            unlock_code: DEFAULT_UNLOCK_CODE.to_string(),
        }
    }
}

impl GateConfig {
    /// Build a config from defaults overlaid with environment variables.
    /// Unset variables keep their defaults; malformed numeric values are
    /// a [`ConfigError`], not a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var(ENV_FREE_TRIAL_SECS) {
            config.free_trial_secs = parse_duration(ENV_FREE_TRIAL_SECS, &raw)?;
        }
        if let Ok(raw) = std::env::var(ENV_ACCESS_HOURS) {
            config.access_hours = parse_duration(ENV_ACCESS_HOURS, &raw)?;
        }
        if let Ok(code) = std::env::var(ENV_UNLOCK_CODE) {
            config.unlock_code = code;
        }

        Ok(config)
    }

    /// Grant duration in seconds (the unlock expiry is `unlock_time + this`)
    pub fn access_duration_secs(&self) -> i64 {
        self.access_hours * 3600
    }
}

fn parse_duration(var: &'static str, raw: &str) -> Result<i64, ConfigError> {
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidDuration {
            var,
            value: raw.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GateConfig::default();
        assert_eq!(config.free_trial_secs, 600);
        assert_eq!(config.access_hours, 24);
        assert_eq!(config.unlock_code, "vip24");
        assert_eq!(config.access_duration_secs(), 86400);
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration(ENV_ACCESS_HOURS, "48"), Ok(48));
        assert_eq!(parse_duration(ENV_ACCESS_HOURS, " 12 "), Ok(12));
        assert!(parse_duration(ENV_ACCESS_HOURS, "0").is_err());
        assert!(parse_duration(ENV_ACCESS_HOURS, "-5").is_err());
        assert!(parse_duration(ENV_ACCESS_HOURS, "24h").is_err());
    }

    #[test]
    fn test_env_overlay() {
        // Single test mutates the process environment to avoid races
        // between parallel tests sharing the same variables.
        std::env::set_var(ENV_FREE_TRIAL_SECS, "60");
        std::env::set_var(ENV_UNLOCK_CODE, "letmein");
        let config = GateConfig::from_env().unwrap();
        assert_eq!(config.free_trial_secs, 60);
        assert_eq!(config.access_hours, DEFAULT_ACCESS_HOURS);
        assert_eq!(config.unlock_code, "letmein");

        std::env::set_var(ENV_FREE_TRIAL_SECS, "soon");
        assert_eq!(
            GateConfig::from_env(),
            Err(ConfigError::InvalidDuration {
                var: ENV_FREE_TRIAL_SECS,
                value: "soon".to_string(),
            })
        );

        std::env::remove_var(ENV_FREE_TRIAL_SECS);
        std::env::remove_var(ENV_UNLOCK_CODE);
    }
}
