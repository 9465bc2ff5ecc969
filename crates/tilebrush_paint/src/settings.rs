//! Per-session paint settings

use serde::{Deserialize, Serialize};
use tilebrush_autotile::EdgePolicy;

use crate::PaintError;

/// Settings shared by every tool of an editing session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSettings {
    /// Whether neighbors past the field edge count as connected
    pub edge_policy: EdgePolicy,
    /// Skip stamp repaints while the cursor stays inside the last stamp footprint
    pub suppress_stamp_jitter: bool,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            edge_policy: EdgePolicy::None,
            suppress_stamp_jitter: true,
        }
    }
}

impl PaintSettings {
    /// Parse settings from TOML. Missing keys take their defaults.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, PaintError> {
        Ok(toml::from_str(toml_str)?)
    }

    pub fn to_toml_string(&self) -> Result<String, PaintError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() {
        let settings = PaintSettings::from_toml_str("").unwrap();
        assert_eq!(settings, PaintSettings::default());

        let settings = PaintSettings::from_toml_str(r#"edge_policy = "connect_always""#).unwrap();
        assert_eq!(settings.edge_policy, EdgePolicy::ConnectAlways);
        assert!(settings.suppress_stamp_jitter);
    }

    #[test]
    fn test_invalid_policy_is_settings_error() {
        let err = PaintSettings::from_toml_str(r#"edge_policy = "sometimes""#).unwrap_err();
        assert!(matches!(err, PaintError::Settings(_)));
    }

    #[test]
    fn test_to_toml_reloads() {
        let settings = PaintSettings {
            edge_policy: EdgePolicy::ConnectAlways,
            suppress_stamp_jitter: false,
        };
        let text = settings.to_toml_string().unwrap();
        assert!(text.contains("connect_always"));
        assert_eq!(PaintSettings::from_toml_str(&text).unwrap(), settings);
    }
}
