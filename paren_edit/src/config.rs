//! Editor configuration

use serde::{Deserialize, Serialize};

/// Configuration for the wrap/unwrap command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditConfig {
    /// Marker atom of the conditional form that unwrap collapses
    pub conditional_marker: String,
}

impl Default for EditConfig {
    fn default() -> Self {
        Self {
            conditional_marker: "if".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_marker() {
        assert_eq!(EditConfig::default().conditional_marker, "if");
    }

    #[test]
    fn test_config_round_trip() {
        let config = EditConfig {
            conditional_marker: "cond".to_string(),
        };
        let json = serde_json::to_string(&config).expect("serialize");
        let back: EditConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, config);
    }
}
