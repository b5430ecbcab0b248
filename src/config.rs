//! Configuration management for Pilot-Oxide

use serde::Deserialize;
use std::env;
use tracing::warn;

/// Input automation configuration
///
/// Missing or invalid configuration never fails startup: every loading path
/// falls back to the built-in default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-input-type settings
    pub input_types: InputTypes,

    /// Element extraction settings
    pub element_extraction: ElementExtraction,

    /// Action execution tuning
    pub actions: ActionTuning,
}

/// Settings grouped by input type
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputTypes {
    /// Keyboard input settings
    pub keyboard: KeyboardConfig,

    /// Button input settings
    pub buttons: ButtonConfig,

    /// Slider input settings
    pub sliders: SliderConfig,

    /// 2D-collider interactable settings
    pub interactable_2d: Interactable2dConfig,
}

/// Keyboard input settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Whether keyboard input is offered at all
    pub enabled: bool,

    /// Key names the agent may use
    pub available_keys: Vec<String>,
}

/// Button input settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ButtonConfig {
    /// Whether button presses are offered
    pub enabled: bool,

    /// Element cache lifetime in seconds
    pub cache_ttl_seconds: f64,
}

/// Slider input settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Whether slider moves are offered
    pub enabled: bool,
}

/// 2D-collider interactable settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Interactable2dConfig {
    /// Whether collider-based hotspots are offered
    pub enabled: bool,
}

/// Element extraction settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ElementExtraction {
    /// Component-type descriptors to scan for
    pub components: Vec<ComponentEntry>,
}

/// One component type to query during extraction
#[derive(Debug, Clone, Deserialize)]
pub struct ComponentEntry {
    /// Fully qualified component type name
    pub component_name: String,

    /// Assembly the component lives in
    pub assembly: String,
}

/// Action execution tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ActionTuning {
    /// Pause between swipe touch phases, in seconds
    pub swipe_settle_seconds: f64,

    /// Default key press duration when the action does not specify one
    pub key_tap_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_types: InputTypes::default(),
            element_extraction: ElementExtraction::default(),
            actions: ActionTuning::default(),
        }
    }
}

impl Default for InputTypes {
    fn default() -> Self {
        Self {
            keyboard: KeyboardConfig::default(),
            buttons: ButtonConfig::default(),
            sliders: SliderConfig::default(),
            interactable_2d: Interactable2dConfig::default(),
        }
    }
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            available_keys: vec![
                "Space".to_string(),
                "A".to_string(),
                "D".to_string(),
                "W".to_string(),
                "S".to_string(),
            ],
        }
    }
}

impl Default for ButtonConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cache_ttl_seconds: 5.0,
        }
    }
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for Interactable2dConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ElementExtraction {
    fn default() -> Self {
        Self {
            components: vec![
                ComponentEntry {
                    component_name: "UnityEngine.UI.Button".to_string(),
                    assembly: "UnityEngine.UI".to_string(),
                },
                ComponentEntry {
                    component_name: "UnityEngine.UI.Toggle".to_string(),
                    assembly: "UnityEngine.UI".to_string(),
                },
                ComponentEntry {
                    component_name: "UnityEngine.EventSystems.EventTrigger".to_string(),
                    assembly: "UnityEngine.UI".to_string(),
                },
            ],
        }
    }
}

impl Default for ActionTuning {
    fn default() -> Self {
        Self {
            swipe_settle_seconds: 1.0,
            key_tap_seconds: 0.1,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Starts from `PILOT_CONFIG` (a config file path) if set, otherwise the
    /// built-in default, then applies scalar overrides.
    pub fn from_env() -> Self {
        let mut config = match env::var("PILOT_CONFIG") {
            Ok(path) => Config::from_file(&path),
            Err(_) => Config::default(),
        };

        if let Ok(ttl) = env::var("PILOT_CACHE_TTL") {
            match ttl.parse() {
                Ok(v) => config.input_types.buttons.cache_ttl_seconds = v,
                Err(_) => warn!("Invalid PILOT_CACHE_TTL: {}", ttl),
            }
        }

        if let Ok(settle) = env::var("PILOT_SWIPE_SETTLE") {
            match settle.parse() {
                Ok(v) => config.actions.swipe_settle_seconds = v,
                Err(_) => warn!("Invalid PILOT_SWIPE_SETTLE: {}", settle),
            }
        }

        config
    }

    /// Load configuration from a file, falling back to the default on any error
    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                warn!("Failed to read config file {}: {}. Using default", path, e);
                return Config::default();
            }
        };

        Config::from_toml_str(&content).unwrap_or_else(|e| {
            warn!("Failed to parse config file {}: {}. Using default", path, e);
            Config::default()
        })
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content)
            .map_err(|e| crate::Error::configuration(format!("Failed to parse config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.input_types.keyboard.enabled);
        assert_eq!(
            config.input_types.keyboard.available_keys,
            vec!["Space", "A", "D", "W", "S"]
        );
        assert!(config.input_types.buttons.enabled);
        assert_eq!(config.input_types.buttons.cache_ttl_seconds, 5.0);
        assert_eq!(config.element_extraction.components.len(), 3);
        assert_eq!(config.actions.key_tap_seconds, 0.1);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [input_types.keyboard]
            enabled = true
            available_keys = ["Space", "LeftArrow", "RightArrow"]

            [input_types.buttons]
            enabled = true
            cache_ttl_seconds = 2.5

            [input_types.sliders]
            enabled = false

            [[element_extraction.components]]
            component_name = "UnityEngine.UI.Button"
            assembly = "UnityEngine.UI"

            [[element_extraction.components]]
            component_name = "UnityEngine.UI.Slider"
            assembly = "UnityEngine.UI"

            [actions]
            swipe_settle_seconds = 0.25
        "#;

        let config = Config::from_toml_str(toml).unwrap();

        assert_eq!(
            config.input_types.keyboard.available_keys,
            vec!["Space", "LeftArrow", "RightArrow"]
        );
        assert_eq!(config.input_types.buttons.cache_ttl_seconds, 2.5);
        assert!(!config.input_types.sliders.enabled);
        // Sections absent from the file keep their defaults
        assert!(config.input_types.interactable_2d.enabled);
        assert_eq!(config.element_extraction.components.len(), 2);
        assert_eq!(config.actions.swipe_settle_seconds, 0.25);
        assert_eq!(config.actions.key_tap_seconds, 0.1);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let result = Config::from_toml_str("input_types = 42");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_falls_back_to_default() {
        let config = Config::from_file("/nonexistent/pilot-oxide.toml");
        assert_eq!(config.input_types.buttons.cache_ttl_seconds, 5.0);
    }
}
