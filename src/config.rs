//! Bridge configuration and action manifest
//!
//! Read from `<config dir>/steam-input-bridge/config.toml`. A missing file
//! yields the defaults below; a file that exists but does not parse is an
//! error. The manifest declares the action sets the gilrs gateway resolves
//! names against, playing the role of the SDK's in-game actions file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info, warn, Level};

pub const CONFIG_DIR: &str = "steam-input-bridge";
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Invalid action manifest: {0}")]
    ManifestError(String),
}

// Logical buttons a digital action can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ButtonType {
    A,
    B,
    X,
    Y,
    Start,
    Select,
    LeftBumper,
    RightBumper,
    LeftTrigger,
    RightTrigger,
    LeftStick,
    RightStick,
    DPadUp,
    DPadDown,
    DPadLeft,
    DPadRight,
    Guide,
}

// Physical source of an analog action
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnalogSource {
    LeftStick,
    RightStick,
    LeftTrigger,
    RightTrigger,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct DigitalBinding {
    pub name: String,
    pub button: ButtonType,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct AnalogBinding {
    pub name: String,
    pub source: AnalogSource,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ActionSetConfig {
    pub name: String,
    #[serde(default)]
    pub digital: Vec<DigitalBinding>,
    #[serde(default)]
    pub analog: Vec<AnalogBinding>,
}

/// Declared action sets and their bindings
///
/// Handles are positions plus one, so `0` stays free as the invalid handle.
/// Digital and analog action names share one handle across sets: the same
/// name in two sets is one action with a per-set binding.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ActionManifest {
    #[serde(default)]
    pub action_sets: Vec<ActionSetConfig>,
}

impl Default for ActionManifest {
    fn default() -> Self {
        let digital = |name: &str, button| DigitalBinding {
            name: name.to_string(),
            button,
        };
        let analog = |name: &str, source| AnalogBinding {
            name: name.to_string(),
            source,
        };

        Self {
            action_sets: vec![
                ActionSetConfig {
                    name: "InGame".to_string(),
                    digital: vec![
                        digital("jump", ButtonType::A),
                        digital("fire", ButtonType::RightTrigger),
                        digital("menu", ButtonType::Start),
                    ],
                    analog: vec![
                        analog("move", AnalogSource::LeftStick),
                        analog("camera", AnalogSource::RightStick),
                        analog("throttle", AnalogSource::RightTrigger),
                    ],
                },
                ActionSetConfig {
                    name: "Menu".to_string(),
                    digital: vec![
                        digital("menu_select", ButtonType::A),
                        digital("menu_cancel", ButtonType::B),
                        digital("menu", ButtonType::Start),
                    ],
                    analog: vec![analog("menu_navigate", AnalogSource::LeftStick)],
                },
            ],
        }
    }
}

impl ActionManifest {
    /// Rejects unnamed or duplicated action sets
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (index, set) in self.action_sets.iter().enumerate() {
            if set.name.trim().is_empty() {
                return Err(ConfigError::ManifestError(format!(
                    "action set #{} has no name",
                    index
                )));
            }
            if self.action_sets[..index].iter().any(|s| s.name == set.name) {
                return Err(ConfigError::ManifestError(format!(
                    "action set {:?} declared twice",
                    set.name
                )));
            }
        }
        Ok(())
    }

    pub fn action_set(&self, handle: i32) -> Option<&ActionSetConfig> {
        let index = usize::try_from(handle).ok()?.checked_sub(1)?;
        self.action_sets.get(index)
    }

    /// `0` when no set has this name
    pub fn action_set_handle(&self, name: &str) -> i32 {
        handle_of(self.action_sets.iter().map(|set| set.name.as_str()), name)
    }

    /// Distinct digital action names in declaration order
    pub fn digital_actions(&self) -> Vec<&str> {
        distinct(
            self.action_sets
                .iter()
                .flat_map(|set| set.digital.iter().map(|b| b.name.as_str())),
        )
    }

    /// Distinct analog action names in declaration order
    pub fn analog_actions(&self) -> Vec<&str> {
        distinct(
            self.action_sets
                .iter()
                .flat_map(|set| set.analog.iter().map(|b| b.name.as_str())),
        )
    }

    pub fn digital_action_handle(&self, name: &str) -> i32 {
        handle_of(self.digital_actions().into_iter(), name)
    }

    pub fn analog_action_handle(&self, name: &str) -> i32 {
        handle_of(self.analog_actions().into_iter(), name)
    }

    /// Button bound to digital action `action` inside set `action_set`
    pub fn digital_binding(&self, action_set: i32, action: i32) -> Option<ButtonType> {
        let name = name_at(&self.digital_actions(), action)?;
        self.action_set(action_set)?
            .digital
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| binding.button)
    }

    /// Source bound to analog action `action` inside set `action_set`
    pub fn analog_binding(&self, action_set: i32, action: i32) -> Option<AnalogSource> {
        let name = name_at(&self.analog_actions(), action)?;
        self.action_set(action_set)?
            .analog
            .iter()
            .find(|binding| binding.name == name)
            .map(|binding| binding.source)
    }
}

fn distinct<'a>(names: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for name in names {
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    seen
}

fn handle_of<'a>(mut names: impl Iterator<Item = &'a str>, name: &str) -> i32 {
    names
        .position(|candidate| candidate == name)
        .and_then(|index| i32::try_from(index + 1).ok())
        .unwrap_or(0)
}

fn name_at<'a>(names: &[&'a str], handle: i32) -> Option<&'a str> {
    let index = usize::try_from(handle).ok()?.checked_sub(1)?;
    names.get(index).copied()
}

// Rumble played by the diagnostic probe
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct RumbleSettings {
    pub duration_ms: u32,
    pub strength: f64,
}

impl Default for RumbleSettings {
    fn default() -> Self {
        Self {
            duration_ms: 250,
            strength: 0.5,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BridgeConfig {
    pub log_level: String,
    pub poll_interval_ms: u64,
    pub probe_frames: u32,
    pub rumble: RumbleSettings,
    pub manifest: ActionManifest,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            poll_interval_ms: 16,
            probe_frames: 120,
            rumble: RumbleSettings::default(),
            manifest: ActionManifest::default(),
        }
    }
}

impl BridgeConfig {
    /// Loads the config from the default location
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            warn!("Config file {} does not exist, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml_str(&content)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.manifest.validate()?;
        debug!(
            "Config declares {} action sets",
            config.manifest.action_sets.len()
        );
        Ok(config)
    }

    pub fn default_path() -> PathBuf {
        let mut path = dirs::config_dir().unwrap_or_else(|| {
            warn!("Could not determine config directory, using current directory");
            PathBuf::from(".")
        });
        path.push(CONFIG_DIR);
        path.push(CONFIG_FILE);
        path
    }

    /// Configured log level, `INFO` when it does not parse
    pub fn level(&self) -> Level {
        Level::from_str(&self.log_level).unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using info", self.log_level);
            Level::INFO
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
log_level = "debug"
probe_frames = 10

[rumble]
duration_ms = 1000
strength = 0.75

[[manifest.action_sets]]
name = "Driving"

[[manifest.action_sets.digital]]
name = "horn"
button = "Y"

[[manifest.action_sets.analog]]
name = "steer"
source = "LeftStick"

[[manifest.action_sets]]
name = "OnFoot"

[[manifest.action_sets.digital]]
name = "jump"
button = "A"

[[manifest.action_sets.digital]]
name = "horn"
button = "X"
"#;

    #[test]
    fn parses_manifest_and_keeps_defaults_for_missing_fields() {
        let config = BridgeConfig::from_toml_str(SAMPLE).unwrap();

        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.probe_frames, 10);
        assert_eq!(config.poll_interval_ms, 16);
        assert_eq!(
            config.rumble,
            RumbleSettings {
                duration_ms: 1000,
                strength: 0.75
            }
        );
        assert_eq!(config.manifest.action_sets.len(), 2);
        assert!(config.manifest.action_sets[1].analog.is_empty());
    }

    #[test]
    fn handles_are_positions_plus_one() {
        let manifest = BridgeConfig::from_toml_str(SAMPLE).unwrap().manifest;

        assert_eq!(manifest.action_set_handle("Driving"), 1);
        assert_eq!(manifest.action_set_handle("OnFoot"), 2);
        assert_eq!(manifest.action_set_handle("Flying"), 0);

        // "horn" is declared in both sets but is one action
        assert_eq!(manifest.digital_actions(), vec!["horn", "jump"]);
        assert_eq!(manifest.digital_action_handle("jump"), 2);
        assert_eq!(manifest.analog_action_handle("steer"), 1);
        assert_eq!(manifest.analog_action_handle("horn"), 0);
    }

    #[test]
    fn bindings_are_resolved_per_set() {
        let manifest = BridgeConfig::from_toml_str(SAMPLE).unwrap().manifest;
        let horn = manifest.digital_action_handle("horn");

        assert_eq!(manifest.digital_binding(1, horn), Some(ButtonType::Y));
        assert_eq!(manifest.digital_binding(2, horn), Some(ButtonType::X));
        assert_eq!(manifest.digital_binding(1, 2), None);
        assert_eq!(manifest.digital_binding(0, horn), None);
        assert_eq!(manifest.analog_binding(1, 1), Some(AnalogSource::LeftStick));
        assert_eq!(manifest.analog_binding(2, 1), None);
    }

    #[test]
    fn duplicate_set_names_are_rejected() {
        let content = r#"
[[manifest.action_sets]]
name = "Menu"

[[manifest.action_sets]]
name = "Menu"
"#;
        assert!(matches!(
            BridgeConfig::from_toml_str(content),
            Err(ConfigError::ManifestError(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            BridgeConfig::from_toml_str("probe_frames = \"many\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = Path::new("/nonexistent/steam-input-bridge/config.toml");
        assert_eq!(BridgeConfig::load_from(path).unwrap(), BridgeConfig::default());
    }

    #[test]
    fn unknown_log_level_falls_back_to_info() {
        let config = BridgeConfig {
            log_level: "chatty".to_string(),
            ..Default::default()
        };
        assert_eq!(config.level(), Level::INFO);
    }
}
