//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default values for newly created recipes
//! - Notification preferences for timer expiry
//!
//! Configuration is stored at `~/.config/brewmaster/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::data_dir;
use crate::recipe::{HopItem, MaltItem, Recipe};

/// Defaults applied to newly created recipes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrewingDefaults {
    #[serde(default = "default_mash_temp")]
    pub mash_temp: f64,
    #[serde(default = "default_boil_temp")]
    pub boil_temp: f64,
    #[serde(default = "default_boil_time")]
    pub boil_time: u32,
    #[serde(default = "default_original_gravity")]
    pub target_original_gravity: f64,
    #[serde(default = "default_final_gravity")]
    pub target_final_gravity: f64,
    #[serde(default = "default_water_amount")]
    pub initial_water_amount: f64,
}

/// Notification configuration for timer expiry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_volume")]
    pub volume: u32,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/brewmaster/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub brewing: BrewingDefaults,
    #[serde(default)]
    pub notifications: NotificationsConfig,
}

// Default functions
fn default_mash_temp() -> f64 {
    67.0
}
fn default_boil_temp() -> f64 {
    102.0
}
fn default_boil_time() -> u32 {
    60
}
fn default_original_gravity() -> f64 {
    1.050
}
fn default_final_gravity() -> f64 {
    1.010
}
fn default_water_amount() -> f64 {
    25.0
}
fn default_true() -> bool {
    true
}
fn default_volume() -> u32 {
    50
}

impl Default for BrewingDefaults {
    fn default() -> Self {
        Self {
            mash_temp: default_mash_temp(),
            boil_temp: default_boil_temp(),
            boil_time: default_boil_time(),
            target_original_gravity: default_original_gravity(),
            target_final_gravity: default_final_gravity(),
            initial_water_amount: default_water_amount(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            volume: default_volume(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            brewing: BrewingDefaults::default(),
            notifications: NotificationsConfig::default(),
        }
    }
}

impl Config {
    /// Location of the config file on disk.
    pub fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key and persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed
    /// as the existing value's type, or the config cannot be saved.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), Box<dyn std::error::Error>> {
        let mut json = serde_json::to_value(&*self)?;
        let (parent_path, leaf) = match key.rsplit_once('.') {
            Some((parent, leaf)) => (Some(parent), leaf),
            None => (None, key),
        };
        let mut current = &mut json;
        if let Some(parent_path) = parent_path {
            for part in parent_path.split('.') {
                current = current
                    .get_mut(part)
                    .ok_or_else(|| format!("unknown config key: {key}"))?;
            }
        }
        let obj = current
            .as_object_mut()
            .ok_or_else(|| format!("unknown config key: {key}"))?;
        let existing = obj
            .get(leaf)
            .ok_or_else(|| format!("unknown config key: {key}"))?;
        let new_value = match existing {
            serde_json::Value::Bool(_) => serde_json::Value::Bool(value.parse::<bool>()?),
            serde_json::Value::Number(_) => {
                if let Ok(n) = value.parse::<u64>() {
                    serde_json::Value::Number(n.into())
                } else if let Ok(n) = value.parse::<f64>() {
                    serde_json::Number::from_f64(n)
                        .map(serde_json::Value::Number)
                        .ok_or_else(|| format!("cannot parse '{value}' as number"))?
                } else {
                    return Err(format!("cannot parse '{value}' as number").into());
                }
            }
            _ => serde_json::Value::String(value.into()),
        };
        obj.insert(leaf.to_string(), new_value);
        *self = serde_json::from_value(json)?;
        self.save()?;
        Ok(())
    }

    /// A fresh recipe seeded from the configured defaults, with one blank
    /// malt and hop row ready for editing.
    pub fn new_recipe(&self, name: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            malts: vec![MaltItem::default()],
            hops: vec![HopItem::default()],
            yeast: String::new(),
            mash_temp: self.brewing.mash_temp,
            boil_temp: self.brewing.boil_temp,
            boil_time: self.brewing.boil_time,
            target_original_gravity: self.brewing.target_original_gravity,
            target_final_gravity: self.brewing.target_final_gravity,
            initial_water_amount: self.brewing.initial_water_amount,
            notes: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.brewing.mash_temp, 67.0);
        assert_eq!(parsed.notifications.volume, 50);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("brewing.boil_time").as_deref(), Some("60"));
        assert_eq!(cfg.get("notifications.enabled").as_deref(), Some("true"));
        assert!(cfg.get("brewing.missing_key").is_none());
    }

    #[test]
    fn new_recipe_uses_configured_defaults() {
        let mut cfg = Config::default();
        cfg.brewing.mash_temp = 64.0;
        let recipe = cfg.new_recipe("Saison");
        assert_eq!(recipe.name, "Saison");
        assert_eq!(recipe.mash_temp, 64.0);
        assert_eq!(recipe.malts.len(), 1);
        assert!(recipe.malts[0].name.is_empty());
    }
}
