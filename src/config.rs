//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/raypainter/raypainter.toml`
//! 3. Local config: `--config <path>` or `./.raypainter.toml`
//! 4. Environment variables: `RAYPAINTER_*` prefix

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::Category;

/// Name of the local config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = ".raypainter.toml";

/// Prefix of environment variables overriding settings.
pub const ENV_PREFIX: &str = "RAYPAINTER";

/// An item placed into the world when the scene is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedItem {
    pub name: String,
    pub category: Category,
}

impl SeedItem {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub scene: Option<Vec<SeedItem>>,
    pub show_order: Option<bool>,
}

/// Unified configuration for raypainter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Show each item's sibling order next to its name
    pub show_order: bool,
    /// Items inserted into the world at startup, in insertion order
    pub scene: Vec<SeedItem>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_order: false,
            scene: vec![
                SeedItem::new("shape 1", Category::Shape),
                SeedItem::new("shape 2", Category::Shape),
                SeedItem::new("point light", Category::Light),
                SeedItem::new("ambient light", Category::Light),
                SeedItem::new("shape 3", Category::Shape),
            ],
        }
    }
}

/// Get the XDG config directory for raypainter.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "raypainter").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("raypainter.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay config onto self: scalars win if specified, a specified scene
    /// replaces the inherited one entirely.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            show_order: overlay.show_order.unwrap_or(self.show_order),
            scene: overlay.scene.clone().unwrap_or_else(|| self.scene.clone()),
        }
    }

    /// Load settings with layered precedence from the standard locations and
    /// the process environment.
    ///
    /// # Arguments
    /// * `local` - Optional local config file; it must exist when given
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_layers(global_config_path().as_deref(), local, None)
    }

    /// Load settings from explicit layers.
    ///
    /// # Arguments
    /// * `global` - Global config file, skipped if it does not exist
    /// * `local` - Optional local config file; it must exist when given
    /// * `env_vars` - Variables to read overrides from; `None` reads the process environment
    pub fn load_layers(
        global: Option<&Path>,
        local: Option<&Path>,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global.filter(|path| path.exists()) {
            debug!("loading global config: {}", global_path.display());
            current = current.merge_with(&load_raw_settings(global_path)?);
        }

        // 3. Local config
        if let Some(local_path) = local {
            debug!("loading local config: {}", local_path.display());
            current = current.merge_with(&load_raw_settings(local_path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env_vars)
    }

    /// Apply RAYPAINTER_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env_vars: Option<Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env_vars),
            )
            .build()
            .map_err(config_err)?;

        match config.get_bool("show_order") {
            Ok(val) => settings.show_order = val,
            Err(ConfigError::NotFound(_)) => {}
            Err(e) => return Err(config_err(e)),
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# raypainter configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/raypainter/raypainter.toml
#   Local:  ./.raypainter.toml or --config <path>
#   Env:    RAYPAINTER_* environment variables (e.g. RAYPAINTER_SHOW_ORDER=true)
#
# A `scene` given in a file replaces the inherited scene entirely.

# Show each item's sibling order next to its name
# show_order = false

# Items placed into the world at startup, in insertion order
# [[scene]]
# name = "shape 1"
# category = "shape"
#
# [[scene]]
# name = "point light"
# category = "light"
"#
        .to_string()
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

    #[test]
    fn given_defaults_then_scene_mixes_shapes_and_lights() {
        let settings = Settings::default();
        assert_eq!(settings.scene.len(), 5);
        assert_eq!(settings.scene[2], SeedItem::new("point light", Category::Light));
        assert!(!settings.show_order);
    }

    #[test]
    fn given_overlay_with_scene_when_merging_then_replaces_scene() {
        let base = Settings::default();
        let overlay = RawSettings {
            scene: Some(vec![SeedItem::new("sun", Category::Light)]),
            show_order: None,
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.scene, vec![SeedItem::new("sun", Category::Light)]);
        assert_eq!(result.show_order, base.show_order);
    }

    #[test]
    fn given_overlay_without_scene_when_merging_then_keeps_base() {
        let base = Settings::default();
        let overlay = RawSettings {
            scene: None,
            show_order: Some(true),
        };

        let result = base.merge_with(&overlay);

        assert_eq!(result.scene, base.scene);
        assert!(result.show_order);
    }

    #[test]
    fn given_settings_when_serialized_then_parses_back_as_raw() {
        let toml = Settings::default().to_toml().unwrap();
        let raw: RawSettings = toml::from_str(&toml).unwrap();
        assert_eq!(raw.scene.unwrap().len(), 5);
    }

    #[test]
    fn given_template_then_it_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.scene.is_none());
        assert!(raw.show_order.is_none());
    }
}
