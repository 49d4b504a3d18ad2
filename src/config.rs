use crate::animation::AnimationMode;
use crate::error::MenuError;
use crate::layout::{DEFAULT_INNER_RADIUS, DEFAULT_OUTER_RADIUS, RingGeometry};
use crate::menu::Menu;
use crate::slice::{IconPath, SliceLabel};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Label of the slice offered when no configuration file exists yet.
pub const SETUP_LABEL: &str = "Configure fittsmenu";
const SETUP_ICON: &str = "preferences-system";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SliceConfig {
    pub label: SliceLabel,
    #[serde(default)]
    pub icon: Option<IconPath>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MenuConfig {
    #[serde(default = "default_outer_radius")]
    pub outer_radius: f64,
    #[serde(default = "default_inner_radius")]
    pub inner_radius: f64,
    #[serde(default)]
    pub animation: AnimationMode,
    #[serde(default)]
    pub fallback_icon: Option<IconPath>,
    #[serde(default)]
    pub slices: Vec<SliceConfig>,
}

fn default_outer_radius() -> f64 {
    DEFAULT_OUTER_RADIUS
}

fn default_inner_radius() -> f64 {
    DEFAULT_INNER_RADIUS
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            outer_radius: DEFAULT_OUTER_RADIUS,
            inner_radius: DEFAULT_INNER_RADIUS,
            animation: AnimationMode::default(),
            fallback_icon: None,
            slices: Vec::new(),
        }
    }
}

impl MenuConfig {
    /// Single-slice menu pointing the user at the configuration file.
    pub fn setup() -> Self {
        Self {
            slices: vec![SliceConfig {
                label: SliceLabel::from(SETUP_LABEL),
                icon: Some(IconPath::from(SETUP_ICON)),
            }],
            ..Self::default()
        }
    }

    pub fn geometry(&self) -> Result<RingGeometry, MenuError> {
        Ok(RingGeometry::new(self.outer_radius, self.inner_radius)?)
    }
}

impl<I> Menu<I> {
    pub fn from_config(config: &MenuConfig) -> Result<Self, MenuError> {
        let mut menu = Self::new(config.geometry()?, config.animation);
        for slice in &config.slices {
            menu.append(
                slice.label.clone(),
                slice.icon.clone().unwrap_or_else(|| IconPath::new("")),
            )?;
        }
        Ok(menu)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid menu: {0}")]
    Menu(#[from] MenuError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "libsexier", "fittsmenu").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

pub fn load_config() -> Result<MenuConfig, ConfigError> {
    let config_path = get_config_path()?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(config::Environment::with_prefix("FITTSMENU").try_parsing(true))
        .build()?;

    validated(s.try_deserialize()?)
}

/// Parses a TOML document with the same rules as the configuration file.
pub fn parse_config(toml: &str) -> Result<MenuConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    validated(s.try_deserialize()?)
}

fn validated(config: MenuConfig) -> Result<MenuConfig, ConfigError> {
    config.geometry()?;
    Ok(config)
}

pub fn load_or_setup() -> MenuConfig {
    if let Ok(path) = get_config_path()
        && !path.exists()
    {
        return MenuConfig::setup();
    }

    load_config().unwrap_or_else(|e| {
        log::error!("Failed to load config, falling back to setup menu: {}", e);
        MenuConfig::setup()
    })
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.animation, AnimationMode::CounterRotate);
        assert_eq!(config.outer_radius, 150.0);
        assert_eq!(config.inner_radius, 60.0);
        assert!(!config.slices.is_empty());

        let menu: Menu = Menu::from_config(&config).unwrap();
        assert_eq!(menu.len(), config.slices.len());
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = parse_config("animation = \"Pulse\"\n").unwrap();
        assert_eq!(config.animation, AnimationMode::Pulse);
        assert_eq!(config.outer_radius, DEFAULT_OUTER_RADIUS);
        assert!(config.slices.is_empty());
        assert!(config.fallback_icon.is_none());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let err = parse_config("outer_radius = 100.0\ninner_radius = 120.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Menu(MenuError::Geometry(_))));
    }

    #[test]
    fn test_slice_deserialization() {
        let json = r#"{
            "animation": "iscale",
            "slices": [
                { "label": "Edit Nodes", "icon": "/usr/share/icons/nodes.svg" },
                { "label": "Create Text" }
            ]
        }"#;
        let config: MenuConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.animation, AnimationMode::IconScale);

        let menu: Menu = Menu::from_config(&config).unwrap();
        let labels: Vec<_> = menu.slices().iter().map(|s| s.label().as_str()).collect();
        assert_eq!(labels, vec!["Edit Nodes", "Create Text"]);
        assert_eq!(menu.slices()[1].icon_path().as_str(), "");
    }

    #[test]
    fn test_setup_menu() {
        let menu: Menu = Menu::from_config(&MenuConfig::setup()).unwrap();
        assert_eq!(menu.len(), 1);
        assert_eq!(menu.slices()[0].label().as_str(), SETUP_LABEL);
    }
}
