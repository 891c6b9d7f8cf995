use crate::gui::button::{
    ANIMATION_MS, DEFAULT_COLLAPSE_RADIUS, DEFAULT_EXPAND_RADIUS, DEFAULT_LABEL, DEFAULT_TEXT_SIZE,
};
use derive_more::{AsRef, Deref, Display, From, Into};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid colour '{0}', expected #rrggbb or #rrggbbaa")]
pub struct ColorParseError(String);

/// An sRGB colour written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgba<f64>);

impl Color {
    pub fn rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(Srgba::new(r, g, b, a).into_format())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ColorParseError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(err());
        }

        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
        let alpha = if hex.len() == 8 { channel(6)? } else { u8::MAX };

        Ok(Self::rgba8(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let c: Srgba<u8> = self.0.into_format();
        write!(f, "#{:02x}{:02x}{:02x}", c.red, c.green, c.blue)?;
        if c.alpha != u8::MAX {
            write!(f, "{:02x}", c.alpha)?;
        }
        Ok(())
    }
}

/// Space subtracted from the allocated size before laying out the circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Padding {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub label: Label,
    pub text_size: f64,
    pub text_color: Color,
    pub button_color: Color,
    pub collapse_radius: u32,
    pub expand_radius: u32,
    pub animation_ms: u32,
    pub padding: Padding,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label: Label::new(DEFAULT_LABEL),
            text_size: DEFAULT_TEXT_SIZE,
            text_color: Color::rgba8(0x88, 0x88, 0x88, 0xff),
            button_color: Color::rgba8(0xff, 0x00, 0x00, 0xff),
            collapse_radius: DEFAULT_COLLAPSE_RADIUS,
            expand_radius: DEFAULT_EXPAND_RADIUS,
            animation_ms: ANIMATION_MS,
            padding: Padding::default(),
        }
    }
}

impl Config {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.expand_radius < self.collapse_radius {
            return Err(ConfigError::Invalid(format!(
                "expand_radius ({}) is smaller than collapse_radius ({})",
                self.expand_radius, self.collapse_radius
            )));
        }
        if !(self.text_size.is_finite() && self.text_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "text_size must be positive, got {}",
                self.text_size
            )));
        }
        if self.animation_ms == 0 {
            return Err(ConfigError::Invalid("animation_ms must be positive".into()));
        }
        Ok(self)
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "gjz", "circle-button").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

/// Uses `explicit` when given, otherwise the per-user config location.
pub fn resolve_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => get_config_path(),
    }
}

pub fn load_config(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    let config_path = resolve_path(explicit)?;

    let s = config::Config::builder()
        .add_source(config::File::from(config_path).required(false))
        .add_source(
            config::Environment::with_prefix("CIRCLE_BUTTON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    s.try_deserialize::<Config>()?.validate()
}

pub fn load_or_default(explicit: Option<&Path>) -> Config {
    match load_config(explicit) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Falling back to default config: {}", e);
            Config::default()
        }
    }
}

pub fn write_default_config(explicit: Option<&Path>) -> std::io::Result<PathBuf> {
    let path =
        resolve_path(explicit).map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

use crate::events::AppEvent;
use async_channel::Sender;

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }
    log::debug!("Watching {}", config_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_deserialization() {
        let cases = vec![
            ("\"#ff0000\"", Color::rgba8(255, 0, 0, 255)),
            ("\"#FF0000\"", Color::rgba8(255, 0, 0, 255)),
            ("\" #888888 \"", Color::rgba8(0x88, 0x88, 0x88, 255)),
            ("\"#00ff0080\"", Color::rgba8(0, 255, 0, 0x80)),
        ];

        for (json, expected) in cases {
            let deserialized: Color = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_color_rejects_malformed() {
        for bad in ["ff0000", "#ff00", "#ff00000", "#gg0000", "#ff00é0"] {
            assert!(bad.parse::<Color>().is_err(), "accepted {}", bad);
        }
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::rgba8(255, 0, 0, 255).to_string(), "#ff0000");
        assert_eq!(Color::rgba8(0, 16, 255, 0x80).to_string(), "#0010ff80");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r##"{ "label": "Go", "expand_radius": 400, "padding": { "bottom": 12 } }"##;
        let cfg: Config = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.label.as_str(), "Go");
        assert_eq!(cfg.expand_radius, 400);
        assert_eq!(cfg.collapse_radius, DEFAULT_COLLAPSE_RADIUS);
        assert_eq!(cfg.padding.bottom, 12);
        assert_eq!(cfg.padding.left, 0);
        assert_eq!(cfg.button_color, Color::rgba8(255, 0, 0, 255));
    }

    #[test]
    fn test_default_config_file_matches_defaults() {
        let cfg: Config = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_validation() {
        assert!(Config::default().validate().is_ok());

        let inverted = Config {
            collapse_radius: 400,
            expand_radius: 100,
            ..Config::default()
        };
        assert!(matches!(inverted.validate(), Err(ConfigError::Invalid(_))));

        let no_text = Config {
            text_size: 0.0,
            ..Config::default()
        };
        assert!(matches!(no_text.validate(), Err(ConfigError::Invalid(_))));

        let frozen = Config {
            animation_ms: 0,
            ..Config::default()
        };
        assert!(matches!(frozen.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        // exported overrides would legitimately change the result
        if std::env::vars().any(|(k, _)| k.starts_with("CIRCLE_BUTTON_")) {
            return;
        }
        let path = std::env::temp_dir().join("circle-button-test-missing").join("config.toml");
        let cfg = load_config(Some(&path)).unwrap();
        assert_eq!(cfg, Config::default());
    }
}
