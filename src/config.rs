use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::{EntranceDirection, VisualTheme};

/// Project defaults, also written out as the user's config on first run.
pub const BLUEPRINT: &str = include_str!("../quotepop.toml");

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PositionSettings {
    pub vertical_max: f64,
    pub horizontal_max: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    pub lifetime_ms: u64,
    pub spawn_interval_ms: u64,
    pub progress_poll_ms: u64,
    pub default_route: String,
    pub log_file: String,
    pub log_level: String,
    pub themes: Vec<VisualTheme>,
    pub directions: Vec<EntranceDirection>,
    pub position: PositionSettings,
}

/// The part of [`Settings`] the popup factory draws from.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupSettings {
    pub lifetime_ms: u64,
    pub vertical_max: f64,
    pub horizontal_max: f64,
    pub themes: Vec<VisualTheme>,
    pub directions: Vec<EntranceDirection>,
}

impl Default for PopupSettings {
    fn default() -> Self {
        Self {
            lifetime_ms: 10_000,
            vertical_max: 70.0,
            horizontal_max: 85.0,
            themes: VisualTheme::ALL.to_vec(),
            directions: EntranceDirection::ALL.to_vec(),
        }
    }
}

impl Settings {
    /// Loads the layered configuration:
    /// blueprint, user config, `./quotepop.toml`, `explicit` and `QUOTEPOP_*` variables.
    pub fn load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = blueprint();

        if let Some(user_config_path) = get_user_config_path() {
            // If the user config doesn't exist, create it from the blueprint
            if let Err(e) = ensure_user_config(&user_config_path) {
                eprintln!("could not write {}: {e}", user_config_path.display());
            }
            builder = builder.add_source(File::from(user_config_path).required(false));
        }

        builder = builder.add_source(File::with_name("quotepop.toml").required(false));

        if let Some(path) = explicit {
            let path = shellexpand::tilde(path).into_owned();
            builder = builder.add_source(File::from(PathBuf::from(path)).required(true));
        }

        builder = builder.add_source(environment(None));
        Self::finish(builder)
    }

    /// Blueprint defaults overlaid with a TOML document.
    pub fn from_toml(overlay: &str) -> Result<Self, ConfigError> {
        Self::finish(blueprint().add_source(File::from_str(overlay, FileFormat::Toml)))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: Settings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("lifetime_ms", self.lifetime_ms),
            ("spawn_interval_ms", self.spawn_interval_ms),
            ("progress_poll_ms", self.progress_poll_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::Message(format!("{key} must be greater than zero")));
            }
        }
        for (key, value) in [
            ("position.vertical_max", self.position.vertical_max),
            ("position.horizontal_max", self.position.horizontal_max),
        ] {
            if !(value > 0.0 && value <= 100.0) {
                return Err(ConfigError::Message(format!(
                    "{key} must be within (0, 100], got {value}"
                )));
            }
        }
        if self.themes.is_empty() {
            return Err(ConfigError::Message("themes must not be empty".into()));
        }
        if self.directions.is_empty() {
            return Err(ConfigError::Message("directions must not be empty".into()));
        }
        Ok(())
    }

    pub fn popup(&self) -> PopupSettings {
        PopupSettings {
            lifetime_ms: self.lifetime_ms,
            vertical_max: self.position.vertical_max,
            horizontal_max: self.position.horizontal_max,
            themes: self.themes.clone(),
            directions: self.directions.clone(),
        }
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    pub fn progress_poll(&self) -> Duration {
        Duration::from_millis(self.progress_poll_ms)
    }

    pub fn log_path(&self) -> PathBuf {
        PathBuf::from(shellexpand::tilde(&self.log_file).into_owned())
    }
}

fn blueprint() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(BLUEPRINT, FileFormat::Toml))
}

/// `QUOTEPOP_*` variables. `__` descends into tables (`QUOTEPOP_POSITION__VERTICAL_MAX`),
/// and `themes`/`directions` take comma-separated names.
/// `vars` replaces the process environment when given.
fn environment(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("QUOTEPOP")
        .prefix_separator("_")
        .separator("__")
        .list_separator(",")
        .with_list_parse_key("themes")
        .with_list_parse_key("directions")
        .try_parsing(true)
        .source(vars)
}

pub fn get_user_config_path() -> Option<PathBuf> {
    let mut path = dirs::home_dir()?;
    path.push(".config");
    path.push("quotepop");
    path.push("quotepop.toml");
    Some(path)
}

fn ensure_user_config(path: &Path) -> std::io::Result<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, BLUEPRINT)
}
