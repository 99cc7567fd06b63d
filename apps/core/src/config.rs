use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use xdg::BaseDirectories;

use crate::view::DEFAULT_APPS_PER_ROW;

pub const APP_PREFIX: &str = "panelmenu";
pub const DEFAULT_ICON: &str = "start-here";
const CONFIG_FILE_NAME: &str = "config.toml";
const FAVORITES_FILE_NAME: &str = "favorites.list";
const HIDDEN_FILE_NAME: &str = "hidden.list";

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Encode(toml::ser::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "config io error: {error}"),
            Self::Parse(error) => write!(f, "config parse error: {error}"),
            Self::Encode(error) => write!(f, "config encode error: {error}"),
            Self::Invalid(reason) => write!(f, "invalid config: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        Self::Encode(value)
    }
}

/// Per-user configuration directory; falls back to a temp location when
/// no home directory is available (headless test environments).
pub fn config_dir() -> PathBuf {
    BaseDirectories::with_prefix(APP_PREFIX)
        .get_config_home()
        .unwrap_or_else(|| std::env::temp_dir().join(APP_PREFIX))
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Panel button icon: a theme name or an absolute image path.
    pub icon: String,
    pub apps_per_row: usize,
    /// Extra directories to scan for `.desktop` files; empty means the
    /// system defaults.
    pub catalog_roots: Vec<PathBuf>,
    pub favorites_path: PathBuf,
    pub hidden_path: PathBuf,
    #[serde(skip)]
    pub config_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        let base = config_dir();
        Self {
            icon: DEFAULT_ICON.to_string(),
            apps_per_row: DEFAULT_APPS_PER_ROW,
            catalog_roots: Vec::new(),
            favorites_path: base.join(FAVORITES_FILE_NAME),
            hidden_path: base.join(HIDDEN_FILE_NAME),
            config_path: base.join(CONFIG_FILE_NAME),
        }
    }
}

pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    if cfg.icon.trim().is_empty() {
        return Err(ConfigError::Invalid("icon is required".into()));
    }
    if cfg.apps_per_row == 0 {
        return Err(ConfigError::Invalid("apps_per_row must be at least 1".into()));
    }
    if cfg.favorites_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("favorites_path is required".into()));
    }
    if cfg.hidden_path.as_os_str().is_empty() {
        return Err(ConfigError::Invalid("hidden_path is required".into()));
    }
    if cfg.favorites_path == cfg.hidden_path {
        return Err(ConfigError::Invalid(
            "favorites_path and hidden_path must not share a file".into(),
        ));
    }
    Ok(())
}

/// Loads the configuration, or the defaults when the file is missing.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config_dir().join(CONFIG_FILE_NAME));

    let mut cfg = if path.exists() {
        let raw = fs::read_to_string(&path)?;
        toml::from_str::<Config>(&raw)?
    } else {
        Config::default()
    };
    cfg.config_path = path;
    validate(&cfg)?;
    Ok(cfg)
}

pub fn save(cfg: &Config) -> Result<(), ConfigError> {
    validate(cfg)?;
    if let Some(parent) = cfg.config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let encoded = toml::to_string_pretty(cfg)?;
    fs::write(&cfg.config_path, encoded)?;
    Ok(())
}
