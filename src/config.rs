use crate::convert::ConvertOptions;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Sidebar width bounds, as a percentage of the terminal width.
pub const SIDEBAR_WIDTH_RANGE: std::ops::RangeInclusive<u16> = 20..=60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine config directory")]
    NoConfigDir,

    #[error("failed to write config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to persist config: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub ui: UiConfig,
}

/// Where content lives and how it is converted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory that catalog paths are relative to
    #[serde(default = "default_root")]
    pub root: PathBuf,

    /// Optional TOML catalog replacing the compiled-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,

    /// Fence language for notebook code cells that declare none
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Hide YAML frontmatter (---\n...\n---) at the start of markdown files
    #[serde(default)]
    pub strip_frontmatter: bool,

    /// Show notebook cell outputs after their code
    #[serde(default = "default_render_outputs")]
    pub render_outputs: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            catalog: None,
            default_language: default_language(),
            strip_frontmatter: false,
            render_outputs: default_render_outputs(),
        }
    }
}

impl ContentConfig {
    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions {
            default_language: self.default_language.clone(),
            strip_frontmatter: self.strip_frontmatter,
            render_outputs: self.render_outputs,
        }
    }
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_language() -> String {
    "python".to_string()
}

fn default_render_outputs() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_sidebar_width")]
    pub sidebar_width: u16,

    /// Id opened when the browser starts
    #[serde(default = "default_start_page")]
    pub start_page: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            sidebar_width: default_sidebar_width(),
            start_page: default_start_page(),
        }
    }
}

fn default_sidebar_width() -> u16 {
    30
}

fn default_start_page() -> String {
    "readme".to_string()
}

impl Config {
    /// Get the platform-specific config file path
    /// - macOS: ~/Library/Application Support/mastery/config.toml
    /// - Linux: ~/.config/mastery/config.toml
    /// - Windows: %APPDATA%/mastery/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("mastery").join("config.toml"))
    }

    /// Load config from file, or return default if the file is missing or invalid
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|contents| toml::from_str::<Config>(&contents).ok())
            .map(Config::normalized)
            .unwrap_or_default()
    }

    /// Save config to the platform config path
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Write the config atomically: a temp file in the same directory is
    /// renamed over the target.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let contents = toml::to_string_pretty(self)?;
        let mut file = NamedTempFile::new_in(parent)?;
        file.write_all(contents.as_bytes())?;
        file.persist(path)?;

        Ok(())
    }

    /// Update sidebar width and save it to the platform config path
    pub fn set_sidebar_width(&mut self, width: u16) -> Result<(), ConfigError> {
        let path = Self::config_path().ok_or(ConfigError::NoConfigDir)?;
        self.set_sidebar_width_in(&path, width)
    }

    /// Update sidebar width and write only that field into the file at
    /// `path`. The rest of the file is re-read from disk, so values this
    /// struct picked up from command-line flags are never persisted.
    pub fn set_sidebar_width_in(&mut self, path: &Path, width: u16) -> Result<(), ConfigError> {
        self.ui.sidebar_width = clamp_sidebar_width(width);

        let mut on_disk = Self::load_from(path);
        on_disk.ui.sidebar_width = self.ui.sidebar_width;
        on_disk.save_to(path)
    }

    fn normalized(mut self) -> Self {
        self.ui.sidebar_width = clamp_sidebar_width(self.ui.sidebar_width);
        self
    }
}

pub fn clamp_sidebar_width(width: u16) -> u16 {
    width.clamp(*SIDEBAR_WIDTH_RANGE.start(), *SIDEBAR_WIDTH_RANGE.end())
}
