use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::editor::DEFAULT_THEME;
use crate::core::TextEditorFactory;
use crate::sinks::{NewWindowSource, DEFAULT_ARCHIVE_NAME};
use crate::state::Layout;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: String,
    pub line_numbers: bool,
    pub tab_width: usize,
    pub layout: Layout,
    pub archive_name: String,
    /// Where downloads go. Defaults to the user's download directory.
    pub export_dir: Option<PathBuf>,
    /// When set, every preview run also writes the composed page here.
    pub preview_file: Option<PathBuf>,
    pub new_window_source: NewWindowSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            line_numbers: true,
            tab_width: 4,
            layout: Layout::default(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            export_dir: None,
            preview_file: None,
            new_window_source: NewWindowSource::default(),
        }
    }
}

impl Config {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("playpen").join("config.toml"))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the config at `path` (or the default location). A missing file
    /// yields the defaults; a broken one is logged and ignored.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("no config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("ignoring {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn editor_factory(&self) -> TextEditorFactory {
        TextEditorFactory {
            theme: self.theme.clone(),
            show_line_numbers: self.line_numbers,
            tab_width: self.tab_width.max(1),
        }
    }
}
