//! Configuration resolution for imgnote
//!
//! Every tunable lives in one explicit `AnnotatorConfig` passed into the
//! components at construction, so tests can run independent ledgers and
//! image roots in one process. Values resolve in priority order:
//! CLI argument → environment variable → TOML config file → default.

use clap::ValueEnum;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors. Always fatal at process start.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Images root missing or not a directory
    #[error("Images root invalid: {0}")]
    InvalidImagesRoot(String),

    /// TOML config file unreadable or malformed
    #[error("Config file error: {0}")]
    ConfigFile(String),
}

/// How submitted tag strings are interpreted and persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    /// Tags stored verbatim as a list of strings (`tags` field).
    Raw,
    /// Tags parsed into category/sub-category/tag triples (`scene_tags`
    /// field); each accepted triple becomes its own record.
    Structured,
}

/// Optional on-disk configuration, `~/.config/imgnote/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct TomlConfig {
    pub images_root: Option<PathBuf>,
    pub ledger_file: Option<PathBuf>,
    pub tag_mode: Option<TagMode>,
    pub exclude_marker: Option<String>,
}

/// Resolved runtime configuration, fixed for the process lifetime.
#[derive(Debug, Clone)]
pub struct AnnotatorConfig {
    /// Root folder whose immediate subdirectories are "places".
    pub images_root: PathBuf,
    /// Ledger file for this labeling session.
    pub ledger_path: PathBuf,
    /// Files whose name contains this substring are never offered
    /// (dark-frame captures).
    pub exclude_marker: String,
    /// Recognized image extensions, lowercase without dots.
    pub image_extensions: Vec<String>,
    /// Raw-list vs structured-triple persistence.
    pub tag_mode: TagMode,
    /// HTTP listen port.
    pub port: u16,
}

impl AnnotatorConfig {
    /// Resolve configuration from CLI values, environment, and the TOML
    /// file, then validate the images root.
    ///
    /// A missing or non-directory images root is a configuration error,
    /// fatal at startup.
    pub fn resolve(
        cli_images_root: Option<&Path>,
        cli_date_folder: Option<&str>,
        cli_ledger_file: Option<&Path>,
        cli_tag_mode: Option<TagMode>,
        cli_exclude_marker: Option<&str>,
        port: u16,
    ) -> Result<Self, ConfigError> {
        let toml_config = load_toml_config()?;

        // Priority: CLI > ENV > TOML > default
        let mut images_root = cli_images_root
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("IMGNOTE_IMAGES_ROOT").ok().map(PathBuf::from))
            .or(toml_config.images_root)
            .unwrap_or_else(|| PathBuf::from("static/images"));

        if let Some(date_folder) = cli_date_folder {
            images_root = images_root.join(date_folder);
        }

        if !images_root.exists() {
            return Err(ConfigError::InvalidImagesRoot(format!(
                "{} does not exist",
                images_root.display()
            )));
        }
        if !images_root.is_dir() {
            return Err(ConfigError::InvalidImagesRoot(format!(
                "{} is not a directory",
                images_root.display()
            )));
        }

        let ledger_path = cli_ledger_file
            .map(Path::to_path_buf)
            .or_else(|| std::env::var("IMGNOTE_LEDGER_FILE").ok().map(PathBuf::from))
            .or(toml_config.ledger_file)
            .unwrap_or_else(|| PathBuf::from(default_ledger_name()));

        let tag_mode = cli_tag_mode
            .or(toml_config.tag_mode)
            .unwrap_or(TagMode::Raw);

        let exclude_marker = cli_exclude_marker
            .map(str::to_string)
            .or(toml_config.exclude_marker)
            .unwrap_or_else(|| "Dark".to_string());

        Ok(Self {
            images_root,
            ledger_path,
            exclude_marker,
            image_extensions: vec!["jpg".to_string(), "png".to_string()],
            tag_mode,
            port,
        })
    }

    /// Check whether a file name has a recognized image extension.
    /// Extension comparison is case-insensitive.
    pub fn is_image_file(&self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.image_extensions.iter().any(|known| known == &ext)
    }
}

/// Session-dated default ledger filename, `data_<YYYYMMDD>.json`.
pub fn default_ledger_name() -> String {
    format!("data_{}.json", chrono::Local::now().format("%Y%m%d"))
}

/// Load the optional TOML config file; absence is not an error.
fn load_toml_config() -> Result<TomlConfig, ConfigError> {
    let Some(path) = dirs::config_dir().map(|d| d.join("imgnote").join("config.toml")) else {
        return Ok(TomlConfig::default());
    };
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .map_err(|e| ConfigError::ConfigFile(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| ConfigError::ConfigFile(format!("parse {}: {}", path.display(), e)))
}
