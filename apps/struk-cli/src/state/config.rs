//! # Application Configuration
//!
//! Loaded once at startup; read-only afterwards, so no mutex.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line (`--backend`, `--config`)
//! 2. Environment variables (`STRUK_*`)
//! 3. Config file (`config.toml` in the platform config directory)
//! 4. Defaults (this file)
//!
//! ## Configuration File Format
//! ```toml
//! [backend]
//! base_url = "http://localhost:8000"
//!
//! [brand]
//! name = "VELLIXAO"
//! phone = "085706400133"
//! logo_url = "https://files.catbox.moe/a9u0pd.png"
//! receipt_kind = "Struk"
//!
//! [export]
//! output_dir = "/home/kasir/Downloads"
//! scale = 3                # 2..=4
//! asset_timeout_secs = 15
//! origin = "http://localhost:5173"
//!
//! [display]
//! locale = "id"
//! preview = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use struk_core::currency::{RupiahFormatter, DEFAULT_LOCALE};
use struk_export::asset::DEFAULT_ORIGIN;
use struk_export::raster::{MAX_SCALE, MIN_SCALE};
use struk_export::snapshot::DEFAULT_SCALE;
use struk_export::{Brand, ExportOptions};
use struk_issuer::IssuerConfig;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Configuration failures at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {reason}")]
    Read { path: String, reason: String },

    #[error("Failed to parse config {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// `[export]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Where PNGs land. Unset: the user's download directory.
    pub output_dir: Option<PathBuf>,
    pub scale: u32,
    pub asset_timeout_secs: u64,
    /// Origin presented when fetching the logo.
    pub origin: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: None,
            scale: DEFAULT_SCALE,
            asset_timeout_secs: 15,
            origin: DEFAULT_ORIGIN.to_string(),
        }
    }
}

/// `[display]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    pub locale: String,
    /// Whether the receipt preview is mounted (and so capturable).
    pub preview: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            locale: DEFAULT_LOCALE.to_string(),
            preview: true,
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub backend: IssuerConfig,

    #[serde(default)]
    pub brand: Brand,

    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub display: DisplaySettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.backend
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        if !(MIN_SCALE..=MAX_SCALE).contains(&self.export.scale) {
            return Err(ConfigError::Invalid(format!(
                "export.scale must be between {} and {}, got {}",
                MIN_SCALE, MAX_SCALE, self.export.scale
            )));
        }

        if self.export.asset_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "export.asset_timeout_secs must be greater than 0".into(),
            ));
        }

        if self.brand.name.trim().is_empty() {
            return Err(ConfigError::Invalid("brand.name must not be empty".into()));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.backend.apply_env_overrides();

        if let Ok(name) = std::env::var("STRUK_BRAND_NAME") {
            self.brand.name = name;
        }

        if let Ok(phone) = std::env::var("STRUK_BRAND_PHONE") {
            self.brand.phone = phone;
        }

        // An empty value turns the logo off.
        if let Ok(url) = std::env::var("STRUK_LOGO_URL") {
            debug!(url = %url, "Overriding logo URL from environment");
            self.brand.logo_url = Some(url).filter(|u| !u.trim().is_empty());
        }

        if let Ok(dir) = std::env::var("STRUK_EXPORT_DIR") {
            self.export.output_dir = Some(PathBuf::from(dir));
        }

        if let Ok(locale) = std::env::var("STRUK_LOCALE") {
            self.display.locale = locale;
        }

        if let Ok(scale) = std::env::var("STRUK_EXPORT_SCALE") {
            match scale.parse::<u32>() {
                Ok(s) => self.export.scale = s,
                Err(_) => warn!(scale = %scale, "Ignoring non-numeric STRUK_EXPORT_SCALE"),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "struk", "struk")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Directory exported PNGs are written to.
    pub fn export_dir(&self) -> PathBuf {
        self.export
            .output_dir
            .clone()
            .or_else(|| {
                directories::UserDirs::new().and_then(|d| d.download_dir().map(Path::to_path_buf))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            scale: self.export.scale,
            asset_timeout: Duration::from_secs(self.export.asset_timeout_secs),
            ..ExportOptions::for_brand(&self.brand)
        }
    }

    pub fn formatter(&self) -> RupiahFormatter {
        RupiahFormatter::new(self.display.locale.clone())
    }
}
