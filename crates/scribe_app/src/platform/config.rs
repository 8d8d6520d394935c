use std::fs;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use scribe_engine::{CommandPdfRenderer, CookieCsrfProvider, UploadSettings, UPLOAD_ENDPOINT};
use scribe_logging::{scribe_info, scribe_warn};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

pub(crate) const DEFAULT_CONFIG_FILENAME: &str = "scribe.ron";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("unknown log level {0:?}")]
    LogLevel(String),
}

/// Settings for the page shell, stored as RON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Origin serving the storage endpoint.
    pub base_url: String,
    pub upload_endpoint: String,
    /// Cookie header of the logged-in session; also the CSRF token source.
    pub cookie: Option<String>,
    pub csrf_cookie_name: String,
    pub downloads_dir: PathBuf,
    /// HTML file holding the report region that gets exported.
    pub render_source: PathBuf,
    pub renderer_program: String,
    pub log_level: String,
    pub log_destination: LogDestination,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: UploadSettings::default().base_url,
            upload_endpoint: UPLOAD_ENDPOINT.to_string(),
            cookie: None,
            csrf_cookie_name: CookieCsrfProvider::DEFAULT_COOKIE_NAME.to_string(),
            downloads_dir: PathBuf::from("downloads"),
            render_source: PathBuf::from("render_output.html"),
            renderer_program: CommandPdfRenderer::DEFAULT_PROGRAM.to_string(),
            log_level: "info".to_string(),
            log_destination: LogDestination::File,
        }
    }
}

impl AppConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn upload_settings(&self) -> UploadSettings {
        UploadSettings {
            base_url: self.base_url.clone(),
            endpoint: self.upload_endpoint.clone(),
            cookie: self.cookie.clone(),
            ..UploadSettings::default()
        }
    }

    pub fn csrf_provider(&self) -> CookieCsrfProvider {
        CookieCsrfProvider::with_name(
            self.cookie.clone().unwrap_or_default(),
            self.csrf_cookie_name.clone(),
        )
    }
}

/// Loads the config at `path`; a missing file yields the defaults.
pub fn load(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            scribe_warn!("No config at {:?}, using defaults", path);
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    scribe_info!("Loaded config from {:?}", path);
    Ok(config)
}
