/// Application configuration
///
/// Defaults cover everything; an optional JSON file can override any field:
/// - Linux: ~/.config/course-list/config.json
/// - macOS: ~/Library/Application Support/course-list/config.json
/// - Windows: %APPDATA%\course-list\config.json

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

use crate::ui::remote_image::Frame;

/// Catalog endpoint the list is populated from
pub const DEFAULT_ENDPOINT: &str = "https://iosacademy.io/api/v1/courses/index.php";

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// URL returning a JSON array of `{name, image}`
    pub endpoint: String,
    /// Thumbnail frame width in layout units
    pub thumbnail_width: f32,
    /// Thumbnail frame height in layout units
    pub thumbnail_height: f32,
    pub window_width: f32,
    pub window_height: f32,
    /// Per-request timeout; `None` leaves the transport default in place
    pub request_timeout_secs: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            thumbnail_width: 130.0,
            thumbnail_height: 70.0,
            window_width: 420.0,
            window_height: 720.0,
            request_timeout_secs: None,
        }
    }
}

impl AppConfig {
    /// Load from the user's config directory, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => AppConfig::default(),
        }
    }

    /// Load from an explicit path.
    ///
    /// A missing file is normal and yields defaults. A file that exists but
    /// cannot be read or parsed is logged and also yields defaults.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return AppConfig::default();
        }

        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|text| serde_json::from_str::<AppConfig>(&text).map_err(|e| e.to_string()));

        match parsed {
            Ok(config) => {
                info!("⚙️  Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("⚠️  Ignoring config at {}: {}", path.display(), e);
                AppConfig::default()
            }
        }
    }

    /// Get the path where the config file would live
    fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("course-list");
        path.push("config.json");
        Some(path)
    }

    pub fn thumbnail_frame(&self) -> Frame {
        Frame::new(self.thumbnail_width, self.thumbnail_height)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}
