//! Application configuration.
//!
//! The configuration is a JSON file. Every field is optional; missing ones take their default.
//! [`AppConfig::locate`] looks for `tabletop.json` in the working directory first and then for
//! `tabletop/config.json` in the platform configuration directory.

use std::path::{Path, PathBuf};

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const LOCAL_CONFIG: &str = "tabletop.json";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub texture_dir: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
    pub camera: CameraConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Tabletop".to_string(),
            width: 1000,
            height: 800,
            fullscreen: false,
            texture_dir: PathBuf::from("Textures"),
            log_level: "info".to_string(),
            log_file: None,
            camera: CameraConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the configuration from `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text).map_err(|source| ConfigError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The first configuration file that exists, if any.
    pub fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.is_file() {
            return Some(local);
        }
        dirs::config_dir()
            .map(|dir| dir.join("tabletop").join("config.json"))
            .filter(|path| path.is_file())
    }

    /// Loads the located configuration, falling back to defaults.
    ///
    /// Runs before logging is set up, so problems are returned alongside the config for the
    /// caller to report.
    pub fn load_or_default() -> (Self, Option<ConfigError>) {
        match Self::locate() {
            Some(path) => match Self::load(&path) {
                Ok(config) => (config, None),
                Err(e) => (Self::default(), Some(e)),
            },
            None => (Self::default(), None),
        }
    }

    /// The configured log level, or `info` if the name is not recognised.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.log_level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

/// A fixed perspective camera.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 10.0],
            target: [0.0, 1.0, -2.0],
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(Vec3::from(self.position), Vec3::from(self.target), Vec3::Y)
    }

    pub fn projection(&self, width: u32, height: u32) -> Mat4 {
        let aspect = width.max(1) as f32 / height.max(1) as f32;
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }
}
