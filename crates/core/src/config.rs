//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the stores. Request
//! handling never reads process-wide environment variables, so several store instances with
//! different roots can coexist (tests do exactly that).

use crate::constants::{DEVELOPMENT_HOST, POSTS_DIR_NAME, PROJECTS_DIR_NAME};
use crate::{StoreError, StoreResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Deployment mode controlling absolute image URLs and CORS.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DeploymentMode {
    Development,
    #[default]
    Production,
}

impl DeploymentMode {
    pub fn is_development(self) -> bool {
        matches!(self, DeploymentMode::Development)
    }
}

impl FromStr for DeploymentMode {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(DeploymentMode::Development),
            "production" | "prod" => Ok(DeploymentMode::Production),
            other => Err(StoreError::Config(format!(
                "unknown deployment mode '{other}' (expected development or production)"
            ))),
        }
    }
}

impl std::fmt::Display for DeploymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeploymentMode::Development => f.write_str("development"),
            DeploymentMode::Production => f.write_str("production"),
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    public_dir: PathBuf,
    upload_dir: PathBuf,
    mode: DeploymentMode,
    image_base_url: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// In development mode image URLs are absolute (`http://localhost:<port>`); otherwise they are
    /// relative to the serving origin.
    pub fn new(
        public_dir: PathBuf,
        upload_dir: PathBuf,
        mode: DeploymentMode,
        port: u16,
    ) -> Self {
        let image_base_url = if mode.is_development() {
            format!("{DEVELOPMENT_HOST}:{port}")
        } else {
            String::new()
        };

        Self {
            public_dir,
            upload_dir,
            mode,
            image_base_url,
        }
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.public_dir.join(POSTS_DIR_NAME)
    }

    pub fn projects_dir(&self) -> PathBuf {
        self.public_dir.join(PROJECTS_DIR_NAME)
    }

    pub fn upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn mode(&self) -> DeploymentMode {
        self.mode
    }

    pub fn image_base_url(&self) -> &str {
        &self.image_base_url
    }
}

/// Parse the deployment mode from an optional string value.
///
/// Only `development` (or `dev`) enables development mode. Anything else, including an
/// unset, empty or unrecognised value such as `staging`, yields
/// [`DeploymentMode::Production`].
pub fn deployment_mode_from_env_value(value: Option<String>) -> DeploymentMode {
    let Some(value) = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
    else {
        return DeploymentMode::default();
    };

    value.parse::<DeploymentMode>().unwrap_or_else(|e| {
        tracing::warn!("{}; using production", e);
        DeploymentMode::Production
    })
}

/// Parse a numeric setting from an optional string value, falling back to `default`.
pub fn number_from_env_value<T: FromStr>(
    name: &str,
    value: Option<String>,
    default: T,
) -> StoreResult<T> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v
            .parse::<T>()
            .map_err(|_| StoreError::Config(format!("{name} must be a number, got '{v}'"))),
    }
}
