//! Backend session bootstrap.
//!
//! Startup authenticates against the data backend and loads the analysis
//! bundle before any UI exists. Either failure aborts the launch; the tiles
//! assume a live session and never re-check it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_BUNDLE_PATH, DEFAULT_CREDENTIALS_PATH};
use crate::data::bundle::DataBundle;

/// Service-account style credentials file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub project: String,
    pub token: String,
}

impl Credentials {
    pub fn load(path: &Path) -> Result<Credentials> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading credentials from {}", path.display()))?;
        let creds: Credentials = serde_json::from_str(&raw)
            .with_context(|| format!("parsing credentials in {}", path.display()))?;
        if creds.project.is_empty() || creds.token.is_empty() {
            bail!("credentials in {} are incomplete", path.display());
        }
        Ok(creds)
    }
}

/// An initialized backend session: validated identity plus the loaded bundle.
pub struct EarthSession {
    pub project: String,
    pub bundle: Arc<DataBundle>,
}

impl EarthSession {
    /// Authenticate and load the bundle. `offline` skips credential
    /// validation and runs anonymously against the local bundle.
    pub fn init(
        bundle_path: Option<&Path>,
        credentials_path: Option<&Path>,
        offline: bool,
    ) -> Result<EarthSession> {
        let project = if offline {
            log::info!("session: offline mode, skipping authentication");
            "offline".to_string()
        } else {
            let path = credentials_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CREDENTIALS_PATH));
            let creds = Credentials::load(&path)?;
            log::info!("session: authenticated for project '{}'", creds.project);
            creds.project
        };

        let path = bundle_path
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH));
        let bundle = DataBundle::load(&path)?;

        Ok(EarthSession {
            project,
            bundle: Arc::new(bundle),
        })
    }
}
