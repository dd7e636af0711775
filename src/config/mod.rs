// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Configuration for fairbot
//!
//! The effective configuration is a shallow merge of three layers, later
//! layers winning key by key:
//!
//! 1. the default bundled with fairbot
//! 2. a `.howfairis.yml` (or named) file on the checked repository
//! 3. a local file named on the command line

use crate::checks::Recommendation;
use crate::error::{FairbotError, Result};
use crate::http::{self, Fetch};
use crate::repo::Repo;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, warn};

/// Configuration file looked up on the remote when no name is given
pub const DEFAULT_REMOTE_CONFIG: &str = ".howfairis.yml";

/// Bundled default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../data/default-config.yml");

/// One configuration layer. Unknown keys and non-boolean values are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_repository: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_license: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_registry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_citation: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_checklist: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_comments: Option<bool>,
}

impl Settings {
    /// Parse YAML text.
    ///
    /// Invalid YAML is a [`FairbotError::ConfigParse`]; valid YAML that does
    /// not fit the schema is a [`FairbotError::ConfigSchema`]. An empty
    /// document is an empty layer.
    pub fn from_yaml(text: &str, location: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: serde_yaml::Value =
            serde_yaml::from_str(text).map_err(|source| FairbotError::ConfigParse {
                location: location.to_string(),
                source,
            })?;
        if value.is_null() {
            return Ok(Self::default());
        }
        serde_yaml::from_value(value).map_err(|source| FairbotError::ConfigSchema {
            location: location.to_string(),
            source,
        })
    }

    /// Shallow merge: keys set in `over` replace keys in `self`
    pub fn merge(self, over: Settings) -> Settings {
        Settings {
            force_repository: over.force_repository.or(self.force_repository),
            force_license: over.force_license.or(self.force_license),
            force_registry: over.force_registry.or(self.force_registry),
            force_citation: over.force_citation.or(self.force_citation),
            force_checklist: over.force_checklist.or(self.force_checklist),
            include_comments: over.include_comments.or(self.include_comments),
        }
    }
}

/// Effective configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    merged: Settings,
}

impl Config {
    /// Load all three layers and merge them
    pub async fn resolve(
        fetch: &dyn Fetch,
        repo: &Repo,
        local: Option<&Path>,
        ignore_remote: bool,
    ) -> Result<Self> {
        let default = load_default();
        let remote = if ignore_remote {
            debug!("Ignoring configuration files on the remote");
            Settings::default()
        } else {
            load_remote(fetch, repo).await?
        };
        let user = match local {
            Some(path) => load_local(path)?,
            None => Settings::default(),
        };
        Ok(Self::from_layers(default, remote, user))
    }

    /// Merge already-loaded layers
    pub fn from_layers(default: Settings, remote: Settings, user: Settings) -> Self {
        let merged = default.merge(remote).merge(user);
        debug!(?merged, "Effective configuration");
        Self { merged }
    }

    pub fn settings(&self) -> &Settings {
        &self.merged
    }

    pub fn force_repository(&self) -> Option<bool> {
        self.merged.force_repository
    }

    pub fn force_license(&self) -> Option<bool> {
        self.merged.force_license
    }

    pub fn force_registry(&self) -> Option<bool> {
        self.merged.force_registry
    }

    pub fn force_citation(&self) -> Option<bool> {
        self.merged.force_citation
    }

    pub fn force_checklist(&self) -> Option<bool> {
        self.merged.force_checklist
    }

    pub fn include_comments(&self) -> Option<bool> {
        self.merged.include_comments
    }

    /// Force-flag for one recommendation
    pub fn force(&self, recommendation: Recommendation) -> Option<bool> {
        match recommendation {
            Recommendation::Repository => self.force_repository(),
            Recommendation::License => self.force_license(),
            Recommendation::Registry => self.force_registry(),
            Recommendation::Citation => self.force_citation(),
            Recommendation::Checklist => self.force_checklist(),
        }
    }
}

/// The bundled default layer; an invalid default degrades to an empty layer
pub fn load_default() -> Settings {
    default_from_text(DEFAULT_CONFIG)
}

fn default_from_text(text: &str) -> Settings {
    match Settings::from_yaml(text, "bundled default configuration") {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "Default configuration should follow the schema to be considered");
            Settings::default()
        }
    }
}

/// Layer from the repository's configuration file.
///
/// A missing default-named file is an empty layer; a missing explicitly named
/// one is fatal. Invalid YAML is fatal, schema violations are ignored.
pub async fn load_remote(fetch: &dyn Fetch, repo: &Repo) -> Result<Settings> {
    let filename = repo.config_file().unwrap_or(DEFAULT_REMOTE_CONFIG);
    let url = repo.raw_url(filename);

    let Some(text) = http::get_ok(fetch, &url).await else {
        if repo.config_file().is_some() {
            return Err(FairbotError::ConfigNotFound(url));
        }
        debug!(%url, "No configuration file on the remote");
        return Ok(Settings::default());
    };

    info!(%url, "Using the configuration file");
    match Settings::from_yaml(&text, &url) {
        Ok(settings) => Ok(settings),
        Err(FairbotError::ConfigSchema { location, source }) => {
            warn!(%location, error = %source, "Repository's configuration file should follow the schema to be considered");
            Ok(Settings::default())
        }
        Err(e) => Err(e),
    }
}

/// Layer from a local file, which must exist and follow the schema
pub fn load_local(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(FairbotError::ConfigNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let settings = Settings::from_yaml(&text, &path.display().to_string())?;
    info!(path = %path.display(), "Using local configuration file");
    Ok(settings)
}
