// SPDX-License-Identifier: PMPL-1.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Error types for fairbot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FairbotError>;

#[derive(Error, Debug)]
pub enum FairbotError {
    #[error("Unsupported repository platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Malformed repository URL: {0}")]
    MalformedUrl(String),

    #[error("Could not find the configuration file {0}")]
    ConfigNotFound(String),

    #[error("Problem loading YAML configuration from {location}")]
    ConfigParse {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Configuration file {location} does not follow the schema")]
    ConfigSchema {
        location: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Compliant and non-compliant symbols must differ (both are '{0}')")]
    IdenticalSymbols(char),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
