// ShaderBG Program
// Copyright (c) 2025 Harlen Batagelo
// https://github.com/hbatagelo/shaderbg
// SPDX-License-Identifier: GPL-3.0-or-later

use serde::*;
use std::{fs, io, path::Path};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error")]
    Io(#[from] io::Error),
    #[error("TOML parse error")]
    TomlParse(#[from] toml::de::Error),
}

/// What to do when an attribute or uniform name is absent from the
/// linked program.
#[derive(Copy, Clone, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnresolvedNamePolicy {
    /// Keep the sentinel location without reporting anything.
    Ignore,
    /// Report a diagnostic and keep the sentinel location.
    #[default]
    Warn,
    /// Report a diagnostic and fail the lookup.
    Error,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ProgramConfig {
    #[serde(default)]
    pub unresolved_names: UnresolvedNamePolicy,

    /// Panic on error-class diagnostics after they are reported.
    #[serde(default)]
    pub assert_on_error: bool,

    /// Drain the driver error queue after attach and link.
    #[serde(default = "defaults::check_driver_errors")]
    pub check_driver_errors: bool,

    /// Report calls made while the context is not current.
    #[serde(default = "defaults::check_context")]
    pub check_context: bool,

    /// Maximum number of bytes captured from compile and link logs.
    #[serde(
        default = "defaults::info_log_limit",
        deserialize_with = "validators::clamp_info_log_limit"
    )]
    pub info_log_limit: usize,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self::with_serde_defaults()
    }
}

impl ProgramConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn with_serde_defaults() -> Self {
        Self {
            unresolved_names: UnresolvedNamePolicy::default(),
            assert_on_error: false,
            check_driver_errors: defaults::check_driver_errors(),
            check_context: defaults::check_context(),
            info_log_limit: defaults::info_log_limit(),
        }
    }
}

pub mod defaults {
    pub fn check_driver_errors() -> bool {
        cfg!(debug_assertions)
    }

    pub fn check_context() -> bool {
        true
    }

    pub fn info_log_limit() -> usize {
        16384
    }
}

mod validators {
    use super::*;

    pub fn clamp_info_log_limit<'de, D>(deserializer: D) -> Result<usize, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = usize::deserialize(deserializer)?;
        Ok(value.max(1))
    }
}
