//! Endpoint and credential configuration.
//!
//! Values come from `config.json` in the user's config directory and are
//! overridden by environment variables:
//! - `SUPABASE_URL` - project URL, e.g. `https://xyz.supabase.co`
//! - `SUPABASE_ANON_KEY` - anon (public) API key
//! - `SUPANOTES_TABLE` - table name (default: `notes`)

use std::fs;
use std::path::{Path, PathBuf};

use dirs::config_dir;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_NAME: &str = "supanotes";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_TABLE: &str = "notes";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Missing {0}: set it in the config file or the environment")]
    Missing(&'static str),
}

/// Settings as they appear in the config file. Every key is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub url: Option<String>,
    pub anon_key: Option<String>,
    pub table: Option<String>,
}

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub url: String,
    pub anon_key: String,
    pub table: String,
}

impl Config {
    /// Load from the default config file and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = get_config_path();
        Self::from_sources(path.as_deref(), |key| std::env::var(key).ok())
    }

    /// Merge an optional config file with variables looked up through `env`.
    /// A missing file is not an error.
    pub fn from_sources(
        path: Option<&Path>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) if path.exists() => read_file(path)?,
            _ => FileConfig::default(),
        };

        let url = pick(env("SUPABASE_URL"), file.url).ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let anon_key = pick(env("SUPABASE_ANON_KEY"), file.anon_key)
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        let table = pick(env("SUPANOTES_TABLE"), file.table)
            .unwrap_or_else(|| DEFAULT_TABLE.to_string());

        Ok(Self {
            url,
            anon_key,
            table,
        })
    }
}

/// Environment wins over the file; empty values count as unset.
fn pick(env: Option<String>, file: Option<String>) -> Option<String> {
    env.filter(|v| !v.is_empty())
        .or(file.filter(|v| !v.is_empty()))
}

fn read_file(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn get_config_path() -> Option<PathBuf> {
    let mut path = config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}
