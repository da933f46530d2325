//! Locating and reading `.stubgen.toml`.
//!
//! The project file in the working directory shadows `~/.config/stubgen.toml`.
//! Only the first file found is read; a broken file falls back to defaults
//! with a warning rather than aborting the command.

use std::path::{Path, PathBuf};

use super::CliConfig;

#[derive(Debug, thiserror::Error)]
pub(crate) enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub(crate) fn load_cli_config() -> CliConfig {
    let Some(path) = config_candidates().into_iter().find(|p| p.is_file()) else {
        tracing::debug!("no config file, using defaults");
        return CliConfig::default();
    };

    read_config(&path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "using default config");
        CliConfig::default()
    })
}

/// Config locations, most specific first.
fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(".stubgen.toml")];
    if let Some(home) = home_dir() {
        candidates.push(home.join(".config").join("stubgen.toml"));
    }
    candidates
}

pub(crate) fn read_config(path: &Path) -> Result<CliConfig, ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// `~/x` resolves against `$HOME`; anything else is taken as-is.
pub(crate) fn expand_path(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}
