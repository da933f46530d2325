//! The user-editable tag list persisted as a JSON array.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A tag type and the route prefix its endpoints live under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub route_prefix: String,
}

impl Tag {
    fn new(name: &str, route_prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            route_prefix: route_prefix.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Tag name is required.")]
    EmptyName,
    #[error("failed to write tags file '{path}': {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize tags: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Tags backed by a JSON file.
#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
    tags: Vec<Tag>,
}

fn default_tags() -> Vec<Tag> {
    vec![
        Tag::new("Backoffice", "/api/v1/backoffice"),
        Tag::new("Portal", "/api/v1/portal"),
    ]
}

impl TagStore {
    /// Load the tag list; a missing or unreadable file yields the defaults.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let tags = match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<Vec<Tag>>(&contents) {
                Ok(tags) => tags,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "corrupted tags file, using defaults");
                    default_tags()
                }
            },
            Err(_) => {
                tracing::debug!(path = %path.display(), "no tags file, using defaults");
                default_tags()
            }
        };
        Self { path, tags }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn names(&self) -> Vec<&str> {
        self.tags.iter().map(|t| t.name.as_str()).collect()
    }

    /// Stored route prefix of a tag (exact name match); blank counts as unset.
    pub fn route_prefix(&self, name: &str) -> Option<&str> {
        self.tags
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.route_prefix.as_str())
            .filter(|p| !p.is_empty())
    }

    /// Add a tag and persist. Returns `false` when the name already exists.
    ///
    /// A blank prefix defaults to `/api/v1/{lowercased name}`.
    pub fn add(&mut self, name: &str, route_prefix: &str) -> Result<bool, TagError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TagError::EmptyName);
        }
        if self.tags.iter().any(|t| t.name == name) {
            return Ok(false);
        }

        let prefix = match route_prefix.trim() {
            "" => format!("/api/v1/{}", name.to_lowercase()),
            p => p.to_string(),
        };
        self.tags.push(Tag::new(name, &prefix));
        self.save()?;
        Ok(true)
    }

    /// Remove a tag and persist. Returns whether anything was removed.
    pub fn remove(&mut self, name: &str) -> Result<bool, TagError> {
        let name = name.trim();
        let before = self.tags.len();
        self.tags.retain(|t| t.name != name);
        if self.tags.len() == before {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    /// Write the list as pretty JSON, creating parent directories.
    pub fn save(&self) -> Result<(), TagError> {
        let json = serde_json::to_string_pretty(&self.tags)?;
        let write_err = |source| TagError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        fs::write(&self.path, json).map_err(write_err)
    }
}
