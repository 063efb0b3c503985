//! Read-only index over the static location dataset.

use std::{fs, path::Path};

use thiserror::Error;

use crate::model::Location;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read locations dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse locations dataset: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Locations loaded once at start-up. Never mutated afterwards, so it can be
/// shared behind an `Arc` and read concurrently without locking.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    locations: Vec<Location>,
}

impl LocationIndex {
    pub fn new(locations: Vec<Location>) -> Self {
        Self { locations }
    }

    /// Parse a JSON array of locations.
    pub fn from_json(json: &str) -> Result<Self, DatasetError> {
        let locations: Vec<Location> = serde_json::from_str(json)?;
        Ok(Self::new(locations))
    }

    /// Load the dataset from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let index = Self::from_json(&contents)?;
        tracing::info!(path = %path.display(), count = index.len(), "loaded locations dataset");

        if index.is_empty() {
            tracing::warn!("locations dataset is empty, every search will return no results");
        }

        Ok(index)
    }

    /// Case-insensitive substring match against the name or, when present,
    /// the airport code. Results keep dataset order.
    pub fn search(&self, query: &str) -> Vec<Location> {
        let q = query.to_lowercase();

        self.locations
            .iter()
            .filter(|loc| {
                loc.name.to_lowercase().contains(&q)
                    || loc
                        .airport_code
                        .as_deref()
                        .is_some_and(|code| code.to_lowercase().contains(&q))
            })
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }
}
