// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Read-only author data.
//!
//! The store is loaded once from a JSON file shaped like:
//!
//! ```json
//! {
//!   "bilbo": {
//!     "name": "Bilbo Baggins",
//!     "webfinger": { "aliases": [...], "links": [...], "properties": {...} }
//!   }
//! }
//! ```
//!
//! Records are kept as raw JSON; sanitization happens per request in
//! [`crate::webfinger::Jrd::parse`].

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::webfinger::AccountStore;

/// Error type for loading the author data file.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read author data {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("author data {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("author data must be a JSON object keyed by account name")]
    NotAnObject,
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    authors: BTreeMap<String, Value>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load authors from a JSON file. A missing file yields an empty store so
    /// a fresh deployment can start before any author is configured.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Author data file not found, starting empty");
                return Ok(Self::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let value: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, StoreError> {
        match value {
            Value::Object(map) => Ok(Self {
                authors: map.into_iter().collect(),
            }),
            _ => Err(StoreError::NotAnObject),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, record: Value) {
        self.authors.insert(name.into(), record);
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.authors.keys().map(String::as_str)
    }
}

impl AccountStore for InMemoryStore {
    fn account(&self, name: &str) -> Option<&Value> {
        self.authors.get(name)
    }

    fn len(&self) -> usize {
        self.authors.len()
    }

    fn sole_account(&self) -> Option<(&str, &Value)> {
        if self.authors.len() != 1 {
            return None;
        }
        self.authors
            .iter()
            .next()
            .map(|(name, record)| (name.as_str(), record))
    }
}
