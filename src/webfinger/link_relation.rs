// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Link relation types (RFC 8288 §2.1).
//!
//! A relation is either a registered token from the IANA Link Relations
//! registry or an absolute URI (an extension relation type). The registry
//! snapshot lives in `data/link-relations.txt` and is embedded at compile
//! time; refresh that file from the registry instead of editing code.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::uri::is_uri;

const REGISTRY_DATA: &str = include_str!("../../data/link-relations.txt");

static REGISTERED: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    REGISTRY_DATA
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect()
});

/// True when `token` is in the IANA registry snapshot.
pub fn is_registered(token: &str) -> bool {
    REGISTERED.contains(token)
}

/// A validated link relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct LinkRelationType(String);

impl LinkRelationType {
    /// Accept a string that is a registered token or an absolute URI.
    pub fn parse(raw: &Value) -> Option<Self> {
        let rel = raw.as_str()?;
        (is_uri(rel) || is_registered(rel)).then(|| Self(rel.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LinkRelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
