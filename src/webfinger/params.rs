// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! WebFinger query string decoding.
//!
//! RFC 7033 §4.1 lets `rel` repeat, and every occurrence counts, while
//! `resource` keeps the usual last-value-wins rule. Generic query extractors
//! collapse repeated keys, so the raw query string is decoded here instead.

use once_cell::sync::Lazy;
use regex::Regex;

/// `&` optionally followed by spaces, tolerating legacy encoders.
static PAIR_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"& *").expect("valid pair separator regex"));

/// The parameters of a WebFinger request.
///
/// `rel: None` means no `rel` was requested, which is distinct from
/// `Some(vec![])`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct QueryParameters {
    pub resource: Option<String>,
    pub rel: Option<Vec<String>>,
}

impl QueryParameters {
    pub fn new(resource: Option<String>, rel: Option<Vec<String>>) -> Self {
        Self { resource, rel }
    }

    /// Decode an undecoded query string (the part after `?`).
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();

        for pair in PAIR_SEPARATOR_RE.split(query) {
            if pair.is_empty() {
                continue;
            }

            let (key, value) = match pair.split_once('=') {
                Some((key, value)) => (decode(key), Some(decode(value))),
                None => (decode(pair), None),
            };

            match key.as_str() {
                "resource" => params.resource = value,
                "rel" => params.add_rel(value),
                _ => {}
            }
        }

        params
    }

    /// Append a relation; a valueless `rel` is ignored.
    pub fn add_rel(&mut self, rel: Option<String>) {
        if let Some(rel) = rel {
            self.rel.get_or_insert_with(Vec::new).push(rel);
        }
    }
}

/// Components that do not decode to UTF-8 are kept verbatim.
fn decode(component: &str) -> String {
    urlencoding::decode(component)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| component.to_string())
}
