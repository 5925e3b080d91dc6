// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # JSON Resource Descriptor
//!
//! [`Jrd::parse`] turns loosely structured author data into a descriptor that
//! is valid per RFC 7033 §4.4. Invalid fragments are pruned one by one and
//! reported through [`Diagnostics`]; parsing itself never fails.
//!
//! ## Absent vs. empty
//!
//! `aliases`, `links` and `properties` are `None` whenever sanitization leaves
//! nothing, so they are omitted from the rendered JSON rather than emitted as
//! `[]` or `{}`. `subject` is always rendered, as `null` when invalid.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::diagnostics::Diagnostics;
use super::link::Link;
use super::properties::Properties;
use super::uri::is_uri;

/// Another URI identifying the same entity as the subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Alias(String);

impl Alias {
    pub fn parse(raw: &Value, diagnostics: &mut Diagnostics) -> Option<Self> {
        match raw.as_str() {
            Some(alias) if is_uri(alias) => Some(Self(alias.to_string())),
            _ => {
                diagnostics.warn(format!("Webfinger alias is malformed: {raw}, ignoring"));
                None
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Alias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A sanitized JRD.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct Jrd {
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<Alias>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
}

impl Jrd {
    /// Build a descriptor for `subject` from raw `{aliases?, links?,
    /// properties?}` data. Any other shape is treated as empty data.
    pub fn parse(subject: &str, data: &Value, diagnostics: &mut Diagnostics) -> Self {
        let aliases: Vec<Alias> = entries(data, "aliases")
            .iter()
            .filter_map(|alias| Alias::parse(alias, diagnostics))
            .collect();
        let links: Vec<Link> = entries(data, "links")
            .iter()
            .filter_map(|link| Link::parse(link, diagnostics))
            .collect();
        let properties = Properties::parse(data.get("properties"), diagnostics);

        Self {
            subject: is_uri(subject).then(|| subject.to_string()),
            aliases: non_empty(aliases),
            links: non_empty(links),
            properties,
        }
    }

    /// Keep only links whose relation is in `rels`, preserving order.
    pub fn retain_rels(&mut self, rels: &[String]) {
        if let Some(links) = self.links.take() {
            let kept: Vec<Link> = links
                .into_iter()
                .filter(|link| rels.iter().any(|rel| rel == link.rel.as_str()))
                .collect();
            self.links = non_empty(kept);
        }
    }

    /// The descriptor as raw JSON, ready to be served or fed back to
    /// [`Jrd::parse`].
    pub fn to_raw(&self) -> Value {
        // Strings and string-keyed maps only, so this cannot fail.
        serde_json::to_value(self).unwrap_or_default()
    }

    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(&self.to_raw()).unwrap_or_default()
    }
}

fn entries<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn non_empty<T>(items: Vec<T>) -> Option<Vec<T>> {
    (!items.is_empty()).then_some(items)
}
