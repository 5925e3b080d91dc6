// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JRD link objects (RFC 7033 §4.4.4).

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::diagnostics::Diagnostics;
use super::link_relation::LinkRelationType;
use super::properties::{Properties, Titles};
use super::uri::is_uri;

/// A link target URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Href(String);

impl Href {
    /// Missing or `null` hrefs are silently absent; other invalid values warn.
    pub fn parse(raw: Option<&Value>, diagnostics: &mut Diagnostics) -> Option<Self> {
        let raw = raw.filter(|value| !value.is_null())?;
        match raw.as_str() {
            Some(href) if is_uri(href) => Some(Self(href.to_string())),
            _ => {
                diagnostics.warn(format!("Webfinger link href is malformed: {raw}, ignoring"));
                None
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A single link of a JRD. Only `rel` is required; absent members are
/// omitted when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Link {
    pub rel: LinkRelationType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<Href>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Properties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titles: Option<Titles>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<Value>,
}

impl Link {
    /// Sanitize one raw link. A link without a valid `rel` is dropped whole.
    pub fn parse(raw: &Value, diagnostics: &mut Diagnostics) -> Option<Self> {
        let Some(rel) = raw.get("rel").and_then(LinkRelationType::parse) else {
            diagnostics.warn(format!(
                "Webfinger link rel is missing or malformed: {raw}, ignoring"
            ));
            return None;
        };

        Some(Self {
            rel,
            href: Href::parse(raw.get("href"), diagnostics),
            media_type: raw.get("type").filter(|value| !value.is_null()).cloned(),
            properties: Properties::parse(raw.get("properties"), diagnostics),
            titles: Titles::parse(raw.get("titles"), diagnostics),
        })
    }

    pub fn to_raw(&self) -> Value {
        // JSON values and string-keyed maps only, so this cannot fail.
        serde_json::to_value(self).unwrap_or_default()
    }
}
