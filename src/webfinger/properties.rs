// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JRD `properties` and link `titles` maps.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::diagnostics::Diagnostics;
use super::uri::is_uri;

/// Property names are URIs, values are strings (RFC 7033 §4.4.4).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Properties(BTreeMap<String, String>);

impl Properties {
    /// Sanitize a raw `properties` value. Missing or `null` input is simply
    /// absent; anything else that is not an object is dropped with a warning.
    ///
    /// `null` property values are rejected even though RFC 7033 allows them.
    pub fn parse(raw: Option<&Value>, diagnostics: &mut Diagnostics) -> Option<Self> {
        let map = match raw {
            None | Some(Value::Null) => return None,
            Some(Value::Object(map)) => map,
            Some(other) => {
                diagnostics.warn(format!(
                    "Webfinger link properties are malformed: {other}, ignoring"
                ));
                return None;
            }
        };

        let mut properties = BTreeMap::new();
        for (name, value) in map {
            if !is_uri(name) {
                diagnostics.warn(format!(
                    "Webfinger property name is not a URI: {name}, ignoring"
                ));
                continue;
            }
            match value.as_str() {
                Some(value) => {
                    properties.insert(name.clone(), value.to_string());
                }
                None => diagnostics.warn(format!(
                    "Webfinger property value is not a nullable string: {value}, ignoring"
                )),
            }
        }

        if properties.is_empty() {
            diagnostics.warn(format!(
                "All Webfinger link properties pruned: {}, ignoring",
                Value::Object(map.clone())
            ));
            return None;
        }

        Some(Self(properties))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Link titles keyed by language tag (or `und`). Tags are not validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Titles(BTreeMap<String, String>);

impl Titles {
    pub fn parse(raw: Option<&Value>, diagnostics: &mut Diagnostics) -> Option<Self> {
        let map = match raw {
            None | Some(Value::Null) => return None,
            Some(Value::Object(map)) => map,
            Some(other) => {
                diagnostics.warn(format!(
                    "Webfinger link titles are malformed: {other}, ignoring"
                ));
                return None;
            }
        };

        // JSON object keys are always strings; only the values need checking.
        let mut titles = BTreeMap::new();
        for (key, value) in map {
            match value.as_str() {
                Some(value) => {
                    titles.insert(key.clone(), value.to_string());
                }
                None => diagnostics.warn(format!(
                    "Webfinger title value for {key} is not a string: {value}, ignoring"
                )),
            }
        }

        if titles.is_empty() {
            diagnostics.warn(format!(
                "All Webfinger link titles pruned: {}, ignoring",
                Value::Object(map.clone())
            ));
            return None;
        }

        Some(Self(titles))
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.0.get(language).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn a_fully_appropriate_example() {
        let mut diagnostics = Diagnostics::new();
        let properties = Properties::parse(
            Some(&json!({"http://packetizer.com/ns/name": "Bilbo Baggins"})),
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(properties.get("http://packetizer.com/ns/name"), Some("Bilbo Baggins"));
        assert_eq!(properties.len(), 1);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn missing_or_null_is_silently_absent() {
        let mut diagnostics = Diagnostics::new();

        assert!(Properties::parse(None, &mut diagnostics).is_none());
        assert!(Properties::parse(Some(&Value::Null), &mut diagnostics).is_none());
        assert!(Titles::parse(None, &mut diagnostics).is_none());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn non_object_properties_are_malformed() {
        let mut diagnostics = Diagnostics::new();

        assert!(Properties::parse(Some(&json!(1234)), &mut diagnostics).is_none());
        assert!(diagnostics.contains("Webfinger link properties are malformed"));
    }

    #[test]
    fn prunes_bad_names_and_values() {
        let mut diagnostics = Diagnostics::new();
        let properties = Properties::parse(
            Some(&json!({
                "oops": "Bilbo Baggins",
                "https://oops.id/id/itagain": 1,
                "https://oops.id/null": null,
                "http://packetizer.com/ns/name": "Bilbo Baggins"
            })),
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(properties.len(), 1);
        assert!(diagnostics.contains("Webfinger property name is not a URI: oops"));
        assert_eq!(
            diagnostics
                .warnings()
                .iter()
                .filter(|w| w.contains("Webfinger property value"))
                .count(),
            2
        );
    }

    #[test]
    fn warns_when_everything_is_pruned() {
        let mut diagnostics = Diagnostics::new();

        assert!(Properties::parse(Some(&json!({"foo": "bar"})), &mut diagnostics).is_none());
        assert!(diagnostics.contains("All Webfinger link properties pruned"));
    }

    #[test]
    fn titles_keep_string_values() {
        let mut diagnostics = Diagnostics::new();
        let titles = Titles::parse(
            Some(&json!({"en-us": "Bilbo Baggins's blog", "und": "Bilbo", "fr": 1})),
            &mut diagnostics,
        )
        .unwrap();

        assert_eq!(titles.get("en-us"), Some("Bilbo Baggins's blog"));
        assert_eq!(titles.get("und"), Some("Bilbo"));
        assert_eq!(titles.get("fr"), None);
        assert!(diagnostics.contains("Webfinger title value for fr is not a string"));
    }

    #[test]
    fn titles_pruned_to_nothing_are_absent() {
        let mut diagnostics = Diagnostics::new();

        assert!(Titles::parse(Some(&json!({"en-us": 1})), &mut diagnostics).is_none());
        assert!(diagnostics.contains("All Webfinger link titles pruned"));

        assert!(Titles::parse(Some(&json!(["en-us"])), &mut diagnostics).is_none());
        assert!(diagnostics.contains("Webfinger link titles are malformed"));
    }

    #[test]
    fn serializes_as_a_string_map() {
        let mut diagnostics = Diagnostics::new();
        let raw = json!({"http://packetizer.com/ns/name": "Bilbo Baggins"});
        let properties = Properties::parse(Some(&raw), &mut diagnostics).unwrap();

        assert_eq!(serde_json::to_value(&properties).unwrap(), raw);
    }
}
