// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Warning sink for JRD sanitization.
//!
//! Every `parse` constructor in this module tree receives a `&mut Diagnostics`.
//! Pruned fragments are recorded here and forwarded to `tracing` so operators
//! see them in the server log while tests can assert on them directly.

/// Collects the warnings produced while sanitizing raw WebFinger data.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Diagnostics {
    warnings: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and emit it on the `webfinger` tracing target.
    pub fn warn(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(target: "webfinger", "{message}");
        self.warnings.push(message);
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// True when any recorded warning contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.warnings.iter().any(|w| w.contains(needle))
    }
}
