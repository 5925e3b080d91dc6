// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Static `.well-known/webfinger` generation.
//!
//! Single-author sites can serve WebFinger from a static file host. The file
//! holds the JRD of the sole author and answers every query the same way, so
//! it is only produced when the site has exactly one author and a usable
//! host. Anything else skips generation with a warning; it never aborts
//! startup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::{ConfigError, SiteConfig};
use crate::store::InMemoryStore;
use crate::webfinger::resolver::webfinger_data;
use crate::webfinger::{AccountStore, AcctUri, Diagnostics, Jrd};

/// Location of the generated file, relative to the output directory.
pub const WELL_KNOWN_PATH: &str = ".well-known/webfinger";

/// A rendered WebFinger document for the sole author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    pub subject: String,
    pub jrd: Jrd,
    pub content: String,
}

impl StaticFile {
    /// Render the document, or record why it cannot be rendered.
    pub fn build(
        config: &SiteConfig,
        store: &InMemoryStore,
        diagnostics: &mut Diagnostics,
    ) -> Option<Self> {
        let host = match config.host() {
            Ok(host) => host,
            Err(ConfigError::MissingHost) => {
                diagnostics.warn(
                    "webfinger did not find your site's host configured at `url`; \
                     this is unsupported by static files so will be ignored",
                );
                return None;
            }
            Err(e) => {
                diagnostics.warn(format!(
                    "webfinger detected a malformed host in your site configuration \
                     ({e}); this is unsupported and will be ignored"
                ));
                return None;
            }
        };

        if store.is_empty() {
            diagnostics.warn(
                "webfinger did not detect any authors; \
                 this is unsupported by static files so will be ignored",
            );
            return None;
        }
        let Some((account, record)) = store.sole_account() else {
            diagnostics.warn(
                "webfinger discovered multiple authors; \
                 this is unsupported by static files so will be ignored",
            );
            return None;
        };

        let subject = match AcctUri::build(Some(account), Some(&host)) {
            Ok(uri) => uri.to_string(),
            Err(e) => {
                diagnostics.warn(format!(
                    "webfinger could not build an acct URI for author {account:?} ({e}); \
                     static file will be ignored"
                ));
                return None;
            }
        };

        let jrd = Jrd::parse(&subject, webfinger_data(record), diagnostics);
        let content = jrd.to_json_pretty();

        Some(Self {
            subject,
            jrd,
            content,
        })
    }

    /// Write the document under `output_dir`, creating `.well-known/`.
    pub fn write_to(&self, output_dir: &Path) -> io::Result<PathBuf> {
        let path = output_dir.join(WELL_KNOWN_PATH);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Generate the static file when `webfinger.static` is enabled.
///
/// Returns the written path, or `None` when generation was disabled or
/// skipped. Failures are logged, never propagated.
pub fn generate(config: &SiteConfig, store: &InMemoryStore, output_dir: &Path) -> Option<PathBuf> {
    if !config.webfinger.static_enabled() {
        tracing::debug!("Static WebFinger file disabled");
        return None;
    }

    let mut diagnostics = Diagnostics::new();
    let file = StaticFile::build(config, store, &mut diagnostics)?;

    match file.write_to(output_dir) {
        Ok(path) => {
            tracing::info!(path = %path.display(), subject = %file.subject, "Wrote static WebFinger file");
            Some(path)
        }
        Err(e) => {
            tracing::warn!(error = %e, "Failed to write static WebFinger file");
            None
        }
    }
}
