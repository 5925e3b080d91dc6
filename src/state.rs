// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use axum::http::HeaderValue;

use crate::config::{ConfigError, SiteConfig, DEFAULT_ALLOWED_ORIGINS};
use crate::store::InMemoryStore;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<InMemoryStore>,
    /// Site host used for bare-host lookups; `None` when the url is unusable.
    pub host: Option<Arc<str>>,
    pub allowed_origins: HeaderValue,
}

impl AppState {
    pub fn new(config: SiteConfig, store: InMemoryStore) -> Result<Self, ConfigError> {
        let allowed_origins = config.webfinger.allowed_origins();
        let allowed_origins =
            HeaderValue::from_str(allowed_origins).map_err(|_| {
                ConfigError::InvalidAllowedOrigins(allowed_origins.to_string())
            })?;

        let host = match config.host() {
            Ok(host) => Some(Arc::from(host)),
            Err(e) => {
                tracing::warn!(error = %e, "Bare-host WebFinger lookups are disabled");
                None
            }
        };

        Ok(Self {
            store: Arc::new(store),
            host,
            allowed_origins,
        })
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: Arc::new(InMemoryStore::new()),
            host: None,
            allowed_origins: HeaderValue::from_static(DEFAULT_ALLOWED_ORIGINS),
        }
    }
}
