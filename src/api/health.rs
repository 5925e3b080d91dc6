// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;
use crate::webfinger::AccountStore;

/// Liveness response with a summary of the loaded data.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always "ok" while the process is serving.
    pub status: String,
    /// Number of accounts in the author data.
    pub accounts: usize,
    /// Host used for bare-host lookups, when the site url provides one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// Liveness probe handler.
///
/// Author data is loaded before the listener starts, so there is nothing
/// further to check.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        accounts: state.store.len(),
        host: state.host.as_deref().map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_loaded_accounts() {
        let Json(response) = health(State(AppState::default())).await;

        assert_eq!(response.status, "ok");
        assert_eq!(response.accounts, 0);
        assert!(response.host.is_none());
    }
}
