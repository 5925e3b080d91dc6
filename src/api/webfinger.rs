// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `GET /.well-known/webfinger` (RFC 7033 §4).

use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use utoipa::IntoParams;

use crate::{
    error::{ApiError, ErrorBody},
    state::AppState,
    webfinger::{resolve, Diagnostics, Jrd, QueryParameters},
};

pub const JRD_CONTENT_TYPE: &str = "application/jrd+json";

/// Documentation-only view of the query; the handler decodes the raw query
/// string itself because `rel` may repeat.
#[derive(IntoParams)]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
pub struct WebfingerQuery {
    /// URI of the entity being queried, e.g. `acct:bilbo@bagend.com`.
    resource: String,
    /// Link relation types to keep; may be repeated.
    rel: Option<Vec<String>>,
}

#[utoipa::path(
    get,
    path = "/.well-known/webfinger",
    params(WebfingerQuery),
    tag = "WebFinger",
    responses(
        (status = 200, description = "JSON Resource Descriptor", body = Jrd, content_type = "application/jrd+json"),
        (status = 400, description = "Missing resource parameter", body = ErrorBody),
        (status = 404, description = "Unknown resource", body = ErrorBody)
    )
)]
pub async fn webfinger(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let mut response = match lookup(&state, query.as_deref().unwrap_or_default()) {
        Ok(jrd) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, HeaderValue::from_static(JRD_CONTENT_TYPE))],
            jrd.to_json_pretty(),
        )
            .into_response(),
        Err(e) => e.into_response(),
    };

    response.headers_mut().insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        state.allowed_origins.clone(),
    );
    response
}

fn lookup(state: &AppState, query: &str) -> Result<Jrd, ApiError> {
    let params = QueryParameters::from_query_string(query);
    let Some(resource) = params.resource.as_deref() else {
        return Err(ApiError::bad_request("Missing required parameter: resource"));
    };

    let mut diagnostics = Diagnostics::new();
    resolve(
        resource,
        state.host.as_deref(),
        &params,
        state.store.as_ref(),
        &mut diagnostics,
    )
    .map_err(|e| {
        tracing::debug!(resource, error = %e, "WebFinger resource not resolved");
        ApiError::not_found(format!("Unknown resource: {resource}"))
    })
}
