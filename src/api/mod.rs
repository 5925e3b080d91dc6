// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    error::ErrorBody,
    state::AppState,
    webfinger::{Alias, Href, Jrd, Link, LinkRelationType, Properties, Titles},
};

pub mod health;
pub mod webfinger;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/.well-known/webfinger", get(webfinger::webfinger))
        .route("/health", get(health::health))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(webfinger::webfinger, health::health),
    components(
        schemas(
            Jrd,
            Link,
            Alias,
            Href,
            LinkRelationType,
            Properties,
            Titles,
            ErrorBody,
            health::HealthResponse
        )
    ),
    tags(
        (name = "WebFinger", description = "RFC 7033 resource discovery"),
        (name = "Health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = router(AppState::default());
        // Ensure the router can be converted into a service without panicking.
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn openapi_document_lists_the_webfinger_path() {
        let response = router(AppState::default())
            .oneshot(
                Request::builder()
                    .uri("/api-doc/openapi.json")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert!(doc["paths"]["/.well-known/webfinger"]["get"].is_object());
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let response = router(AppState::default())
            .oneshot(Request::builder().uri("/.well-known/host-meta").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
