//! Generic CRUD handlers shared by the book and user resources.
//!
//! One handler set serves both resources; which backend a request reaches is
//! decided by the [`ResourceCtx`] baked into the router at wiring time. Reads
//! pass the backend body through untouched; writes go through typed entities
//! so ids can be validated and extracted.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use gateway_client::{Backend, RemoteCallClient};
use gateway_http::error::AppError;

use super::models::{Created, Entity};
use super::validate::ensure_matching_id;

/// Per-resource handler state: the backend to call and the shared client.
#[derive(Clone)]
pub struct ResourceCtx {
    pub backend: Backend,
    pub client: Arc<RemoteCallClient>,
}

/// Build the routes for one resource.
///
/// The `/v2` prefix is kept for callers still on the old split surface; it
/// serves the exact same handlers against the exact same backend.
pub fn resource_router<E: Entity + 'static>(
    backend: Backend,
    client: Arc<RemoteCallClient>,
) -> Router {
    let ctx = ResourceCtx { backend, client };

    Router::new()
        .route("/", get(list).post(create::<E>))
        .route("/{id}", get(fetch).put(update::<E>).delete(remove))
        .route("/v2", get(list).post(create::<E>))
        .route("/v2/{id}", get(fetch).put(update::<E>).delete(remove))
        .with_state(ctx)
}

/// List the full collection; backend body passed through with 200.
async fn list(State(ctx): State<ResourceCtx>) -> Result<Json<Value>, AppError> {
    tracing::info!(resource = ctx.backend.resource(), "listing entities");

    let body = ctx.client.list(ctx.backend).await?;
    Ok(Json(body))
}

/// Fetch one entity; backend body passed through, backend 404 stays 404.
async fn fetch(
    State(ctx): State<ResourceCtx>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, AppError> {
    tracing::info!(resource = ctx.backend.resource(), id, "fetching entity");

    let body = ctx.client.fetch(ctx.backend, id).await?;
    Ok(Json(body))
}

/// Create an entity and answer with only the id the backend assigned.
async fn create<E: Entity>(
    State(ctx): State<ResourceCtx>,
    Json(entity): Json<E>,
) -> Result<(StatusCode, Json<Created>), AppError> {
    let echo = ctx.client.create(ctx.backend, &entity).await?;
    let created = Created::from_entity(&echo)?;

    tracing::info!(
        resource = ctx.backend.resource(),
        id = created.id,
        "created entity"
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an entity in place. The body must name the entity from the path;
/// a mismatch is rejected before any outbound call is made.
async fn update<E: Entity>(
    State(ctx): State<ResourceCtx>,
    Path(id): Path<i64>,
    Json(entity): Json<E>,
) -> Result<StatusCode, AppError> {
    ensure_matching_id(id, entity.id())?;

    ctx.client.update(ctx.backend, id, &entity).await?;
    Ok(StatusCode::OK)
}

/// Delete an entity; no body is returned to the caller.
async fn remove(
    State(ctx): State<ResourceCtx>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    tracing::info!(resource = ctx.backend.resource(), id, "deleting entity");

    ctx.client.delete(ctx.backend, id).await?;
    Ok(StatusCode::OK)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::library::models::Book;
    use axum::body::Body;
    use axum::http::Request;
    use gateway_kernel::settings::ClientSettings;
    use gateway_client::StaticResolver;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use tower::ServiceExt;

    fn book_router(server: &MockServer) -> Router {
        let mut addresses = HashMap::new();
        addresses.insert("book-service".to_string(), server.base_url());
        addresses.insert("user-service".to_string(), server.base_url());

        let client = Arc::new(
            RemoteCallClient::new(
                &ClientSettings::default(),
                Arc::new(StaticResolver::new(addresses)),
            )
            .unwrap(),
        );

        resource_router::<Book>(Backend::Book, client)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn create_answers_with_the_backend_assigned_id() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(POST).path("/api/books");
            then.status(200).json_body(json!({
                "id": 42,
                "title": "Dune",
                "price": 9.99
            }));
        });

        let router = book_router(&server);
        let request = json_request(
            "POST",
            "/",
            json!({"title": "Dune", "author": {"name": "Frank Herbert"}, "price": 9.99}),
        );
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!({"id": 42}));
    }

    #[tokio::test]
    async fn mismatched_update_never_reaches_the_backend() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT).path("/api/books/5");
            then.status(200);
        });

        let router = book_router(&server);
        let request = json_request("PUT", "/5", json!({"id": 7, "title": "Dune"}));
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn update_without_a_body_id_is_rejected() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT).path("/api/books/5");
            then.status(200);
        });

        let router = book_router(&server);
        let request = json_request("PUT", "/5", json!({"title": "Dune"}));
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn matching_update_forwards_the_body_once() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(PUT)
                .path("/api/books/5")
                .json_body(json!({"id": 5, "title": "Dune"}));
            then.status(200);
        });

        let router = book_router(&server);
        let request = json_request("PUT", "/5", json!({"id": 5, "title": "Dune"}));
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
        mock.assert();
    }

    #[tokio::test]
    async fn get_passes_the_backend_body_through() {
        let server = MockServer::start();
        let backend_body = json!({"id": 1, "title": "Dune", "category": "sci-fi"});
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/api/books/1");
            then.status(200).json_body(backend_body.clone());
        });

        let router = book_router(&server);
        let request = Request::builder()
            .method("GET")
            .uri("/1")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, backend_body);
    }

    #[tokio::test]
    async fn repeated_gets_hit_the_backend_each_time() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/books");
            then.status(200).json_body(json!([]));
        });

        let router = book_router(&server);
        for _ in 0..2 {
            let request = Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap();
            let response = router.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn backend_not_found_propagates() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(GET).path("/api/books/999");
            then.status(404).body("book not found");
        });

        let router = book_router(&server);
        let request = Request::builder()
            .method("GET")
            .uri("/999")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_issues_one_call_and_returns_no_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(DELETE).path("/api/books/3");
            then.status(200);
        });

        let router = book_router(&server);
        let request = Request::builder()
            .method("DELETE")
            .uri("/3")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn v2_prefix_serves_the_same_handlers() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/api/books");
            then.status(200).json_body(json!([{"id": 1, "title": "Dune"}]));
        });

        let router = book_router(&server);
        let request = Request::builder()
            .method("GET")
            .uri("/v2")
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
        assert_eq!(body, json!([{"id": 1, "title": "Dune"}]));
        assert_eq!(mock.calls(), 1);
    }
}
