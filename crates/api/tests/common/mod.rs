//! Shared helpers for API integration tests.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use beout_api::auth::jwt::{generate_access_token, JwtConfig};
use beout_api::config::ServerConfig;
use beout_api::routes;
use beout_api::state::AppState;
use beout_core::types::DbId;
use beout_pdf::{ChromiumEngine, HtmlToPdf, PdfServiceConfig, PdfTicketService};

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        client_url: "https://be-out.app".to_string(),
        upload_dir: std::env::temp_dir().join("beout-api-tests"),
        asset_dir: std::env::temp_dir().join("beout-api-tests-assets"),
        chromium_executable: None,
        jwt: JwtConfig {
            secret: "test-secret".to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the application router with the given database pool.
///
/// Mirrors the router construction in `main.rs` minus the outer
/// middleware layers, so tests exercise routing, extractors and error
/// mapping. The conversion engine is lazily launched and never touched
/// by these tests.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();

    let engine = Arc::new(ChromiumEngine::new(None));
    let pdf_service = Arc::new(PdfTicketService::new(
        pool.clone(),
        engine as Arc<dyn HtmlToPdf>,
        PdfServiceConfig {
            upload_dir: config.upload_dir.clone(),
            asset_dir: config.asset_dir.clone(),
            base_url: config.client_url.clone(),
        },
    ));

    let state = AppState {
        pool,
        config: Arc::new(config),
        pdf_service,
    };

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .with_state(state)
}

/// Mint a valid access token for the given user.
pub fn token_for(user_id: DbId, role: &str) -> String {
    let config = test_config();
    generate_access_token(&config.jwt, user_id, role).expect("token generation")
}

/// Issue a request, optionally authenticated, optionally with a JSON body.
pub async fn request(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };
    app.oneshot(request).await.expect("response")
}

/// Shorthand for an unauthenticated GET.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    request(app, Method::GET, uri, None, None).await
}

/// Collect the response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Assert status and return the parsed body.
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> serde_json::Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Insert a user row and return its id.
pub async fn seed_user(pool: &PgPool, email: &str, role: &str) -> DbId {
    let (id,): (DbId,) = sqlx::query_as("INSERT INTO users (email, role) VALUES ($1, $2) RETURNING id")
        .bind(email)
        .bind(role)
        .fetch_one(pool)
        .await
        .expect("seed user");
    id
}

/// Insert an event/booking/ticket chain and return
/// `(organizer_id, user_id, booking_id, ticket_id)`.
pub async fn seed_ticket(pool: &PgPool, reference: &str) -> (DbId, DbId, DbId, DbId) {
    let organizer_id = seed_user(pool, &format!("org-{reference}@example.com"), "organizer").await;
    let user_id = seed_user(pool, &format!("user-{reference}@example.com"), "user").await;

    let (event_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO events (organizer_id, title, event_date) \
         VALUES ($1, 'Nuit du Jazz', '2025-07-09T19:30:00Z') RETURNING id",
    )
    .bind(organizer_id)
    .fetch_one(pool)
    .await
    .expect("seed event");

    let (booking_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO bookings (user_id, event_id, booking_reference) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(event_id)
    .bind(reference)
    .fetch_one(pool)
    .await
    .expect("seed booking");

    let (ticket_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO booking_tickets (booking_id, ticket_number) \
         VALUES ($1, $2) RETURNING id",
    )
    .bind(booking_id)
    .bind(format!("{reference}-T01"))
    .fetch_one(pool)
    .await
    .expect("seed ticket");

    (organizer_id, user_id, booking_id, ticket_id)
}
