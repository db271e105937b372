//! Integration tests for ticket and booking endpoints: authentication,
//! access control and error mapping.

mod common;

use axum::http::{Method, StatusCode};
use common::{expect_json, request, seed_ticket, seed_user, token_for};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn ticket_requires_authentication(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = request(app, Method::GET, "/api/v1/tickets/1", None, None).await;
    let json = expect_json(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn garbage_token_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = request(
        app,
        Method::GET,
        "/api/v1/tickets/1",
        Some("not-a-real-token"),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_ticket_maps_to_404(pool: PgPool) {
    let user_id = seed_user(&pool, "lone@example.com", "user").await;
    let app = common::build_test_app(pool);

    let token = token_for(user_id, "user");
    let response = request(
        app,
        Method::GET,
        "/api/v1/tickets/999999",
        Some(&token),
        None,
    )
    .await;
    let json = expect_json(response, StatusCode::NOT_FOUND).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_reads_ticket_foreign_user_forbidden(pool: PgPool) {
    let (_, user_id, _, ticket_id) = seed_ticket(&pool, "BO-2001").await;
    let stranger_id = seed_user(&pool, "stranger@example.com", "user").await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/tickets/{ticket_id}");

    let owner_token = token_for(user_id, "user");
    let response = request(app.clone(), Method::GET, &uri, Some(&owner_token), None).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["ticket_number"], "BO-2001-T01");
    // Access-check fields stay internal.
    assert!(json["data"].get("organizer_id").is_none());

    let stranger_token = token_for(stranger_id, "user");
    let response = request(app, Method::GET, &uri, Some(&stranger_token), None).await;
    let json = expect_json(response, StatusCode::FORBIDDEN).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn organizer_and_admin_can_read_any_booking_tickets(pool: PgPool) {
    let (organizer_id, _, booking_id, _) = seed_ticket(&pool, "BO-2002").await;
    let admin_id = seed_user(&pool, "admin@example.com", "admin").await;
    let app = common::build_test_app(pool);

    let uri = format!("/api/v1/bookings/{booking_id}/tickets");

    let organizer_token = token_for(organizer_id, "organizer");
    let response = request(app.clone(), Method::GET, &uri, Some(&organizer_token), None).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["data"]["tickets"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"]["booking"]["booking_reference"], "BO-2002");

    let admin_token = token_for(admin_id, "admin");
    let response = request(app, Method::GET, &uri, Some(&admin_token), None).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_booking_maps_to_404(pool: PgPool) {
    let user_id = seed_user(&pool, "nobody@example.com", "user").await;
    let app = common::build_test_app(pool);

    let token = token_for(user_id, "user");
    let response = request(
        app,
        Method::GET,
        "/api/v1/bookings/424242/tickets",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
