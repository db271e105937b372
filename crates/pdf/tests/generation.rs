//! Integration tests for the batch PDF producer.
//!
//! Exercises the full service path against a real database with a
//! deterministic mock conversion engine:
//! - single-ticket generation writes the artifact and updates the row
//! - per-ticket failures are isolated within a booking batch
//! - a missing ticket performs no filesystem or database writes
//! - regeneration produces distinct, newer artifacts

use std::path::PathBuf;
use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use beout_core::types::DbId;
use beout_pdf::{
    EngineError, HtmlToPdf, PdfPageOptions, PdfServiceConfig, PdfTicketService, TicketPdfError,
};
use sqlx::PgPool;
use tempfile::TempDir;

const PDF_STUB: &[u8] = b"%PDF-1.4 test artifact";

// ---------------------------------------------------------------------------
// Mock engines
// ---------------------------------------------------------------------------

/// Always succeeds with a stub PDF body.
struct StubEngine;

#[async_trait]
impl HtmlToPdf for StubEngine {
    async fn convert(&self, _html: &str, _options: &PdfPageOptions) -> Result<Vec<u8>, EngineError> {
        Ok(PDF_STUB.to_vec())
    }
}

/// Fails whenever the document contains `marker`, succeeds otherwise.
struct FailOnMarker {
    marker: String,
}

#[async_trait]
impl HtmlToPdf for FailOnMarker {
    async fn convert(&self, html: &str, _options: &PdfPageOptions) -> Result<Vec<u8>, EngineError> {
        if html.contains(&self.marker) {
            Err(EngineError::Conversion("page crashed".to_string()))
        } else {
            Ok(PDF_STUB.to_vec())
        }
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user, event, booking and `ticket_count` tickets. Returns the
/// booking id and the ticket ids in ticket-number order.
async fn seed_booking(pool: &PgPool, reference: &str, ticket_count: i32) -> (DbId, Vec<DbId>) {
    let (user_id,): (DbId,) =
        sqlx::query_as("INSERT INTO users (email) VALUES ($1) RETURNING id")
            .bind(format!("{reference}@example.com"))
            .fetch_one(pool)
            .await
            .unwrap();

    let (event_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO events (organizer_id, title, event_date) \
         VALUES ($1, 'Nuit du Jazz', '2025-07-09T19:30:00Z') RETURNING id",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
    .unwrap();

    let (booking_id,): (DbId,) = sqlx::query_as(
        "INSERT INTO bookings (user_id, event_id, booking_reference) \
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(user_id)
    .bind(event_id)
    .bind(reference)
    .fetch_one(pool)
    .await
    .unwrap();

    let mut ticket_ids = Vec::new();
    for n in 1..=ticket_count {
        let (id,): (DbId,) = sqlx::query_as(
            "INSERT INTO booking_tickets (booking_id, ticket_number) \
             VALUES ($1, $2) RETURNING id",
        )
        .bind(booking_id)
        .bind(format!("{reference}-T{n:02}"))
        .fetch_one(pool)
        .await
        .unwrap();
        ticket_ids.push(id);
    }

    (booking_id, ticket_ids)
}

fn service(pool: PgPool, engine: Arc<dyn HtmlToPdf>, dir: &TempDir) -> PdfTicketService {
    PdfTicketService::new(
        pool,
        engine,
        PdfServiceConfig {
            upload_dir: dir.path().to_path_buf(),
            asset_dir: dir.path().join("assets"),
            base_url: "https://be-out.app".to_string(),
        },
    )
}

fn tickets_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("tickets")
}

// ---------------------------------------------------------------------------
// Single ticket
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn single_ticket_writes_artifact_and_updates_row(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let (_, ticket_ids) = seed_booking(&pool, "BO-1001", 1).await;
    let svc = service(pool.clone(), Arc::new(StubEngine), &dir);

    let outcome = svc.generate_ticket_pdf(ticket_ids[0]).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.ticket_number, "BO-1001-T01");
    assert!(outcome.pdf_url.starts_with("/uploads/tickets/ticket-BO-1001-T01-"));
    assert_eq!(std::fs::read(&outcome.pdf_path).unwrap(), PDF_STUB);

    let (url, generated_at): (Option<String>, Option<chrono::DateTime<chrono::Utc>>) =
        sqlx::query_as("SELECT pdf_file_url, pdf_generated_at FROM booking_tickets WHERE id = $1")
            .bind(ticket_ids[0])
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(url.as_deref(), Some(outcome.pdf_url.as_str()));
    assert!(generated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_ticket_is_not_found_and_performs_no_writes(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let svc = service(pool.clone(), Arc::new(StubEngine), &dir);

    let err = svc.generate_ticket_pdf(999_999).await.unwrap_err();
    assert_matches!(err, TicketPdfError::TicketNotFound(999_999));

    // No artifact directory was created and no row was touched.
    assert!(!tickets_dir(&dir).exists());
    let (count,): (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM booking_tickets WHERE pdf_file_url IS NOT NULL")
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn conversion_failure_leaves_row_untouched(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let (_, ticket_ids) = seed_booking(&pool, "BO-1002", 1).await;
    let engine = FailOnMarker {
        marker: "BO-1002-T01".to_string(),
    };
    let svc = service(pool.clone(), Arc::new(engine), &dir);

    let err = svc.generate_ticket_pdf(ticket_ids[0]).await.unwrap_err();
    assert_matches!(err, TicketPdfError::Engine(EngineError::Conversion(_)));

    let (url,): (Option<String>,) =
        sqlx::query_as("SELECT pdf_file_url FROM booking_tickets WHERE id = $1")
            .bind(ticket_ids[0])
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(url.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn regeneration_produces_distinct_newer_artifacts(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let (_, ticket_ids) = seed_booking(&pool, "BO-1003", 1).await;
    let svc = service(pool.clone(), Arc::new(StubEngine), &dir);

    let first = svc.generate_ticket_pdf(ticket_ids[0]).await.unwrap();
    let (first_at,): (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT pdf_generated_at FROM booking_tickets WHERE id = $1")
            .bind(ticket_ids[0])
            .fetch_one(&pool)
            .await
            .unwrap();

    // Filenames carry millisecond timestamps; make sure we cross one.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;

    let second = svc.generate_ticket_pdf(ticket_ids[0]).await.unwrap();
    let (second_at,): (Option<chrono::DateTime<chrono::Utc>>,) =
        sqlx::query_as("SELECT pdf_generated_at FROM booking_tickets WHERE id = $1")
            .bind(ticket_ids[0])
            .fetch_one(&pool)
            .await
            .unwrap();

    assert_ne!(first.pdf_path, second.pdf_path);
    assert!(first.pdf_path.exists(), "old artifact is orphaned, not removed");
    assert!(second.pdf_path.exists());
    assert!(second_at.unwrap() > first_at.unwrap());
}

// ---------------------------------------------------------------------------
// Booking batch
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn batch_isolates_per_ticket_failure(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let (booking_id, ticket_ids) = seed_booking(&pool, "BO-1004", 3).await;

    // The engine crashes only on ticket #2's document.
    let engine = FailOnMarker {
        marker: "BO-1004-T02".to_string(),
    };
    let svc = service(pool.clone(), Arc::new(engine), &dir);

    let outcome = svc.generate_booking_tickets_pdfs(booking_id).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.total_tickets, 3);
    assert_eq!(outcome.success_count, 2);
    assert_eq!(outcome.results.len(), 3);

    // Results come back in ticket-number order.
    assert_eq!(outcome.results[0].ticket_id, ticket_ids[0]);
    assert_eq!(outcome.results[1].ticket_id, ticket_ids[1]);
    assert_eq!(outcome.results[2].ticket_id, ticket_ids[2]);

    assert!(outcome.results[0].success);
    assert!(!outcome.results[1].success);
    assert!(outcome.results[2].success, "batch continued past the failure");

    let failed = &outcome.results[1];
    assert_eq!(failed.ticket_id, ticket_ids[1]);
    assert!(failed.error.as_deref().unwrap().contains("page crashed"));
    assert!(failed.pdf_url.is_none());

    // Only the two successful tickets were recorded.
    let (count,): (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM booking_tickets \
         WHERE booking_id = $1 AND pdf_file_url IS NOT NULL",
    )
    .bind(booking_id)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count, 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn batch_for_empty_booking_returns_zero_counts(pool: PgPool) {
    let dir = TempDir::new().unwrap();
    let (booking_id, _) = seed_booking(&pool, "BO-1005", 0).await;
    let svc = service(pool.clone(), Arc::new(StubEngine), &dir);

    let outcome = svc.generate_booking_tickets_pdfs(booking_id).await.unwrap();

    assert_eq!(outcome.total_tickets, 0);
    assert_eq!(outcome.success_count, 0);
    assert!(outcome.results.is_empty());
}
