//! Repository for the `ticket_templates` table.
//!
//! Write operations are scoped by `organizer_id` so one organizer can
//! never touch another's templates; reads also surface global templates.

use beout_core::types::DbId;
use sqlx::PgPool;

use crate::models::ticket_template::{CreateTicketTemplate, TicketTemplate, UpdateTicketTemplate};

const COLUMNS: &str =
    "id, organizer_id, is_global, name, description, configuration, created_at, updated_at";

/// CRUD operations for ticket templates.
pub struct TicketTemplateRepo;

impl TicketTemplateRepo {
    /// Templates visible to an organizer: their own plus globals,
    /// newest first.
    pub async fn list_for_organizer(
        pool: &PgPool,
        organizer_id: DbId,
    ) -> Result<Vec<TicketTemplate>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ticket_templates \
             WHERE organizer_id = $1 OR is_global = true \
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, TicketTemplate>(&query)
            .bind(organizer_id)
            .fetch_all(pool)
            .await
    }

    /// Insert a new template owned by `organizer_id`.
    pub async fn create(
        pool: &PgPool,
        organizer_id: DbId,
        input: &CreateTicketTemplate,
    ) -> Result<TicketTemplate, sqlx::Error> {
        let query = format!(
            "INSERT INTO ticket_templates (organizer_id, name, description, configuration) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketTemplate>(&query)
            .bind(organizer_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.configuration)
            .fetch_one(pool)
            .await
    }

    /// Update an owned template. Only non-`None` fields are applied.
    /// Returns `None` when the template does not exist or belongs to
    /// another organizer.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        organizer_id: DbId,
        input: &UpdateTicketTemplate,
    ) -> Result<Option<TicketTemplate>, sqlx::Error> {
        let query = format!(
            "UPDATE ticket_templates SET \
                name = COALESCE($3, name), \
                description = COALESCE($4, description), \
                configuration = COALESCE($5, configuration), \
                updated_at = NOW() \
             WHERE id = $1 AND organizer_id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TicketTemplate>(&query)
            .bind(id)
            .bind(organizer_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.configuration)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned template. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId, organizer_id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM ticket_templates WHERE id = $1 AND organizer_id = $2")
                .bind(id)
                .bind(organizer_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
