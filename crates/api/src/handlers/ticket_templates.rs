//! Handlers for the `/ticket-templates` resource.
//!
//! Organizer-facing CRUD over reusable visual/QR configurations. Writes
//! are scoped to the caller's own templates; reads also surface globals.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use beout_core::error::CoreError;
use beout_core::roles::{ROLE_ADMIN, ROLE_ORGANIZER};
use beout_core::types::DbId;
use beout_db::models::ticket_template::{CreateTicketTemplate, UpdateTicketTemplate};
use beout_db::repositories::TicketTemplateRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Only organizers (and admins) manage ticket templates.
fn require_organizer(auth: &AuthUser) -> AppResult<()> {
    if auth.role == ROLE_ORGANIZER || auth.role == ROLE_ADMIN {
        Ok(())
    } else {
        Err(AppError::Core(CoreError::Forbidden(
            "Ticket templates are managed by organizers".into(),
        )))
    }
}

/// GET /api/v1/ticket-templates
///
/// The caller's own templates plus globals, newest first.
pub async fn list_templates(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    require_organizer(&auth)?;

    let templates = TicketTemplateRepo::list_for_organizer(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: templates }))
}

/// POST /api/v1/ticket-templates
///
/// Create a template owned by the caller. Returns 201 with the row.
pub async fn create_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateTicketTemplate>,
) -> AppResult<impl IntoResponse> {
    require_organizer(&auth)?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let template = TicketTemplateRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(
        template_id = template.id,
        organizer_id = auth.user_id,
        "Ticket template created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: template })))
}

/// PUT /api/v1/ticket-templates/{id}
///
/// Update one of the caller's templates. 404 when the template does not
/// exist or belongs to another organizer.
pub async fn update_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
    Json(input): Json<UpdateTicketTemplate>,
) -> AppResult<impl IntoResponse> {
    require_organizer(&auth)?;
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let template = TicketTemplateRepo::update(&state.pool, template_id, auth.user_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Ticket template",
            id: template_id,
        }))?;

    Ok(Json(DataResponse { data: template }))
}

/// DELETE /api/v1/ticket-templates/{id}
///
/// Delete one of the caller's templates.
pub async fn delete_template(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(template_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_organizer(&auth)?;

    let deleted = TicketTemplateRepo::delete(&state.pool, template_id, auth.user_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Ticket template",
            id: template_id,
        }));
    }

    Ok(StatusCode::NO_CONTENT)
}
