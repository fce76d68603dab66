use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::ticketdb::TicketExt,
    dtos::ticketdtos::*,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::{
        ticketmodel::{sort_for_display, TicketQueryParams},
        usermodel::UserRole,
    },
    utils::media,
    AppState,
};

pub fn tickets_handler() -> Router {
    Router::new()
        .route("/", post(create_ticket).get(get_all_tickets))
        .route("/my", get(get_my_tickets))
        .route("/assigned", get(get_assigned_tickets))
        .route("/:ticket_id", get(get_ticket))
        .route("/:ticket_id/assign", put(assign_ticket))
        .route("/:ticket_id/externalize", put(externalize_ticket))
        .route("/:ticket_id/before-photo", put(attach_before_photo))
        .route("/:ticket_id/complete", put(complete_ticket))
        .route("/:ticket_id/validate", put(validate_ticket))
        .route("/:ticket_id/cancel", put(cancel_ticket))
        .route("/:ticket_id/archive", put(archive_ticket))
}

pub async fn create_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Student {
        return Err(HttpError::unauthorized("Only students can open tickets"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ticket = app_state
        .ticket_service
        .create_ticket(&auth.user, body)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

// Admin board: every ticket, filters combine independently.
pub async fn get_all_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(params): Query<TicketQueryParams>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    let mut tickets = app_state
        .db_client
        .get_tickets(&params)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    sort_for_display(&mut tickets);

    Ok(Json(TicketListResponseDto {
        status: "success".to_string(),
        results: tickets.len() as i64,
        tickets,
    }))
}

pub async fn get_my_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let mut tickets = app_state
        .db_client
        .get_student_tickets(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    sort_for_display(&mut tickets);

    Ok(Json(TicketListResponseDto {
        status: "success".to_string(),
        results: tickets.len() as i64,
        tickets,
    }))
}

pub async fn get_assigned_tickets(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Artisan {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    let mut tickets = app_state
        .db_client
        .get_artisan_tickets(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    sort_for_display(&mut tickets);

    Ok(Json(TicketListResponseDto {
        status: "success".to_string(),
        results: tickets.len() as i64,
        tickets,
    }))
}

pub async fn get_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state
        .db_client
        .get_ticket(ticket_id)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Ticket not found"))?;

    let is_admin = auth.user.role == UserRole::Admin;
    if !is_admin
        && ticket.student_id != auth.user.id
        && ticket.assigned_to_id != Some(auth.user.id)
    {
        return Err(HttpError::unauthorized("Not authorized to access this ticket"));
    }

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn assign_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<AssignTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    let ticket = app_state
        .ticket_service
        .assign_ticket(ticket_id, body.artisan_id)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn externalize_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<ExternalizeTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    let ticket = app_state
        .ticket_service
        .externalize_ticket(ticket_id, body.provider_id)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn attach_before_photo(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<BeforePhotoDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Artisan {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let photo_url = store_intervention_photo(&app_state, ticket_id, "before", &body.photo).await?;

    let ticket = app_state
        .ticket_service
        .attach_before_photo(ticket_id, auth.user.id, &photo_url)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn complete_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<CompleteTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Artisan {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let photo_url = store_intervention_photo(&app_state, ticket_id, "after", &body.photo).await?;

    let ticket = app_state
        .ticket_service
        .complete_ticket(ticket_id, auth.user.id, &photo_url)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn validate_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<ValidateTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let ticket = app_state
        .ticket_service
        .validate_ticket(ticket_id, auth.user.id, body.rating, body.comment)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn cancel_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
    Json(body): Json<CancelTicketDto>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state
        .ticket_service
        .cancel_ticket(ticket_id, auth.user.id, body.reason)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

pub async fn archive_ticket(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(ticket_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let ticket = app_state
        .ticket_service
        .archive_ticket(ticket_id, &auth.user)
        .await?;

    Ok(Json(TicketResponseDto {
        status: "success".to_string(),
        data: TicketData { ticket },
    }))
}

// Decode, sanity-check and persist one intervention snapshot, returning its
// public URL.
async fn store_intervention_photo(
    app_state: &Arc<AppState>,
    ticket_id: Uuid,
    label: &str,
    payload: &str,
) -> Result<String, HttpError> {
    media::validate_media_size(payload, media::MAX_PHOTO_MB)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bytes =
        media::decode_media(payload).map_err(|e| HttpError::bad_request(e.to_string()))?;
    media::ensure_image(&bytes).map_err(|e| HttpError::bad_request(e.to_string()))?;

    let rel_path = media::intervention_photo_path(ticket_id, label);
    media::store(&app_state.env.upload_dir, &rel_path, &bytes)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(media::public_url(&app_state.env.app_url, &rel_path))
}
