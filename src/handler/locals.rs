use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, put},
    Extension, Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::localdb::LocalExt,
    dtos::{localdtos::*, userdtos::SetActiveDto},
    error::HttpError,
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct LocalListQuery {
    pub include_inactive: Option<bool>,
}

pub fn locals_handler() -> Router {
    Router::new()
        .route("/", get(get_locals).post(create_local))
        .route(
            "/:local_id/active",
            put(set_active).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

// Students pick from this list when opening a ticket, so inactive locals are
// hidden from everyone but admins.
pub async fn get_locals(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(params): Query<LocalListQuery>,
) -> Result<impl IntoResponse, HttpError> {
    let include_inactive =
        params.include_inactive.unwrap_or(false) && auth.user.role == UserRole::Admin;

    let locals = app_state
        .db_client
        .get_locals(include_inactive)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(LocalListResponseDto {
        status: "success".to_string(),
        results: locals.len() as i64,
        locals,
    }))
}

pub async fn create_local(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<CreateLocalDto>,
) -> Result<impl IntoResponse, HttpError> {
    if auth.user.role != UserRole::Admin {
        return Err(HttpError::unauthorized("Not authorized"));
    }

    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let local = app_state
        .db_client
        .create_local(
            &body.name,
            body.kind,
            body.floors,
            body.total_rooms,
            body.category,
            body.capacity,
        )
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(LocalResponseDto {
        status: "success".to_string(),
        data: LocalData { local },
    }))
}

pub async fn set_active(
    Extension(app_state): Extension<Arc<AppState>>,
    Path(local_id): Path<Uuid>,
    Json(body): Json<SetActiveDto>,
) -> Result<impl IntoResponse, HttpError> {
    let local = app_state
        .db_client
        .set_local_active(local_id, body.is_active)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("Local not found"))?;

    Ok(Json(LocalResponseDto {
        status: "success".to_string(),
        data: LocalData { local },
    }))
}
