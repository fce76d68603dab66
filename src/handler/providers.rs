use std::sync::Arc;

use axum::{
    middleware,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use validator::Validate;

use crate::{
    db::providerdb::ProviderExt,
    dtos::providerdtos::*,
    error::HttpError,
    middleware::role_check,
    models::usermodel::UserRole,
    AppState,
};

// Providers only matter to the people who externalize tickets.
pub fn providers_handler() -> Router {
    Router::new().route(
        "/",
        get(get_providers)
            .post(create_provider)
            .layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
    )
}

pub async fn get_providers(
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let providers = app_state
        .db_client
        .get_providers()
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ProviderListResponseDto {
        status: "success".to_string(),
        results: providers.len() as i64,
        providers,
    }))
}

pub async fn create_provider(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateProviderDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let provider = app_state
        .db_client
        .create_provider(&body.name, body.telephone, body.email, body.specialite)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(ProviderResponseDto {
        status: "success".to_string(),
        data: ProviderData { provider },
    }))
}
