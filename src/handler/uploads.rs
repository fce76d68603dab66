use std::sync::Arc;

use axum::{response::IntoResponse, routing::post, Extension, Json, Router};
use validator::Validate;

use crate::{
    dtos::ticketdtos::UploadMediaDto,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    utils::media::{self, MediaKind},
    AppState,
};

pub fn uploads_handler() -> Router {
    Router::new().route("/tickets", post(upload_ticket_media))
}

// Media arrives before the ticket exists, so files are keyed by the uploader
// and the client persists the returned URL on the ticket it creates next.
pub async fn upload_ticket_media(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UploadMediaDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let kind = media::detect_kind(&body.data).ok_or_else(|| {
        HttpError::bad_request("Unsupported media type, expected an image or audio data URL")
    })?;

    let max_mb = match kind {
        MediaKind::Photo => media::MAX_PHOTO_MB,
        MediaKind::VoiceNote => media::MAX_AUDIO_MB,
    };

    media::validate_media_size(&body.data, max_mb)
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let bytes =
        media::decode_media(&body.data).map_err(|e| HttpError::bad_request(e.to_string()))?;

    if kind == MediaKind::Photo {
        media::ensure_image(&bytes).map_err(|e| HttpError::bad_request(e.to_string()))?;
    }

    let rel_path = media::ticket_media_path(auth.user.id, &body.label);
    media::store(&app_state.env.upload_dir, &rel_path, &bytes)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "url": media::public_url(&app_state.env.app_url, &rel_path)
        }
    })))
}
