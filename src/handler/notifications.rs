use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    response::IntoResponse,
    routing::{delete, get, post, put},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    db::notificationdb::NotificationExt,
    error::HttpError,
    middleware::JWTAuthMiddeware,
    models::notificationmodel::Notification,
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct NotificationResponse {
    pub notifications: Vec<Notification>,
    pub total: i64,
    pub page: u32,
    pub limit: u32,
    pub unread_count: i64,
}

pub fn notifications_handler() -> Router {
    Router::new()
        .route("/", get(get_user_notifications))
        .route("/unread-count", get(get_unread_count))
        .route("/read-all", post(mark_all_notifications_read))
        .route("/:id/read", put(mark_notification_read))
        .route("/:id", delete(delete_notification))
}

// Pages are 1-based; a client sending page=0 gets the first page rather
// than an underflowed offset.
fn page_window(pagination: &PaginationParams) -> (u32, i64, i64) {
    let page = pagination.page.unwrap_or(1).max(1);
    let limit = i64::from(pagination.limit.unwrap_or(20).min(100));
    let offset = (i64::from(page) - 1) * limit;
    (page, limit, offset)
}

async fn get_user_notifications(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl IntoResponse, HttpError> {
    let (page, limit, offset) = page_window(&pagination);

    println!("📬 [get_user_notifications] Fetching for user: {}", auth.user.id);

    let total = app_state
        .db_client
        .count_notifications(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to count notifications: {}", e)))?;

    let unread_count = app_state
        .db_client
        .count_unread(auth.user.id)
        .await
        .map_err(|e| {
            HttpError::server_error(format!("Failed to count unread notifications: {}", e))
        })?;

    let notifications = app_state
        .db_client
        .get_notifications(auth.user.id, limit, offset)
        .await
        .map_err(|e| {
            println!("❌ [get_user_notifications] Query failed: {}", e);
            HttpError::server_error(format!("Failed to fetch notifications: {}", e))
        })?;

    println!("✅ [get_user_notifications] Found {} notifications", notifications.len());

    Ok(Json(NotificationResponse {
        notifications,
        total,
        page,
        limit: limit as u32,
        unread_count,
    }))
}

async fn get_unread_count(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let count = app_state
        .db_client
        .count_unread(auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to count notifications: {}", e)))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "unread_count": count
        }
    })))
}

async fn mark_notification_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let marked = app_state
        .db_client
        .mark_read(notification_id, auth.user.id)
        .await
        .map_err(|e| {
            HttpError::server_error(format!("Failed to mark notification as read: {}", e))
        })?;

    if !marked {
        return Err(HttpError::not_found("Notification not found"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Notification marked as read"
    })))
}

async fn mark_all_notifications_read(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let updated = app_state
        .db_client
        .mark_all_read(auth.user.id)
        .await
        .map_err(|e| {
            HttpError::server_error(format!("Failed to mark all notifications as read: {}", e))
        })?;

    println!("✅ [mark_all_notifications_read] Marked {} notifications as read", updated);

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "All notifications marked as read",
        "data": {
            "updated_count": updated
        }
    })))
}

async fn delete_notification(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(notification_id): Path<Uuid>,
) -> Result<impl IntoResponse, HttpError> {
    let deleted = app_state
        .db_client
        .delete_notification(notification_id, auth.user.id)
        .await
        .map_err(|e| HttpError::server_error(format!("Failed to delete notification: {}", e)))?;

    if !deleted {
        return Err(HttpError::not_found("Notification not found or already deleted"));
    }

    Ok(Json(serde_json::json!({
        "status": "success",
        "message": "Notification deleted"
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window_defaults() {
        let window = page_window(&PaginationParams {
            page: None,
            limit: None,
        });
        assert_eq!(window, (1, 20, 0));
    }

    #[test]
    fn test_page_zero_clamps_to_first_page() {
        let window = page_window(&PaginationParams {
            page: Some(0),
            limit: None,
        });
        assert_eq!(window, (1, 20, 0));
    }

    #[test]
    fn test_limit_capped_and_offset_advances() {
        let window = page_window(&PaginationParams {
            page: Some(3),
            limit: Some(500),
        });
        assert_eq!(window, (3, 100, 200));
    }
}
