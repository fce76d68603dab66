// routes.rs
use std::sync::Arc;

use axum::{middleware, routing::get, Extension, Json, Router};
use serde_json::json;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    handler::{
        auth::auth_handler,
        locals::locals_handler,
        notifications::notifications_handler,
        providers::providers_handler,
        tickets::tickets_handler,
        uploads::uploads_handler,
        users::users_handler,
    },
    middleware::auth,
    AppState,
};

// Health check handler
async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "message": "Server is running"
    }))
}

pub fn create_router(app_state: Arc<AppState>) -> Router {
    let api_route = Router::new()
        .nest("/auth", auth_handler())
        .nest("/users", users_handler().layer(middleware::from_fn(auth)))
        .nest("/tickets", tickets_handler().layer(middleware::from_fn(auth)))
        .nest("/locals", locals_handler().layer(middleware::from_fn(auth)))
        .nest(
            "/providers",
            providers_handler().layer(middleware::from_fn(auth)),
        )
        .nest(
            "/notifications",
            notifications_handler().layer(middleware::from_fn(auth)),
        )
        .nest("/uploads", uploads_handler().layer(middleware::from_fn(auth)))
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state.clone()));

    // Stored media is public by URL; the upload itself is authenticated.
    Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_route)
        .nest_service(
            "/uploads",
            ServeDir::new(app_state.env.upload_dir.clone()),
        )
}
