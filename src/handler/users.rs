use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    middleware,
    response::IntoResponse,
    routing::{get, post, put},
    Extension, Json, Router,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::userdb::UserExt,
    dtos::userdtos::*,
    error::{ErrorMessage, HttpError},
    middleware::{role_check, JWTAuthMiddeware},
    models::usermodel::UserRole,
    utils::password,
    AppState,
};

pub fn users_handler() -> Router {
    Router::new()
        .route(
            "/me",
            get(get_me).put(update_me).layer(middleware::from_fn(|state, req, next| {
                role_check(
                    state,
                    req,
                    next,
                    vec![UserRole::Admin, UserRole::Student, UserRole::Artisan],
                )
            })),
        )
        .route("/fcm-token", post(add_fcm_token).delete(remove_fcm_token))
        .route(
            "/artisans",
            get(list_artisans)
                .post(create_artisan)
                .layer(middleware::from_fn(|state, req, next| {
                    role_check(state, req, next, vec![UserRole::Admin])
                })),
        )
        .route(
            "/:user_id/active",
            put(set_active).layer(middleware::from_fn(|state, req, next| {
                role_check(state, req, next, vec![UserRole::Admin])
            })),
        )
}

pub async fn get_me(
    Extension(_app_state): Extension<Arc<AppState>>,
    Extension(user): Extension<JWTAuthMiddeware>,
) -> Result<impl IntoResponse, HttpError> {
    let filtered_user = FilterUserDto::filter_user(&user.user);

    let response_data = UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: filtered_user,
        },
    };

    Ok(Json(response_data))
}

pub async fn update_me(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .update_profile(auth.user.id, body.prenom, body.nom, body.telephone)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}

pub async fn add_fcm_token(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<FcmTokenDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .add_fcm_token(auth.user.id, &body.token)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "fcm_tokens": user.fcm_tokens
        }
    })))
}

pub async fn remove_fcm_token(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Json(body): Json<FcmTokenDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let user = app_state
        .db_client
        .remove_fcm_token(auth.user.id, &body.token)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(serde_json::json!({
        "status": "success",
        "data": {
            "fcm_tokens": user.fcm_tokens
        }
    })))
}

/// Active artisans for the assignment picker, optionally narrowed to one
/// specialty.
pub async fn list_artisans(
    Query(query_params): Query<ArtisanQueryDto>,
    Extension(app_state): Extension<Arc<AppState>>,
) -> Result<impl IntoResponse, HttpError> {
    let artisans = app_state
        .db_client
        .get_artisans(query_params.specialite)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserListResponseDto {
        status: "success".to_string(),
        results: artisans.len() as i64,
        users: FilterUserDto::filter_users(&artisans),
    }))
}

/// Provisions the artisan's login identity and profile in one step, without
/// touching the calling admin's session. A generated password is returned
/// exactly once.
pub async fn create_artisan(
    Extension(app_state): Extension<Arc<AppState>>,
    Json(body): Json<CreateArtisanDto>,
) -> Result<impl IntoResponse, HttpError> {
    body.validate()
        .map_err(|e| HttpError::bad_request(e.to_string()))?;

    let (plain_password, generated) = match body.password.clone() {
        Some(password) => (password, false),
        None => (password::generate_initial(12), true),
    };

    let hashed_password =
        password::hash(&plain_password).map_err(|e| HttpError::server_error(e.to_string()))?;

    let result = app_state
        .db_client
        .save_user(
            body.prenom,
            body.nom,
            body.email,
            body.telephone,
            hashed_password,
            UserRole::Artisan,
            body.specialite,
        )
        .await;

    match result {
        Ok(user) => {
            let mut data = serde_json::json!({
                "user": FilterUserDto::filter_user(&user),
            });
            if generated {
                data["initial_password"] = serde_json::Value::String(plain_password);
            }

            Ok(Json(serde_json::json!({
                "status": "success",
                "data": data
            })))
        }
        Err(sqlx::Error::Database(db_err)) => {
            if db_err.is_unique_violation() {
                Err(HttpError::unique_constraint_violation(
                    ErrorMessage::EmailExist.to_string(),
                ))
            } else {
                Err(HttpError::server_error(db_err.to_string()))
            }
        }
        Err(e) => Err(HttpError::server_error(e.to_string())),
    }
}

pub async fn set_active(
    Extension(app_state): Extension<Arc<AppState>>,
    Extension(auth): Extension<JWTAuthMiddeware>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<SetActiveDto>,
) -> Result<impl IntoResponse, HttpError> {
    if user_id == auth.user.id {
        return Err(HttpError::bad_request(
            "You cannot disable your own account".to_string(),
        ));
    }

    let target = app_state
        .db_client
        .get_user(Some(user_id), None)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?
        .ok_or_else(|| HttpError::not_found("User not found".to_string()))?;

    let user = app_state
        .db_client
        .set_user_active(target.id, body.is_active)
        .await
        .map_err(|e| HttpError::server_error(e.to_string()))?;

    Ok(Json(UserResponseDto {
        status: "success".to_string(),
        data: UserData {
            user: FilterUserDto::filter_user(&user),
        },
    }))
}
