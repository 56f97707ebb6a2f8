use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::modules::admin::schema::{
    CreateUserRequest, CreateUserResponse, DeleteUserRequest, UserListResponse,
};
use crate::modules::auth::{model::User, schema::MessageResponse};
use crate::services::hashing;
use crate::services::session::AdminUser;
use crate::services::verification::normalize_email;
use crate::AppState;

/// GET /admin/users
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> AppResult<(StatusCode, Json<UserListResponse>)> {
    let users = state.repos.users.list().await?;

    Ok((
        StatusCode::OK,
        Json(UserListResponse {
            users: users.into_iter().map(Into::into).collect(),
        }),
    ))
}

/// POST /admin/users
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<CreateUserResponse>)> {
    req.validate()?;
    let email = normalize_email(&req.email);

    if state.repos.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User with this email already exists".into()));
    }

    let password_hash = hashing::hash_password(&req.password)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

    let user = User::new(
        req.name.trim().to_string(),
        email,
        password_hash,
        req.role,
        req.status,
    );
    state.repos.users.create(&user).await?;

    tracing::info!("User {} created by admin {}", user.email, admin.email);

    Ok((
        StatusCode::CREATED,
        Json(CreateUserResponse {
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

/// DELETE /admin/users
/// Admin records are protected.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    Json(req): Json<DeleteUserRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    AppError::check_id(&req.user_id)?;

    let user = state
        .repos
        .users
        .find_by_id(&req.user_id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    if user.is_admin() {
        tracing::warn!("Admin {} attempted to delete admin {}", admin.email, user.email);
        return Err(AppError::Forbidden("Cannot delete admin users"));
    }

    if !state.repos.users.delete(&user.id).await? {
        return Err(AppError::NotFound("User"));
    }

    tracing::info!("User {} deleted by admin {}", user.email, admin.email);

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "User deleted successfully",
        }),
    ))
}
