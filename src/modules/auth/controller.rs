use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderName, StatusCode},
    Json,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::modules::auth::{
    model::{Role, User, UserStatus},
    schema::{
        LoginRequest, LoginResponse, MeResponse, MessageResponse, ResetPasswordRequest,
        SendVerificationRequest, SignupRequest, SignupResponse, UpdateProfileRequest,
        UpdateProfileResponse, VerifyCodeRequest,
    },
};
use crate::services::hashing;
use crate::services::session::{clear_session_cookie, session_cookie, AuthUser};
use crate::services::verification::normalize_email;
use crate::AppState;

fn hashing_error(e: argon2::password_hash::Error) -> AppError {
    AppError::Internal(format!("Password hashing failed: {}", e))
}

fn record_verification(state: &AppState, operation: &str, result: &AppResult<()>) {
    let outcome = match result {
        Ok(()) => "ok",
        Err(AppError::CooldownActive { .. }) => "cooldown",
        Err(AppError::Expired) => "expired",
        Err(AppError::Mismatch) => "mismatch",
        Err(AppError::NotFound(_)) => "not_found",
        Err(_) => "error",
    };
    state
        .metrics
        .verification_codes_total
        .with_label_values(&[operation, outcome])
        .inc();
}

// =============================================================================
// SIGNUP / LOGIN / LOGOUT
// =============================================================================

pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    req.validate()?;
    let email = normalize_email(&req.email);

    if state.repos.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User with this email already exists".into()));
    }

    if let Some(code) = &req.code {
        let result = state.verification.verify(&email, code).await;
        record_verification(&state, "verify", &result);
        result?;
    }

    let password_hash = hashing::hash_password(&req.password).map_err(hashing_error)?;

    let user = User::new(
        req.name.trim().to_string(),
        email,
        password_hash,
        Role::User,
        UserStatus::Active,
    );
    state.repos.users.create(&user).await?;

    tracing::info!("New user signed up: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            message: "User created successfully",
            user: user.into(),
        }),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<LoginResponse>)> {
    let email = normalize_email(&req.email);

    let user = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredential)?;

    if !hashing::verify_password(&req.password, &user.password_hash).map_err(hashing_error)? {
        tracing::warn!("Failed login attempt for {}", email);
        return Err(AppError::InvalidCredential);
    }

    if !user.is_active() {
        return Err(AppError::Forbidden("Account is inactive"));
    }

    let token = state
        .jwt_service
        .create_session_token(&user.id, &user.email, user.role)
        .map_err(|e| AppError::Internal(format!("Token creation failed: {}", e)))?;
    let expires_in = state.jwt_service.session_duration_secs();

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, session_cookie(&token, expires_in, state.cookie_secure))],
        Json(LoginResponse {
            message: "Login successful",
            user: user.into(),
            token,
            expires_in,
        }),
    ))
}

pub async fn logout(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, [(HeaderName, String); 1], Json<MessageResponse>) {
    (
        StatusCode::OK,
        [(SET_COOKIE, clear_session_cookie(state.cookie_secure))],
        Json(MessageResponse {
            message: "Logged out successfully",
        }),
    )
}

// =============================================================================
// ME
// =============================================================================

pub async fn get_me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> AppResult<(StatusCode, Json<MeResponse>)> {
    let user = state
        .repos
        .users
        .find_by_id(&user.id)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok((StatusCode::OK, Json(MeResponse { user: user.into() })))
}

pub async fn update_me(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<(StatusCode, Json<UpdateProfileResponse>)> {
    req.validate()?;

    let updated = state
        .repos
        .users
        .update_name(&user.id, req.name.trim())
        .await?
        .ok_or(AppError::NotFound("User"))?;

    Ok((
        StatusCode::OK,
        Json(UpdateProfileResponse {
            message: "Profile updated successfully",
            user: updated.into(),
        }),
    ))
}

// =============================================================================
// VERIFICATION / PASSWORD RESET
// =============================================================================

pub async fn send_verification(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SendVerificationRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    let result = state.verification.issue(&req.email).await;
    record_verification(&state, "issue", &result);
    result?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Verification code sent successfully",
        }),
    ))
}

pub async fn verify_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<VerifyCodeRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    let result = state.verification.verify(&req.email, &req.code).await;
    record_verification(&state, "verify", &result);
    result?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Email verified successfully",
        }),
    ))
}

pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResetPasswordRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;
    let email = normalize_email(&req.email);

    let user = state
        .repos
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::NotFound("User"))?;

    let result = state.verification.verify(&email, &req.code).await;
    record_verification(&state, "verify", &result);
    result?;

    let password_hash = hashing::hash_password(&req.new_password).map_err(hashing_error)?;
    state
        .repos
        .users
        .update_password(&user.id, &password_hash)
        .await?;

    tracing::info!("Password reset for {}", email);

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "Password reset successfully",
        }),
    ))
}
