//! Request identity.
//!
//! The session token travels either as `Authorization: Bearer <jwt>` or in
//! the `auth_token` cookie set at login. Handlers pick the extractor that
//! matches the access level they need.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};
use std::sync::Arc;

use crate::error::AppError;
use crate::modules::auth::model::{Role, User};
use crate::AppState;

pub const AUTH_COOKIE: &str = "auth_token";

/// Authenticated caller, taken from the token claims alone
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

/// Caller identity when present; bad or missing tokens read as anonymous
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

/// Caller whose stored record still exists and is active
#[derive(Debug, Clone)]
pub struct ActiveUser(pub User);

/// Caller whose stored record carries the admin role
#[derive(Debug, Clone)]
pub struct AdminUser(pub User);

fn bearer_token(parts: &Parts) -> Option<String> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn cookie_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

pub fn session_token(parts: &Parts) -> Option<String> {
    bearer_token(parts).or_else(|| cookie_token(parts))
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = session_token(parts).ok_or(AppError::Unauthenticated)?;

        let data = state
            .jwt_service
            .verify_session_token(&token)
            .map_err(|e| {
                tracing::debug!("Rejected session token: {}", e);
                AppError::InvalidCredential
            })?;

        Ok(AuthUser {
            id: data.claims.sub,
            email: data.claims.email,
            role: data.claims.role,
        })
    }
}

impl FromRequestParts<Arc<AppState>> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}

// Tokens outlive account changes; reload the record so deletions and
// deactivations take effect on the next request
async fn load_caller(parts: &mut Parts, state: &Arc<AppState>) -> Result<User, AppError> {
    let caller = AuthUser::from_request_parts(parts, state).await?;

    let user = state
        .repos
        .users
        .find_by_id(&caller.id)
        .await?
        .ok_or(AppError::InvalidCredential)?;

    if !user.is_active() {
        return Err(AppError::Forbidden("Account is inactive"));
    }

    Ok(user)
}

impl FromRequestParts<Arc<AppState>> for ActiveUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        Ok(ActiveUser(load_caller(parts, state).await?))
    }
}

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let user = load_caller(parts, state).await?;

        // Role comes from the stored record so a demotion takes effect immediately
        if !user.is_admin() {
            tracing::warn!("Non-admin {} attempted an admin operation", user.email);
            return Err(AppError::Forbidden("Admin access required"));
        }

        Ok(AdminUser(user))
    }
}

// =============================================================================
// COOKIES
// =============================================================================

pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        AUTH_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn clear_session_cookie(secure: bool) -> String {
    session_cookie("", 0, secure)
}
