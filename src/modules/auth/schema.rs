use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::model::{Role, User, UserStatus};

lazy_static! {
    static ref UPPERCASE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref LOWERCASE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref DIGIT: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SIX_DIGITS: Regex = Regex::new(r"^[0-9]{6}$").unwrap();
}

/// At least 8 characters with one uppercase letter, one lowercase letter and one digit.
pub fn validate_password_strength(password: &str) -> Result<(), ValidationError> {
    let message = if password.chars().count() < 8 {
        "Password must be at least 8 characters"
    } else if !UPPERCASE.is_match(password) {
        "Password must contain at least one uppercase letter"
    } else if !LOWERCASE.is_match(password) {
        "Password must contain at least one lowercase letter"
    } else if !DIGIT.is_match(password) {
        "Password must contain at least one number"
    } else {
        return Ok(());
    };

    Err(ValidationError::new("password_strength").with_message(message.into()))
}

/// 1 to 60 characters once surrounding whitespace is trimmed.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if (1..=60).contains(&len) {
        return Ok(());
    }
    Err(ValidationError::new("name_length").with_message("Name must be 1 to 60 characters".into()))
}

// =============================================================================
// SIGNUP
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub password: String,
    /// When present the email must have a live verification code
    #[serde(default)]
    #[validate(regex(path = *SIX_DIGITS, message = "Code must be 6 digits"))]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

// =============================================================================
// LOGIN / LOGOUT
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user: UserResponse,
    pub token: String,
    pub expires_in: i64,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

// =============================================================================
// ME (Current User)
// =============================================================================

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: UserResponse,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(custom(function = "validate_name"))]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateProfileResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            status: user.status,
            created_at: user.created_at,
        }
    }
}

// =============================================================================
// EMAIL VERIFICATION
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct SendVerificationRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyCodeRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(regex(path = *SIX_DIGITS, message = "Code must be 6 digits"))]
    pub code: String,
}

// =============================================================================
// PASSWORD RESET
// =============================================================================

#[derive(Debug, Deserialize, Validate)]
pub struct ResetPasswordRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(regex(path = *SIX_DIGITS, message = "Code must be 6 digits"))]
    pub code: String,
    #[validate(custom(function = "validate_password_strength"))]
    pub new_password: String,
}
