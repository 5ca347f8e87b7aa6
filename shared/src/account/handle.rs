//! Request and response bodies for the authentication endpoints.

use super::Role;
use serde::{Deserialize, Serialize};

/// Body of `POST /auth/verify-credentials`. A success triggers an OTP email;
/// no session is granted yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsDescriptor {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/confirm-otp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpDescriptor {
    pub email: String,
    pub otp: String,
}

/// Response of a successful OTP confirmation. The token is an opaque bearer
/// token; this layer never inspects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionGrant {
    pub token: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Body of `POST /users/save` (self-registration).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDescriptor {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

/// Body of `POST /auth/request-reset`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetRequestDescriptor {
    pub email: String,
}
