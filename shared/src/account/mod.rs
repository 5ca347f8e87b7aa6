pub mod handle;

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};

/// Role assigned to an account by the backend.
///
/// The set the server is known to emit is `USER`, `ADMIN` and `MODERATOR`;
/// anything else is preserved verbatim so it can still be rendered, but it
/// carries no client-side privileges.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    User,
    Admin,
    Moderator,
    Other(String),
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }

    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
            Role::Moderator => "MODERATOR",
            Role::Other(role) => role,
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl From<String> for Role {
    // The backend has historically emitted both `ADMIN` and `admin`.
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "USER" => Role::User,
            "ADMIN" => Role::Admin,
            "MODERATOR" => Role::Moderator,
            _ => Role::Other(value),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_owned()
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The authenticated identity performing actions in the client.
///
/// Sourced from the session store at the start of each operation and used
/// only to gate UI affordances; the server re-checks every mutating call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// A user row as returned by `/users/all`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Role,
}

/// A user object embedded inside items and claims.
///
/// The backend is inconsistent about which fields it populates (some records
/// carry `name`, some `fullName`), so everything is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl UserSummary {
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.full_name.as_deref())
    }
}
