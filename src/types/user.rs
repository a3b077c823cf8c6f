//! User account types

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::User => write!(f, "user"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A registered user account
///
/// The bcrypt password hash is part of the persisted record but is never
/// exposed through the API; responses use [`UserPublic`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub email: String,
    #[serde(rename = "passwordHash")]
    pub password_hash: String,
    #[serde(default)]
    pub role: Role,
    #[serde(rename = "createdAt", default)]
    pub created_at: i64,
}

impl User {
    /// Strip credentials for API responses
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            name: self.name.clone(),
            surname: self.surname.clone(),
            email: self.email.clone(),
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// User representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: u64,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "createdAt")]
    pub created_at: i64,
}

/// Registration request body
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub surname: String,
    pub email: String,
    pub password: String,
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
