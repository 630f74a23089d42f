//! # User Types
//!
//! The identity the authentication collaborator hands us on every request.
//! Credential handling lives outside this system entirely; the storefront
//! trusts the supplied identity and only distinguishes customer from admin.

use serde::{Deserialize, Serialize};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

/// An authenticated user, as supplied by the session collaborator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Opaque user id
    pub id: String,

    /// Display name
    pub name: String,

    /// Contact email
    pub email: String,

    /// Contact phone
    #[serde(default)]
    pub phone: String,

    /// Role, defaults to customer
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Seed roster of known users (loaded from config, since registration is
/// owned by the external auth collaborator)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserRoster {
    pub users: Vec<User>,
}

impl UserRoster {
    /// Load roster from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
