//! # Users
//!
//! Credential holders for the admin panel.

use std::fmt;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::{hash_password, verify_password, PasswordPolicy};
use super::errors::{AuthError, AuthResult};

/// Role carried in access tokens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::User => f.write_str("user"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,

    /// Unique, compared case-insensitively
    pub email: String,

    pub name: String,

    pub role: Role,

    /// Argon2id hash (never plaintext, never serialized)
    #[serde(skip_serializing, default)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(
        email: &str,
        name: &str,
        password: &str,
        role: Role,
        policy: &PasswordPolicy,
    ) -> AuthResult<Self> {
        policy.validate(password)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            email: normalize_email(email),
            name: name.to_string(),
            role,
            password_hash: hash_password(password)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn verify_password(&self, password: &str) -> AuthResult<bool> {
        verify_password(password, &self.password_hash)
    }

    pub fn set_password(&mut self, password: &str, policy: &PasswordPolicy) -> AuthResult<()> {
        policy.validate(password)?;
        self.password_hash = hash_password(password)?;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// User storage
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>>;

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>>;

    fn create(&self, user: &User) -> AuthResult<()>;

    fn update(&self, user: &User) -> AuthResult<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> AuthError {
    AuthError::StorageError("Lock poisoned".to_string())
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_id(&self, id: Uuid) -> AuthResult<Option<User>> {
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> AuthResult<Option<User>> {
        let email = normalize_email(email);
        let users = self.users.read().map_err(|_| poisoned())?;
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailAlreadyExists);
        }
        users.push(user.clone());
        Ok(())
    }

    fn update(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().map_err(|_| poisoned())?;
        let existing = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AuthError::StorageError("User not found".to_string()))?;
        *existing = user.clone();
        Ok(())
    }
}
