//! Authenticated caller context.

use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use super::jwt::JwtClaims;
use super::user::Role;

/// Who is making the request, as proven by a validated token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthContext {
    pub fn from_claims(claims: &JwtClaims) -> AuthResult<Self> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email.clone(),
            role: claims.role,
        })
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with [`AuthError::Forbidden`] unless the caller is an admin
    pub fn require_admin(&self) -> AuthResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AuthError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_admin() {
        let mut ctx = AuthContext {
            user_id: Uuid::new_v4(),
            email: "a@example.com".to_string(),
            role: Role::Admin,
        };
        assert!(ctx.require_admin().is_ok());

        ctx.role = Role::User;
        assert_eq!(ctx.require_admin(), Err(AuthError::Forbidden));
    }
}
