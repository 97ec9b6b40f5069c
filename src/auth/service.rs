//! # Auth Service
//!
//! Login, token validation and admin bootstrap.

use std::sync::Arc;

use tracing::{info, warn};

use super::context::AuthContext;
use super::crypto::PasswordPolicy;
use super::errors::{AuthError, AuthResult};
use super::jwt::{IssuedToken, JwtConfig, JwtManager};
use super::user::{InMemoryUserRepository, LoginRequest, Role, User, UserRepository};

pub struct AuthService {
    users: Arc<dyn UserRepository>,
    jwt: JwtManager,
    policy: PasswordPolicy,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, jwt_config: JwtConfig, policy: PasswordPolicy) -> Self {
        Self {
            users,
            jwt: JwtManager::new(jwt_config),
            policy,
        }
    }

    /// Memory-backed service, used by tests and single-process deployments
    pub fn in_memory(jwt_config: JwtConfig) -> Self {
        Self::new(
            Arc::new(InMemoryUserRepository::new()),
            jwt_config,
            PasswordPolicy::default(),
        )
    }

    /// Check credentials and issue an access token
    pub fn login(&self, request: LoginRequest) -> AuthResult<(User, IssuedToken)> {
        let user = self
            .users
            .find_by_email(&request.email)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.verify_password(&request.password)? {
            warn!(email = %user.email, "failed login attempt");
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.jwt.issue(&user)?;
        info!(email = %user.email, role = %user.role, "user logged in");
        Ok((user, token))
    }

    /// Validate a bearer token
    pub fn authenticate(&self, token: &str) -> AuthResult<AuthContext> {
        let claims = self.jwt.validate(token)?;
        AuthContext::from_claims(&claims)
    }

    /// Validate a bearer token and require the admin role
    pub fn authorize_admin(&self, token: Option<&str>) -> AuthResult<AuthContext> {
        let token = token.ok_or(AuthError::AuthenticationRequired)?;
        let ctx = self.authenticate(token)?;
        ctx.require_admin()?;
        Ok(ctx)
    }

    pub fn current_user(&self, ctx: &AuthContext) -> AuthResult<User> {
        self.users
            .find_by_id(ctx.user_id)?
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Create the admin account, or reset its password and role if it exists
    pub fn ensure_admin(&self, email: &str, name: &str, password: &str) -> AuthResult<User> {
        match self.users.find_by_email(email)? {
            Some(mut user) => {
                user.set_password(password, &self.policy)?;
                user.role = Role::Admin;
                self.users.update(&user)?;
                info!(email = %user.email, "admin account updated");
                Ok(user)
            }
            None => {
                let user = User::new(email, name, password, Role::Admin, &self.policy)?;
                self.users.create(&user)?;
                info!(email = %user.email, "admin account created");
                Ok(user)
            }
        }
    }

    /// Register a non-admin user
    #[cfg(test)]
    pub(crate) fn register(&self, email: &str, name: &str, password: &str) -> AuthResult<User> {
        let user = User::new(email, name, password, Role::User, &self.policy)?;
        self.users.create(&user)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::in_memory(JwtConfig::new("service-test-secret"))
    }

    fn login(email: &str, password: &str) -> LoginRequest {
        LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_admin_login_and_authorize() {
        let service = service();
        service
            .ensure_admin("admin@portfolio.com", "Admin User", "admin-password")
            .unwrap();

        let (user, token) = service
            .login(login("admin@portfolio.com", "admin-password"))
            .unwrap();
        assert!(user.is_admin());

        let ctx = service.authorize_admin(Some(&token.access_token)).unwrap();
        assert_eq!(ctx.user_id, user.id);
        assert_eq!(service.current_user(&ctx).unwrap().email, "admin@portfolio.com");
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let service = service();
        service
            .ensure_admin("admin@portfolio.com", "Admin", "admin-password")
            .unwrap();

        let wrong = service.login(login("admin@portfolio.com", "nope-nope"));
        let unknown = service.login(login("ghost@portfolio.com", "admin-password"));
        assert_eq!(wrong.unwrap_err(), AuthError::InvalidCredentials);
        assert_eq!(unknown.unwrap_err(), AuthError::InvalidCredentials);
    }

    #[test]
    fn test_authorize_admin_rejections() {
        let service = service();
        service
            .register("visitor@example.com", "Visitor", "visitor-password")
            .unwrap();
        let (_, token) = service
            .login(login("visitor@example.com", "visitor-password"))
            .unwrap();

        assert_eq!(
            service.authorize_admin(None).unwrap_err(),
            AuthError::AuthenticationRequired
        );
        assert_eq!(
            service.authorize_admin(Some(&token.access_token)).unwrap_err(),
            AuthError::Forbidden
        );
        assert!(service.authorize_admin(Some("garbage")).is_err());
    }

    #[test]
    fn test_ensure_admin_resets_password() {
        let service = service();
        service
            .ensure_admin("admin@portfolio.com", "Admin", "first-password")
            .unwrap();
        service
            .ensure_admin("admin@portfolio.com", "Admin", "second-password")
            .unwrap();

        assert!(service
            .login(login("admin@portfolio.com", "first-password"))
            .is_err());
        assert!(service
            .login(login("admin@portfolio.com", "second-password"))
            .is_ok());
    }
}
