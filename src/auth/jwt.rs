//! # Access Tokens
//!
//! HS256 JSON Web Tokens carrying the user's id, email and role.
//! Validation is stateless; no user lookup is needed to check a role.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::crypto::generate_secret;
use super::errors::{AuthError, AuthResult};
use super::user::{Role, User};

/// Claims of an access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id
    pub sub: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expiration (Unix seconds)
    pub exp: i64,
    pub aud: String,
    pub iss: String,
}

impl JwtClaims {
    pub fn user_id(&self) -> AuthResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AuthError::MalformedToken)
    }
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub access_token_ttl: Duration,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }
}

impl Default for JwtConfig {
    /// Random per-process secret; tokens do not survive a restart
    fn default() -> Self {
        Self {
            secret: generate_secret(),
            access_token_ttl: Duration::hours(8),
            issuer: "folio".to_string(),
            audience: "folio-admin".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn issue(&self, user: &User) -> AuthResult<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + self.config.access_token_ttl;

        let claims = JwtClaims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)?;

        Ok(IssuedToken {
            access_token: token,
            token_type: "bearer".to_string(),
            expires_in: self.config.access_token_ttl.num_seconds(),
            expires_at,
        })
    }

    pub fn validate(&self, token: &str) -> AuthResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                _ => AuthError::MalformedToken,
            })
    }
}

/// Token handed to the client after login
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub expires_at: DateTime<Utc>,
}
