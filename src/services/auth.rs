//! Authentication service implementation
//!
//! Issues and verifies the HS256 bearer tokens that identify the caller of
//! every core operation. A verified token becomes an [`Actor`]; role checks
//! live on the actor itself.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;
use crate::config::AuthConfig;
use crate::models::{Actor, Role};
use crate::utils::errors::{CampusEventsError, Result};

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id
    pub sub: Uuid,
    pub role: Role,
    /// Expiry as seconds since the epoch
    pub exp: usize,
    pub iat: usize,
}

/// Authentication service for token issuing and verification
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl_seconds: u64,
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &AuthConfig) -> Self {
        let secret = config.jwt_secret.as_bytes();
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            token_ttl_seconds: config.token_ttl_seconds,
        }
    }

    /// Sign a token for `actor`
    pub fn issue_token(&self, actor: &Actor) -> Result<String> {
        let now = Utc::now().timestamp().max(0) as usize;
        let claims = Claims {
            sub: actor.id,
            role: actor.role,
            iat: now,
            exp: now + self.token_ttl_seconds as usize,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CampusEventsError::Authentication(format!("Failed to sign token: {}", e)))
    }

    /// Verify a bearer token and return the actor it identifies
    pub fn authenticate(&self, token: &str) -> Result<Actor> {
        let token = token.strip_prefix("Bearer ").unwrap_or(token).trim();
        if token.is_empty() {
            return Err(CampusEventsError::Authentication("Missing token".to_string()));
        }

        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => {
                debug!(user_id = %data.claims.sub, role = %data.claims.role, "Token verified");
                Ok(Actor::new(data.claims.sub, data.claims.role))
            }
            Err(e) => {
                warn!(error = %e, "Token verification failed");
                Err(CampusEventsError::Authentication("Invalid or expired token".to_string()))
            }
        }
    }

    /// Verify a token and require one of `allowed` roles
    pub fn authorize(&self, token: &str, allowed: &[Role]) -> Result<Actor> {
        let actor = self.authenticate(token)?;
        actor.require_role(allowed)?;
        Ok(actor)
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish_non_exhaustive()
    }
}
