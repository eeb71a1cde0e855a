use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::auth::{decode_jwt, JwtError};
use crate::database::{models::User, Database, DatabaseError};

#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("JWT secret not configured")]
    SecretMissing,
    #[error("User store error: {0}")]
    Database(#[from] DatabaseError),
}

/// Resolves bearer tokens and user ids to user records.
///
/// `Ok(None)` means the token (or id) does not identify a current user;
/// `Err` is reserved for infrastructure failures.
#[async_trait]
pub trait UserLookup: Send + Sync {
    async fn user_from_token(&self, token: &str) -> Result<Option<User>, LookupError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, LookupError>;

    /// Readiness of the backing store
    async fn ping(&self) -> Result<(), LookupError>;
}

pub struct UserService {
    database: Database,
    jwt_secret: String,
}

impl UserService {
    pub fn new(database: Database, jwt_secret: impl Into<String>) -> Self {
        Self {
            database,
            jwt_secret: jwt_secret.into(),
        }
    }
}

#[async_trait]
impl UserLookup for UserService {
    async fn user_from_token(&self, token: &str) -> Result<Option<User>, LookupError> {
        let claims = match decode_jwt(token, &self.jwt_secret) {
            Ok(claims) => claims,
            Err(JwtError::InvalidSecret) => return Err(LookupError::SecretMissing),
            Err(e) => {
                debug!("Rejecting bearer token: {}", e);
                return Ok(None);
            }
        };

        let user = self.database.find_user(claims.sub).await?;
        if user.is_none() {
            debug!("Token subject {} has no user record", claims.sub);
        }
        Ok(user)
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, LookupError> {
        Ok(self.database.find_user(id).await?)
    }

    async fn ping(&self) -> Result<(), LookupError> {
        Ok(self.database.health_check().await?)
    }
}
