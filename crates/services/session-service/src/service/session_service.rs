//! Session service - agency registration, login, token verification and
//! agency approval.
//!
//! Passwords go through the domain `Password` value object. Token
//! verification re-reads the account so status changes apply immediately.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::directory::UserDirectory;
use common::{AppError, AppResult, JwtConfig};
use domain::{
    Password, RegisterAgency, Role, User, UserStatus, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER,
};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token returned after successful authentication
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    pub token_type: String,
    /// Seconds until expiry
    pub expires_in: i64,
}

/// Token plus the account it was issued for.
#[derive(Debug, Clone)]
pub struct LoginSession {
    pub token: TokenResponse,
    pub user: User,
}

/// Session service trait for dependency injection.
#[async_trait]
pub trait SessionService: Send + Sync {
    /// Create an agency account awaiting approval.
    async fn register(&self, input: RegisterAgency) -> AppResult<User>;

    async fn login(&self, email: String, password: String) -> AppResult<LoginSession>;

    /// Resolve a token to its current account; `None` when the token is
    /// invalid or expired, or the account is gone or suspended.
    async fn verify_token(&self, token: &str) -> AppResult<Option<User>>;

    async fn list_agencies(&self, status: Option<UserStatus>) -> AppResult<Vec<User>>;

    async fn set_agency_status(&self, id: Uuid, status: UserStatus) -> AppResult<User>;
}

/// Argon2 hash that never verifies; keeps unknown-email logins as slow as
/// real ones.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Concrete implementation of SessionService over a user directory.
pub struct Authenticator {
    directory: Arc<dyn UserDirectory>,
    jwt: JwtConfig,
}

impl Authenticator {
    pub fn new(directory: Arc<dyn UserDirectory>, jwt: JwtConfig) -> Self {
        Self { directory, jwt }
    }

    fn generate_token(&self, user: &User) -> AppResult<TokenResponse> {
        let now = Utc::now();
        let expires_at = now + Duration::hours(self.jwt.expiration_hours);

        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role.to_string(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )?;

        Ok(TokenResponse {
            access_token: token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.jwt.expiration_hours * SECONDS_PER_HOUR,
        })
    }

    fn decode_claims(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| debug!("Rejected token: {}", e))
        .ok()
    }
}

fn require(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(())
}

fn is_suspended(user: &User) -> bool {
    user.status == Some(UserStatus::Suspended)
}

#[async_trait]
impl SessionService for Authenticator {
    async fn register(&self, input: RegisterAgency) -> AppResult<User> {
        require("Email", &input.email)?;
        require("Last name", &input.last_name)?;
        require("First name", &input.first_name)?;

        if self.directory.find_by_email(&input.email).await?.is_some() {
            return Err(AppError::conflict("Account"));
        }

        let password_hash = Password::new(&input.password)?.into_string();
        let agency = User::new(
            Uuid::new_v4(),
            input.email.trim().to_string(),
            password_hash,
            input.last_name.trim().to_string(),
            input.first_name.trim().to_string(),
            Role::Agency,
        )
        .with_status(UserStatus::Pending);

        let agency = self.directory.insert(agency).await?;
        info!("Agency {} registered, awaiting approval", agency.id);
        Ok(agency)
    }

    async fn login(&self, email: String, password: String) -> AppResult<LoginSession> {
        let found = self.directory.find_by_email(&email).await?;

        // Verify even when the account is unknown so timing does not leak
        // which emails exist.
        let hash = found
            .as_ref()
            .map_or(DUMMY_HASH, |user| user.password_hash.as_str());
        let password_valid = Password::from_hash(hash).verify(&password);

        let user = match found {
            Some(user) if password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };
        if is_suspended(&user) {
            return Err(AppError::Forbidden);
        }

        let token = self.generate_token(&user)?;
        Ok(LoginSession { token, user })
    }

    async fn verify_token(&self, token: &str) -> AppResult<Option<User>> {
        let Some(claims) = self.decode_claims(token) else {
            return Ok(None);
        };

        let user = self.directory.find_by_id(claims.sub).await?;
        Ok(user.filter(|u| !is_suspended(u)))
    }

    async fn list_agencies(&self, status: Option<UserStatus>) -> AppResult<Vec<User>> {
        let agencies = self.directory.list_by_role(Role::Agency).await?;
        Ok(match status {
            Some(status) => agencies
                .into_iter()
                .filter(|a| a.status == Some(status))
                .collect(),
            None => agencies,
        })
    }

    async fn set_agency_status(&self, id: Uuid, status: UserStatus) -> AppResult<User> {
        let account = self
            .directory
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;
        if account.role != Role::Agency {
            return Err(AppError::validation("Only agency accounts can be approved or suspended"));
        }

        let updated = self
            .directory
            .set_status(id, status)
            .await?
            .ok_or(AppError::NotFound)?;
        info!("Agency {} is now {}", id, status);
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{MemoryDirectory, MockUserDirectory};

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn jwt() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            expiration_hours: 1,
        }
    }

    fn account(role: Role, status: UserStatus, password: &str) -> User {
        User::new(
            Uuid::new_v4(),
            "contact@agence-soleil.fr".to_string(),
            Password::new(password).unwrap().into_string(),
            "Soleil".to_string(),
            "Agence".to_string(),
            role,
        )
        .with_status(status)
    }

    fn registration(email: &str) -> RegisterAgency {
        RegisterAgency {
            email: email.to_string(),
            password: "motdepasse123".to_string(),
            last_name: "Evasion".to_string(),
            first_name: "Voyages".to_string(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_pending_agency() {
        let service = Authenticator::new(Arc::new(MemoryDirectory::new()), jwt());

        let agency = service.register(registration("new@evasion.fr")).await.unwrap();

        assert_eq!(agency.role, Role::Agency);
        assert_eq!(agency.status, Some(UserStatus::Pending));
        assert!(agency.is_pending_agency());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_email() {
        let mut directory = MockUserDirectory::new();
        directory
            .expect_find_by_email()
            .returning(|_| Ok(Some(account(Role::Agency, UserStatus::Active, "motdepasse123"))));
        directory.expect_insert().never();

        let service = Authenticator::new(Arc::new(directory), jwt());
        let result = service.register(registration("contact@agence-soleil.fr")).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_register_rejects_short_password() {
        let service = Authenticator::new(Arc::new(MemoryDirectory::new()), jwt());
        let mut input = registration("new@evasion.fr");
        input.password = "court".to_string();

        assert!(matches!(
            service.register(input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_login_then_verify_round_trip() {
        let user = account(Role::Agency, UserStatus::Active, "motdepasse123");
        let service = Authenticator::new(Arc::new(MemoryDirectory::with_users(vec![user.clone()])), jwt());

        let session = service
            .login(user.email.clone(), "motdepasse123".to_string())
            .await
            .unwrap();
        assert_eq!(session.token.token_type, "Bearer");
        assert_eq!(session.token.expires_in, 3600);

        let verified = service.verify_token(&session.token.access_token).await.unwrap();
        assert_eq!(verified.map(|u| u.id), Some(user.id));
    }

    #[tokio::test]
    async fn test_pending_agency_can_log_in() {
        let user = account(Role::Agency, UserStatus::Pending, "motdepasse123");
        let service = Authenticator::new(Arc::new(MemoryDirectory::with_users(vec![user.clone()])), jwt());

        let session = service.login(user.email, "motdepasse123".to_string()).await;
        tokio_test::assert_ok!(session);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let user = account(Role::Agent, UserStatus::Active, "motdepasse123");
        let service = Authenticator::new(Arc::new(MemoryDirectory::with_users(vec![user.clone()])), jwt());

        let wrong = service.login(user.email, "mauvais123".to_string()).await;
        let unknown = service
            .login("nobody@nowhere.fr".to_string(), "motdepasse123".to_string())
            .await;

        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_garbage_token_is_not_an_error() {
        let service = Authenticator::new(Arc::new(MemoryDirectory::new()), jwt());
        assert!(service.verify_token("not.a.token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_suspension_revokes_existing_tokens() {
        let user = account(Role::Agency, UserStatus::Active, "motdepasse123");
        let service = Authenticator::new(Arc::new(MemoryDirectory::with_users(vec![user.clone()])), jwt());
        let session = service
            .login(user.email.clone(), "motdepasse123".to_string())
            .await
            .unwrap();

        service
            .set_agency_status(user.id, UserStatus::Suspended)
            .await
            .unwrap();

        assert!(service
            .verify_token(&session.token.access_token)
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            service.login(user.email, "motdepasse123".to_string()).await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_approval_only_targets_agencies() {
        let agent = account(Role::Agent, UserStatus::Active, "motdepasse123");
        let service = Authenticator::new(Arc::new(MemoryDirectory::with_users(vec![agent.clone()])), jwt());

        assert!(matches!(
            service.set_agency_status(agent.id, UserStatus::Active).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.set_agency_status(Uuid::new_v4(), UserStatus::Active).await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_list_agencies_by_status() {
        let mut pending = account(Role::Agency, UserStatus::Pending, "motdepasse123");
        pending.email = "pending@evasion.fr".to_string();
        let active = account(Role::Agency, UserStatus::Active, "motdepasse123");
        let agent = account(Role::Agent, UserStatus::Pending, "motdepasse123");
        let service = Authenticator::new(
            Arc::new(MemoryDirectory::with_users(vec![pending.clone(), active, agent])),
            jwt(),
        );

        let all = service.list_agencies(None).await.unwrap();
        let waiting = service.list_agencies(Some(UserStatus::Pending)).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(waiting.iter().map(|a| a.id).collect::<Vec<_>>(), vec![pending.id]);
    }
}
