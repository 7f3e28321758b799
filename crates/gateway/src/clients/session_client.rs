//! gRPC client for session-service.

use async_trait::async_trait;
use tonic::transport::Channel;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{User, UserStatus};
use proto::session::{
    session_service_client::SessionServiceClient as ProtoSessionServiceClient,
    ListAgenciesRequest, LoginRequest, RegisterRequest, SetAgencyStatusRequest,
    VerifyTokenRequest,
};

use super::convert::{required_user, user_from_proto};

#[cfg(test)]
use mockall::automock;

/// Token response from session-service.
#[derive(Debug, Clone, serde::Serialize, utoipa::ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Successful login: the token and the account it was issued for.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: TokenResponse,
    pub user: User,
}

/// Resolves a bearer token to the account behind it.
///
/// `Ok(None)` means the token is invalid, expired or belongs to a suspended
/// account. `Err(ServiceUnavailable)` means the question could not be asked.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> AppResult<Option<User>>;
}

/// gRPC client wrapper for session-service.
pub struct SessionClient {
    client: ProtoSessionServiceClient<Channel>,
}

impl SessionClient {
    /// Create the client; the connection is opened on first use.
    pub fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to session-service at {}", config.endpoint);
        let channel = super::convert::channel(config)?;
        Ok(Self {
            client: ProtoSessionServiceClient::new(channel),
        })
    }

    /// Register an agency; the account starts out pending approval.
    pub async fn register(
        &self,
        email: String,
        password: String,
        last_name: String,
        first_name: String,
    ) -> AppResult<User> {
        let request = tonic::Request::new(RegisterRequest {
            email,
            password,
            last_name,
            first_name,
        });

        let mut client = self.client.clone();
        let response = client.register(request).await.map_err(AppError::from)?;
        user_from_proto(response.into_inner())
    }

    pub async fn login(&self, email: String, password: String) -> AppResult<LoginResult> {
        let request = tonic::Request::new(LoginRequest { email, password });

        let mut client = self.client.clone();
        let response = client.login(request).await.map_err(AppError::from)?;
        let proto = response.into_inner();

        Ok(LoginResult {
            user: required_user(proto.user)?,
            token: TokenResponse {
                access_token: proto.access_token,
                token_type: proto.token_type,
                expires_in: proto.expires_in,
            },
        })
    }

    /// Agency accounts, optionally filtered by status.
    pub async fn list_agencies(&self, status: Option<UserStatus>) -> AppResult<Vec<User>> {
        let request = tonic::Request::new(ListAgenciesRequest {
            status: status.map(|s| s.as_str().to_string()),
        });

        let mut client = self.client.clone();
        let response = client.list_agencies(request).await.map_err(AppError::from)?;
        response
            .into_inner()
            .agencies
            .into_iter()
            .map(user_from_proto)
            .collect()
    }

    pub async fn set_agency_status(&self, id: Uuid, status: UserStatus) -> AppResult<User> {
        let request = tonic::Request::new(SetAgencyStatusRequest {
            id: id.to_string(),
            status: status.as_str().to_string(),
        });

        let mut client = self.client.clone();
        let response = client
            .set_agency_status(request)
            .await
            .map_err(AppError::from)?;
        user_from_proto(response.into_inner())
    }
}

#[async_trait]
impl TokenVerifier for SessionClient {
    async fn verify_token(&self, token: &str) -> AppResult<Option<User>> {
        let request = tonic::Request::new(VerifyTokenRequest {
            token: token.to_string(),
        });

        let mut client = self.client.clone();
        let response = client.verify_token(request).await.map_err(AppError::from)?;
        let proto = response.into_inner();

        if !proto.valid {
            return Ok(None);
        }
        required_user(proto.user).map(Some)
    }
}
