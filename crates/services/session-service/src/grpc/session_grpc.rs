//! gRPC implementation for SessionService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use crate::service::SessionService;
use common::AppError;
use domain::{Permission, RegisterAgency, User, UserStatus};
use proto::session::{
    session_service_server::SessionService as SessionServiceProto, Grant, ListAgenciesRequest,
    ListAgenciesResponse, LoginRequest, LoginResponse, RegisterRequest, SetAgencyStatusRequest,
    UserMessage, VerifyTokenRequest, VerifyTokenResponse,
};

/// gRPC service wrapper for SessionService.
pub struct SessionGrpcService {
    service: Arc<dyn SessionService>,
}

impl SessionGrpcService {
    pub fn new(service: Arc<dyn SessionService>) -> Self {
        Self { service }
    }
}

fn grant_to_proto(grant: &Permission) -> Grant {
    Grant {
        module: grant.module.as_str().to_string(),
        actions: grant.actions.iter().map(|a| a.as_str().to_string()).collect(),
    }
}

/// Convert domain User to its wire form (never carries the hash).
fn user_to_proto(user: &User) -> UserMessage {
    UserMessage {
        id: user.id.to_string(),
        email: user.email.clone(),
        last_name: user.last_name.clone(),
        first_name: user.first_name.clone(),
        role: user.role.to_string(),
        agency_id: user.agency_id.map(|id| id.to_string()),
        has_permissions: user.permissions.is_some(),
        permissions: user.grants().iter().map(grant_to_proto).collect(),
        status: user.status.map(|s| s.to_string()),
        created_at: user.created_at.to_rfc3339(),
    }
}

fn parse_status(raw: &str) -> Result<UserStatus, Status> {
    raw.parse::<UserStatus>()
        .map_err(|e| Status::from(AppError::from(e)))
}

#[tonic::async_trait]
impl SessionServiceProto for SessionGrpcService {
    async fn register(
        &self,
        request: Request<RegisterRequest>,
    ) -> Result<Response<UserMessage>, Status> {
        let req = request.into_inner();

        let agency = self
            .service
            .register(RegisterAgency {
                email: req.email,
                password: req.password,
                last_name: req.last_name,
                first_name: req.first_name,
            })
            .await
            .map_err(Status::from)?;

        Ok(Response::new(user_to_proto(&agency)))
    }

    async fn login(
        &self,
        request: Request<LoginRequest>,
    ) -> Result<Response<LoginResponse>, Status> {
        let req = request.into_inner();

        let session = self
            .service
            .login(req.email, req.password)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(LoginResponse {
            access_token: session.token.access_token,
            token_type: session.token.token_type,
            expires_in: session.token.expires_in,
            user: Some(user_to_proto(&session.user)),
        }))
    }

    async fn verify_token(
        &self,
        request: Request<VerifyTokenRequest>,
    ) -> Result<Response<VerifyTokenResponse>, Status> {
        let req = request.into_inner();

        let user = self
            .service
            .verify_token(&req.token)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(VerifyTokenResponse {
            valid: user.is_some(),
            user: user.as_ref().map(user_to_proto),
        }))
    }

    async fn list_agencies(
        &self,
        request: Request<ListAgenciesRequest>,
    ) -> Result<Response<ListAgenciesResponse>, Status> {
        let req = request.into_inner();
        let status = req.status.as_deref().map(parse_status).transpose()?;

        let agencies = self
            .service
            .list_agencies(status)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(ListAgenciesResponse {
            agencies: agencies.iter().map(user_to_proto).collect(),
        }))
    }

    async fn set_agency_status(
        &self,
        request: Request<SetAgencyStatusRequest>,
    ) -> Result<Response<UserMessage>, Status> {
        let req = request.into_inner();
        let id = req
            .id
            .parse()
            .map_err(|_| Status::invalid_argument("Invalid agency id"))?;
        let status = parse_status(&req.status)?;

        let agency = self
            .service
            .set_agency_status(id, status)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(user_to_proto(&agency)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Action, Module, Role};
    use uuid::Uuid;

    #[test]
    fn test_user_to_proto_keeps_grant_presence() {
        let base = User::new(
            Uuid::new_v4(),
            "agent@agence.fr".to_string(),
            "secret-hash".to_string(),
            "Dubois".to_string(),
            "Jean".to_string(),
            Role::Agent,
        );

        let without = user_to_proto(&base);
        assert!(!without.has_permissions);
        assert_eq!(without.status, None);

        let with = user_to_proto(
            &base.with_permissions(vec![Permission::new(Module::Todos, [Action::Read, Action::Create])]),
        );
        assert!(with.has_permissions);
        assert_eq!(with.permissions[0].module, "todos");
        assert_eq!(with.permissions[0].actions, vec!["lire", "creer"]);
    }
}
