//! gRPC implementation for AgentService.

use std::sync::Arc;

use tonic::{Request, Response, Status};

use super::convert::{agent_to_proto, grants_from_proto, parse_id, parse_opt};
use crate::service::AgentService;
use domain::{AgentFilter, AgentPatch, NewAgent};
use proto::backoffice::{
    agent_service_server::AgentService as AgentServiceProto, AgentMessage, AgentStatsResponse,
    CreateAgentRequest, DeleteResponse, IdRequest, ListAgentsRequest, ListAgentsResponse,
    MaybeAgent, StatsRequest, UpdateAgentRequest, UpdatePermissionsRequest,
};

/// gRPC service wrapper for AgentService.
pub struct AgentGrpcService {
    service: Arc<dyn AgentService>,
}

impl AgentGrpcService {
    pub fn new(service: Arc<dyn AgentService>) -> Self {
        Self { service }
    }
}

#[tonic::async_trait]
impl AgentServiceProto for AgentGrpcService {
    async fn list_agents(
        &self,
        request: Request<ListAgentsRequest>,
    ) -> Result<Response<ListAgentsResponse>, Status> {
        let req = request.into_inner();
        let filter = AgentFilter {
            search: req.search,
            status: parse_opt(req.status)?,
        };

        let agents = self
            .service
            .list_agents(filter)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(ListAgentsResponse {
            agents: agents.iter().map(agent_to_proto).collect(),
        }))
    }

    async fn create_agent(
        &self,
        request: Request<CreateAgentRequest>,
    ) -> Result<Response<AgentMessage>, Status> {
        let req = request.into_inner();
        let input = NewAgent {
            last_name: req.last_name,
            first_name: req.first_name,
            email: req.email,
            phone: req.phone,
            permissions: grants_from_proto(req.permissions)?,
        };

        let agent = self
            .service
            .create_agent(input)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(agent_to_proto(&agent)))
    }

    async fn update_agent(
        &self,
        request: Request<UpdateAgentRequest>,
    ) -> Result<Response<MaybeAgent>, Status> {
        let req = request.into_inner();
        let id = parse_id(&req.id)?;
        let patch = AgentPatch {
            last_name: req.last_name,
            first_name: req.first_name,
            email: req.email,
            phone: req.phone,
            permissions: None,
        };

        let agent = self
            .service
            .update_agent(id, patch)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(MaybeAgent {
            agent: agent.as_ref().map(agent_to_proto),
        }))
    }

    async fn update_permissions(
        &self,
        request: Request<UpdatePermissionsRequest>,
    ) -> Result<Response<MaybeAgent>, Status> {
        let req = request.into_inner();
        let id = parse_id(&req.id)?;
        let grants = grants_from_proto(req.permissions)?;

        let agent = self
            .service
            .update_permissions(id, grants)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(MaybeAgent {
            agent: agent.as_ref().map(agent_to_proto),
        }))
    }

    async fn toggle_agent_status(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<MaybeAgent>, Status> {
        let id = parse_id(&request.into_inner().id)?;

        let agent = self
            .service
            .toggle_status(id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(MaybeAgent {
            agent: agent.as_ref().map(agent_to_proto),
        }))
    }

    async fn delete_agent(
        &self,
        request: Request<IdRequest>,
    ) -> Result<Response<DeleteResponse>, Status> {
        let id = parse_id(&request.into_inner().id)?;

        let deleted = self
            .service
            .delete_agent(id)
            .await
            .map_err(Status::from)?;

        Ok(Response::new(DeleteResponse { deleted }))
    }

    async fn agent_stats(
        &self,
        _request: Request<StatsRequest>,
    ) -> Result<Response<AgentStatsResponse>, Status> {
        let stats = self.service.stats().await.map_err(Status::from)?;

        Ok(Response::new(AgentStatsResponse {
            total: stats.total as u64,
            active: stats.active as u64,
            suspended: stats.suspended as u64,
        }))
    }
}
