//! gRPC client for the agent side of backoffice-service.

use tonic::transport::Channel;
use tracing::debug;
use uuid::Uuid;

use common::{AppError, AppResult, GrpcClientConfig};
use domain::{Agent, AgentFilter, AgentPatch, AgentStats, NewAgent, Permission};
use proto::backoffice::{
    agent_service_client::AgentServiceClient as ProtoAgentServiceClient, CreateAgentRequest,
    IdRequest, ListAgentsRequest, MaybeAgent, StatsRequest, UpdateAgentRequest,
    UpdatePermissionsRequest,
};

use super::convert::{agent_from_proto, grant_to_proto};

/// gRPC client wrapper for the agent service.
pub struct AgentClient {
    client: ProtoAgentServiceClient<Channel>,
}

fn maybe_agent(reply: MaybeAgent) -> AppResult<Option<Agent>> {
    reply.agent.map(agent_from_proto).transpose()
}

impl AgentClient {
    pub fn connect(config: &GrpcClientConfig) -> Result<Self, tonic::transport::Error> {
        debug!("Connecting to agent service at {}", config.endpoint);
        let channel = super::convert::channel(config)?;
        Ok(Self {
            client: ProtoAgentServiceClient::new(channel),
        })
    }

    pub async fn list(&self, filter: AgentFilter) -> AppResult<Vec<Agent>> {
        let request = tonic::Request::new(ListAgentsRequest {
            search: filter.search,
            status: filter.status.map(|s| s.as_str().to_string()),
        });

        let mut client = self.client.clone();
        let response = client.list_agents(request).await.map_err(AppError::from)?;
        response
            .into_inner()
            .agents
            .into_iter()
            .map(agent_from_proto)
            .collect()
    }

    pub async fn create(&self, draft: NewAgent) -> AppResult<Agent> {
        let request = tonic::Request::new(CreateAgentRequest {
            last_name: draft.last_name,
            first_name: draft.first_name,
            email: draft.email,
            phone: draft.phone,
            permissions: draft.permissions.iter().map(grant_to_proto).collect(),
        });

        let mut client = self.client.clone();
        let response = client.create_agent(request).await.map_err(AppError::from)?;
        agent_from_proto(response.into_inner())
    }

    /// Update contact fields. Grants go through [`AgentClient::update_permissions`].
    pub async fn update(&self, id: Uuid, patch: AgentPatch) -> AppResult<Option<Agent>> {
        let request = tonic::Request::new(UpdateAgentRequest {
            id: id.to_string(),
            last_name: patch.last_name,
            first_name: patch.first_name,
            email: patch.email,
            phone: patch.phone,
        });

        let mut client = self.client.clone();
        let response = client.update_agent(request).await.map_err(AppError::from)?;
        maybe_agent(response.into_inner())
    }

    /// Replace the grant list of an agent.
    pub async fn update_permissions(
        &self,
        id: Uuid,
        permissions: Vec<Permission>,
    ) -> AppResult<Option<Agent>> {
        let request = tonic::Request::new(UpdatePermissionsRequest {
            id: id.to_string(),
            permissions: permissions.iter().map(grant_to_proto).collect(),
        });

        let mut client = self.client.clone();
        let response = client
            .update_permissions(request)
            .await
            .map_err(AppError::from)?;
        maybe_agent(response.into_inner())
    }

    pub async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Agent>> {
        let request = tonic::Request::new(IdRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client
            .toggle_agent_status(request)
            .await
            .map_err(AppError::from)?;
        maybe_agent(response.into_inner())
    }

    /// `false` when no agent had this id.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let request = tonic::Request::new(IdRequest { id: id.to_string() });

        let mut client = self.client.clone();
        let response = client.delete_agent(request).await.map_err(AppError::from)?;
        Ok(response.into_inner().deleted)
    }

    pub async fn stats(&self) -> AppResult<AgentStats> {
        let mut client = self.client.clone();
        let response = client
            .agent_stats(tonic::Request::new(StatsRequest {}))
            .await
            .map_err(AppError::from)?;
        let proto = response.into_inner();

        Ok(AgentStats {
            total: proto.total as usize,
            active: proto.active as usize,
            suspended: proto.suspended as usize,
        })
    }
}
