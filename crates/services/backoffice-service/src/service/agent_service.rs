//! Agent service - the agency's staff and their grants.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use common::AppResult;
use domain::{Agent, AgentFilter, AgentPatch, AgentStats, NewAgent, Permission};

use crate::repository::AgentRepository;

/// Agent service trait for dependency injection.
#[async_trait]
pub trait AgentService: Send + Sync {
    async fn list_agents(&self, filter: AgentFilter) -> AppResult<Vec<Agent>>;

    /// Validate and store a new active agent.
    async fn create_agent(&self, input: NewAgent) -> AppResult<Agent>;

    /// `None` when no agent has `id`.
    async fn update_agent(&self, id: Uuid, patch: AgentPatch) -> AppResult<Option<Agent>>;

    /// Replace the grant list after normalization.
    async fn update_permissions(
        &self,
        id: Uuid,
        grants: Vec<Permission>,
    ) -> AppResult<Option<Agent>>;

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Agent>>;

    /// Idempotent; reports whether an agent was removed.
    async fn delete_agent(&self, id: Uuid) -> AppResult<bool>;

    async fn stats(&self) -> AppResult<AgentStats>;
}

pub struct AgentManager {
    repo: Arc<dyn AgentRepository>,
}

impl AgentManager {
    pub fn new(repo: Arc<dyn AgentRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl AgentService for AgentManager {
    async fn list_agents(&self, filter: AgentFilter) -> AppResult<Vec<Agent>> {
        self.repo.list(filter).await
    }

    async fn create_agent(&self, input: NewAgent) -> AppResult<Agent> {
        let agent = Agent::create(input, Uuid::new_v4(), Utc::now())?;
        let agent = self.repo.insert(agent).await?;
        info!("Agent {} created", agent.id);
        Ok(agent)
    }

    async fn update_agent(&self, id: Uuid, patch: AgentPatch) -> AppResult<Option<Agent>> {
        let patch = patch.validate()?;
        let updated = self.repo.update(id, patch).await?;
        if updated.is_none() {
            debug!("Update of unknown agent {} ignored", id);
        }
        Ok(updated)
    }

    async fn update_permissions(
        &self,
        id: Uuid,
        grants: Vec<Permission>,
    ) -> AppResult<Option<Agent>> {
        self.update_agent(id, AgentPatch::permissions(grants)).await
    }

    async fn toggle_status(&self, id: Uuid) -> AppResult<Option<Agent>> {
        let toggled = self.repo.toggle_status(id).await?;
        if let Some(agent) = &toggled {
            info!("Agent {} is now {}", agent.id, agent.status);
        }
        Ok(toggled)
    }

    async fn delete_agent(&self, id: Uuid) -> AppResult<bool> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            info!("Agent {} deleted", id);
        }
        Ok(deleted)
    }

    async fn stats(&self) -> AppResult<AgentStats> {
        let agents = self.repo.all().await?;
        Ok(AgentStats::from_agents(&agents))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockAgentRepository;
    use common::AppError;
    use domain::{Action, Module};
    use mockall::predicate::eq;

    fn input() -> NewAgent {
        NewAgent {
            last_name: "Dubois".to_string(),
            first_name: "Jean".to_string(),
            email: "jean.dubois@agence.com".to_string(),
            phone: String::new(),
            permissions: vec![Permission::new(Module::Clients, [Action::Read])],
        }
    }

    #[tokio::test]
    async fn test_create_with_blank_email_never_reaches_repository() {
        let mut repo = MockAgentRepository::new();
        repo.expect_insert().never();

        let service = AgentManager::new(Arc::new(repo));
        let result = service
            .create_agent(NewAgent {
                email: " ".to_string(),
                ..input()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_refuses_non_grantable_module() {
        let mut repo = MockAgentRepository::new();
        repo.expect_insert().never();

        let service = AgentManager::new(Arc::new(repo));
        let result = service
            .create_agent(NewAgent {
                permissions: vec![Permission::new(Module::Agents, [Action::Read])],
                ..input()
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_stores_valid_agent() {
        let mut repo = MockAgentRepository::new();
        repo.expect_insert().times(1).returning(Ok);

        let service = AgentManager::new(Arc::new(repo));
        let agent = service.create_agent(input()).await.unwrap();

        assert!(agent.is_active());
    }

    #[tokio::test]
    async fn test_update_permissions_normalizes_grants() {
        let id = Uuid::new_v4();
        let mut repo = MockAgentRepository::new();
        repo.expect_update()
            .with(
                eq(id),
                eq(AgentPatch::permissions(vec![Permission::new(
                    Module::Clients,
                    [Action::Read, Action::Create],
                )])),
            )
            .times(1)
            .returning(|_, _| Ok(None));

        let service = AgentManager::new(Arc::new(repo));
        let result = service
            .update_permissions(
                id,
                vec![
                    Permission::new(Module::Clients, [Action::Read]),
                    Permission {
                        module: Module::Cash,
                        actions: Default::default(),
                    },
                    Permission::new(Module::Clients, [Action::Create]),
                ],
            )
            .await
            .unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_storage_failure_propagates() {
        let mut repo = MockAgentRepository::new();
        repo.expect_all()
            .returning(|| Err(AppError::service_unavailable("backoffice")));

        let service = AgentManager::new(Arc::new(repo));
        assert!(matches!(
            service.stats().await,
            Err(AppError::ServiceUnavailable(_))
        ));
    }
}
