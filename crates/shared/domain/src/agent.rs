//! Agent entity: agency staff managed by the agency account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::{STATUS_ACTIVE, STATUS_SUSPENDED};
use crate::error::{filled_patch, require_filled, DomainError, DomainResult};
use crate::permission::{ensure_grantable, normalize_grants, Permission};
use crate::record::{contains_ci, search_term, Record};

/// Agent status; toggling is an involution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum AgentStatus {
    #[serde(rename = "actif")]
    Active,
    #[serde(rename = "suspendu")]
    Suspended,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Active => STATUS_ACTIVE,
            AgentStatus::Suspended => STATUS_SUSPENDED,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            AgentStatus::Active => AgentStatus::Suspended,
            AgentStatus::Suspended => AgentStatus::Active,
        }
    }
}

impl FromStr for AgentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(AgentStatus::Active),
            STATUS_SUSPENDED => Ok(AgentStatus::Suspended),
            other => Err(DomainError::unknown("agent status", other)),
        }
    }
}

impl std::fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Agent {
    pub id: Uuid,
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub permissions: Vec<Permission>,
    pub status: AgentStatus,
    pub created_at: DateTime<Utc>,
}

/// Agent creation input.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewAgent {
    pub last_name: String,
    pub first_name: String,
    pub email: String,
    pub phone: String,
    pub permissions: Vec<Permission>,
}

impl Agent {
    /// Build a new active agent.
    ///
    /// # Errors
    /// Validation error when last name, first name or email is blank, or
    /// when a grant targets a module that cannot be delegated.
    pub fn create(draft: NewAgent, id: Uuid, created_at: DateTime<Utc>) -> DomainResult<Self> {
        require_filled("Last name", &draft.last_name)?;
        require_filled("First name", &draft.first_name)?;
        require_filled("Email", &draft.email)?;
        let permissions = normalize_grants(draft.permissions);
        ensure_grantable(&permissions)?;

        Ok(Self {
            id,
            last_name: draft.last_name.trim().to_string(),
            first_name: draft.first_name.trim().to_string(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.trim().to_string(),
            permissions,
            status: AgentStatus::Active,
            created_at,
        })
    }

    pub fn is_active(&self) -> bool {
        self.status == AgentStatus::Active
    }
}

/// Partial agent update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentPatch {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub permissions: Option<Vec<Permission>>,
}

impl AgentPatch {
    /// Patch replacing only the grant list.
    pub fn permissions(grants: Vec<Permission>) -> Self {
        Self {
            permissions: Some(grants),
            ..Self::default()
        }
    }

    /// Check the patch and normalize its grants.
    ///
    /// Required fields may be omitted but not blanked. Text is trimmed the
    /// same way as on creation.
    pub fn validate(mut self) -> DomainResult<Self> {
        self.last_name = filled_patch("Last name", self.last_name)?;
        self.first_name = filled_patch("First name", self.first_name)?;
        self.email = filled_patch("Email", self.email)?;
        self.phone = self.phone.map(|phone| phone.trim().to_string());
        if let Some(grants) = self.permissions.take() {
            let grants = normalize_grants(grants);
            ensure_grantable(&grants)?;
            self.permissions = Some(grants);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AgentFilter {
    /// Matched against last name, first name and email.
    pub search: Option<String>,
    pub status: Option<AgentStatus>,
}

impl Record for Agent {
    type Filter = AgentFilter;
    type Patch = AgentPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn matches(&self, filter: &AgentFilter) -> bool {
        let matches_search = match search_term(&filter.search) {
            Some(term) => {
                contains_ci(&self.last_name, &term)
                    || contains_ci(&self.first_name, &term)
                    || contains_ci(&self.email, &term)
            }
            None => true,
        };
        let matches_status = filter.status.map_or(true, |status| self.status == status);
        matches_search && matches_status
    }

    fn apply(&mut self, patch: AgentPatch) {
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(permissions) = patch.permissions {
            self.permissions = permissions;
        }
    }

    fn toggle_status(&mut self) {
        self.status = self.status.toggled();
    }
}

/// Head counts shown above the agent list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AgentStats {
    pub total: usize,
    pub active: usize,
    pub suspended: usize,
}

impl AgentStats {
    pub fn from_agents(agents: &[Agent]) -> Self {
        let active = agents.iter().filter(|a| a.is_active()).count();
        Self {
            total: agents.len(),
            active,
            suspended: agents.len() - active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::{Action, Module};

    fn draft() -> NewAgent {
        NewAgent {
            last_name: "Martin".to_string(),
            first_name: "Sophie".to_string(),
            email: "sophie.martin@agence.com".to_string(),
            phone: "+33 1 23 45 67 89".to_string(),
            permissions: vec![Permission::new(Module::Clients, [Action::Read])],
        }
    }

    #[test]
    fn test_create_defaults_to_active() {
        let agent = Agent::create(draft(), Uuid::new_v4(), Utc::now()).unwrap();
        assert_eq!(agent.status, AgentStatus::Active);
        assert_eq!(agent.permissions.len(), 1);
    }

    #[test]
    fn test_create_rejects_blank_required_fields() {
        for blank in [
            NewAgent {
                last_name: "  ".to_string(),
                ..draft()
            },
            NewAgent {
                first_name: String::new(),
                ..draft()
            },
            NewAgent {
                email: String::new(),
                ..draft()
            },
        ] {
            assert!(matches!(
                Agent::create(blank, Uuid::new_v4(), Utc::now()),
                Err(DomainError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_phone_is_optional() {
        let agent = Agent::create(
            NewAgent {
                phone: String::new(),
                ..draft()
            },
            Uuid::new_v4(),
            Utc::now(),
        );
        assert!(agent.is_ok());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut agent = Agent::create(draft(), Uuid::new_v4(), Utc::now()).unwrap();
        agent.toggle_status();
        assert_eq!(agent.status, AgentStatus::Suspended);
        agent.toggle_status();
        assert_eq!(agent.status, AgentStatus::Active);
    }

    #[test]
    fn test_search_is_case_insensitive_over_names_and_email() {
        let agent = Agent::create(draft(), Uuid::new_v4(), Utc::now()).unwrap();
        let search = |term: &str| AgentFilter {
            search: Some(term.to_string()),
            status: None,
        };

        assert!(agent.matches(&search("MARTIN")));
        assert!(agent.matches(&search("soph")));
        assert!(agent.matches(&search("@agence.com")));
        assert!(!agent.matches(&search("dubois")));
        assert!(!agent.matches(&AgentFilter {
            search: None,
            status: Some(AgentStatus::Suspended),
        }));
    }

    #[test]
    fn test_patch_cannot_blank_required_fields() {
        let patch = AgentPatch {
            email: Some(" ".to_string()),
            ..AgentPatch::default()
        };
        assert!(patch.validate().is_err());
    }

    #[test]
    fn test_patch_is_trimmed_like_creation() {
        let mut agent = Agent::create(
            NewAgent {
                last_name: " Martin ".to_string(),
                email: " s@a.fr ".to_string(),
                ..draft()
            },
            Uuid::new_v4(),
            Utc::now(),
        )
        .unwrap();
        assert_eq!(agent.last_name, "Martin");
        assert_eq!(agent.email, "s@a.fr");

        let patch = AgentPatch {
            last_name: Some(" Dubois ".to_string()),
            email: Some(" j@a.fr ".to_string()),
            phone: Some(" +33 6 00 00 00 00 ".to_string()),
            ..AgentPatch::default()
        }
        .validate()
        .unwrap();
        agent.apply(patch);

        assert_eq!(agent.last_name, "Dubois");
        assert_eq!(agent.email, "j@a.fr");
        assert_eq!(agent.phone, "+33 6 00 00 00 00");
        assert_eq!(agent.first_name, "Sophie");
    }

    #[test]
    fn test_patch_applies_only_given_fields() {
        let mut agent = Agent::create(draft(), Uuid::new_v4(), Utc::now()).unwrap();
        agent.apply(AgentPatch {
            phone: Some("+33 6 00 00 00 00".to_string()),
            ..AgentPatch::default()
        });

        assert_eq!(agent.phone, "+33 6 00 00 00 00");
        assert_eq!(agent.last_name, "Martin");
        assert_eq!(agent.permissions.len(), 1);
    }

    #[test]
    fn test_stats() {
        let mut agents = vec![
            Agent::create(draft(), Uuid::new_v4(), Utc::now()).unwrap(),
            Agent::create(draft(), Uuid::new_v4(), Utc::now()).unwrap(),
        ];
        agents[1].toggle_status();

        assert_eq!(
            AgentStats::from_agents(&agents),
            AgentStats {
                total: 2,
                active: 1,
                suspended: 1
            }
        );
    }
}
