//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::constants::{
    ROLE_AGENCY, ROLE_AGENT, ROLE_SUPERADMIN, STATUS_ACTIVE, STATUS_PENDING, STATUS_SUSPENDED,
};
use crate::error::DomainError;
use crate::permission::Permission;

/// User roles enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Role {
    #[serde(rename = "superadmin")]
    Superadmin,
    #[serde(rename = "agence")]
    Agency,
    #[serde(rename = "agent")]
    Agent,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => ROLE_SUPERADMIN,
            Role::Agency => ROLE_AGENCY,
            Role::Agent => ROLE_AGENT,
        }
    }

    /// Roles whose access is not driven by explicit grants.
    pub fn has_blanket_access(&self) -> bool {
        match self {
            Role::Superadmin | Role::Agency => true,
            Role::Agent => false,
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ROLE_SUPERADMIN => Ok(Role::Superadmin),
            ROLE_AGENCY => Ok(Role::Agency),
            ROLE_AGENT => Ok(Role::Agent),
            other => Err(DomainError::unknown("role", other)),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum UserStatus {
    #[serde(rename = "actif")]
    Active,
    #[serde(rename = "suspendu")]
    Suspended,
    #[serde(rename = "en_attente")]
    Pending,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => STATUS_ACTIVE,
            UserStatus::Suspended => STATUS_SUSPENDED,
            UserStatus::Pending => STATUS_PENDING,
        }
    }
}

impl FromStr for UserStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ACTIVE => Ok(UserStatus::Active),
            STATUS_SUSPENDED => Ok(UserStatus::Suspended),
            STATUS_PENDING => Ok(UserStatus::Pending),
            other => Err(DomainError::unknown("status", other)),
        }
    }
}

impl std::fmt::Display for UserStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated identity plus its access descriptor.
///
/// `permissions` only matters for [`Role::Agent`]; the other roles derive
/// their access from the role alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub last_name: String,
    pub first_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a user with no grants, no agency and no status.
    pub fn new(
        id: Uuid,
        email: String,
        password_hash: String,
        last_name: String,
        first_name: String,
        role: Role,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            last_name,
            first_name,
            role,
            agency_id: None,
            permissions: None,
            status: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = Some(permissions);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_agency(mut self, agency_id: Uuid) -> Self {
        self.agency_id = Some(agency_id);
        self
    }

    /// Grants as read by the evaluator (empty when none were recorded).
    pub fn grants(&self) -> &[Permission] {
        self.permissions.as_deref().unwrap_or(&[])
    }

    /// Agency account still waiting for platform approval.
    pub fn is_pending_agency(&self) -> bool {
        self.role == Role::Agency && self.status == Some(UserStatus::Pending)
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.status = Some(status);
    }
}

/// Agency self-registration data transfer object
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterAgency {
    pub email: String,
    pub password: String,
    pub last_name: String,
    pub first_name: String,
}

/// User response (safe to return to client)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<Permission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            last_name: user.last_name.clone(),
            first_name: user.first_name.clone(),
            role: user.role,
            agency_id: user.agency_id,
            permissions: user.permissions.clone(),
            status: user.status,
            created_at: user.created_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse::from(&user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agency(status: Option<UserStatus>) -> User {
        let mut user = User::new(
            Uuid::new_v4(),
            "contact@voyages.fr".to_string(),
            String::new(),
            "Voyages".to_string(),
            "Soleil".to_string(),
            Role::Agency,
        );
        user.status = status;
        user
    }

    #[test]
    fn test_role_round_trips_through_catalog_id() {
        for role in [Role::Superadmin, Role::Agency, Role::Agent] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_pending_agency_detection() {
        assert!(agency(Some(UserStatus::Pending)).is_pending_agency());
        assert!(!agency(Some(UserStatus::Active)).is_pending_agency());
        assert!(!agency(None).is_pending_agency());
    }

    #[test]
    fn test_grants_default_to_empty() {
        assert!(agency(None).grants().is_empty());
    }

    #[test]
    fn test_password_hash_never_serialized() {
        let mut user = agency(None);
        user.password_hash = "secret-hash".to_string();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("secret-hash"));
        assert!(json.contains("\"role\":\"agence\""));
    }
}
