//! In-memory user directory.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use common::{AppError, AppResult};
use domain::{Role, User, UserStatus};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Account storage used by the session service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>>;

    /// Lookup is case-insensitive.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// Store a new account; fails with a conflict when the email is taken.
    async fn insert(&self, user: User) -> AppResult<User>;

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>>;

    /// Set the status of an account; `None` when the id is unknown.
    async fn set_status(&self, id: Uuid, status: UserStatus) -> AppResult<Option<User>>;
}

/// Directory backed by a vector behind a tokio `RwLock`.
///
/// Not durable; state is lost on restart.
#[derive(Default)]
pub struct MemoryDirectory {
    users: RwLock<Vec<User>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: RwLock::new(users),
        }
    }
}

fn same_email(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| same_email(&u.email, email)).cloned())
    }

    async fn insert(&self, user: User) -> AppResult<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| same_email(&u.email, &user.email)) {
            return Err(AppError::conflict("Account"));
        }
        users.push(user.clone());
        Ok(user)
    }

    async fn list_by_role(&self, role: Role) -> AppResult<Vec<User>> {
        let users = self.users.read().await;
        Ok(users.iter().filter(|u| u.role == role).cloned().collect())
    }

    async fn set_status(&self, id: Uuid, status: UserStatus) -> AppResult<Option<User>> {
        let mut users = self.users.write().await;
        Ok(users.iter_mut().find(|u| u.id == id).map(|user| {
            user.set_status(status);
            user.clone()
        }))
    }
}
