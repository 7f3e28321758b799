//! Domain layer - access control rules and back-office entities.
//!
//! Pure logic with no infrastructure dependencies. The services and the
//! gateway share these types; the proto crate converts them to the wire.

pub mod access;
pub mod agent;
pub mod constants;
pub mod error;
pub mod guard;
pub mod module;
pub mod navigation;
pub mod password;
pub mod permission;
pub mod record;
pub mod todo;
pub mod user;

pub use access::{accessible_modules, check_permission, has_permission};
pub use agent::{Agent, AgentFilter, AgentPatch, AgentStats, AgentStatus, NewAgent};
pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use guard::{navigate, AuthSession, GuardState, Navigation, Route};
pub use module::{Action, Module};
pub use navigation::{visible_entries, EntryStatus, NavItem};
pub use password::Password;
pub use permission::{set_action, Permission};
pub use record::Record;
pub use todo::{NewTodo, Priority, Todo, TodoFilter, TodoKind, TodoPatch, TodoStats, TodoStatus};
pub use user::{RegisterAgency, Role, User, UserResponse, UserStatus};
