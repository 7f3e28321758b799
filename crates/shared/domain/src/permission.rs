//! Permission grants.
//!
//! A grant pairs one module with the set of actions an agent may perform on
//! it. Well-formed grant lists hold at most one grant per module and never
//! an empty grant; lists coming from outside may be malformed and are read
//! first-match.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{DomainError, DomainResult};
use crate::module::{Action, Module};

/// A (module, action set) grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Permission {
    pub module: Module,
    pub actions: BTreeSet<Action>,
}

impl Permission {
    pub fn new(module: Module, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            module,
            actions: actions.into_iter().collect(),
        }
    }

    pub fn allows(&self, action: Action) -> bool {
        self.actions.contains(&action)
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// First grant for `module`, as the evaluator reads it.
pub fn find_grant(grants: &[Permission], module: Module) -> Option<&Permission> {
    grants.iter().find(|grant| grant.module == module)
}

/// Enable or disable one action of one module in a grant list.
///
/// Enabling creates the grant (appended) when the module has none yet.
/// Disabling the last action of a grant removes the grant.
pub fn set_action(grants: &mut Vec<Permission>, module: Module, action: Action, enabled: bool) {
    match grants.iter().position(|grant| grant.module == module) {
        Some(index) if enabled => {
            grants[index].actions.insert(action);
        }
        Some(index) => {
            grants[index].actions.remove(&action);
            if grants[index].is_empty() {
                grants.remove(index);
            }
        }
        None if enabled => grants.push(Permission::new(module, [action])),
        None => {}
    }
}

/// Bring a grant list back to its invariants.
///
/// Duplicate modules are merged into the first occurrence and empty grants
/// are dropped. Relative order of first occurrences is kept.
pub fn normalize_grants(grants: Vec<Permission>) -> Vec<Permission> {
    let mut normalized: Vec<Permission> = Vec::with_capacity(grants.len());
    for grant in grants {
        match normalized.iter_mut().find(|g| g.module == grant.module) {
            Some(existing) => existing.actions.extend(grant.actions),
            None => normalized.push(grant),
        }
    }
    normalized.retain(|grant| !grant.is_empty());
    normalized
}

/// Reject grants on modules an agency cannot delegate.
pub fn ensure_grantable(grants: &[Permission]) -> DomainResult<()> {
    match grants.iter().find(|grant| !grant.module.is_grantable()) {
        Some(grant) => Err(DomainError::validation(format!(
            "Module '{}' cannot be granted to an agent",
            grant.module
        ))),
        None => Ok(()),
    }
}
