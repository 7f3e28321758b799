//! Permission evaluator.
//!
//! Pure functions over an explicit, possibly absent, user. Superadmin and
//! agency short-circuit on the role; only agents consult their grants.

use crate::module::{Action, Module};
use crate::permission::find_grant;
use crate::user::{Role, User};

/// Modules reachable by the platform operator.
pub const SUPERADMIN_MODULES: [Module; 3] =
    [Module::Agencies, Module::SupportTickets, Module::Settings];

/// Business modules reachable by an agency account.
pub const AGENCY_MODULES: [Module; 12] = [
    Module::Clients,
    Module::Suppliers,
    Module::PurchaseOrders,
    Module::Invoices,
    Module::Receivables,
    Module::Cash,
    Module::Situation,
    Module::FlightTickets,
    Module::Packages,
    Module::Storefront,
    Module::Agents,
    Module::Settings,
];

/// Whether `user` may perform `action` on `module`.
pub fn has_permission(user: Option<&User>, module: Module, action: Action) -> bool {
    let Some(user) = user else {
        return false;
    };

    match user.role {
        Role::Superadmin | Role::Agency => true,
        Role::Agent => find_grant(user.grants(), module).is_some_and(|grant| grant.allows(action)),
    }
}

/// [`has_permission`] over raw catalog identifiers.
///
/// Superadmin and agency are allowed whatever the identifiers. For agents an
/// identifier outside the catalogs names nothing, so it is refused.
pub fn check_permission(user: Option<&User>, module_id: &str, action_id: &str) -> bool {
    let Some(user) = user else {
        return false;
    };
    if user.role.has_blanket_access() {
        return true;
    }

    match (Module::parse(module_id), Action::parse(action_id)) {
        (Some(module), Some(action)) => has_permission(Some(user), module, action),
        _ => false,
    }
}

/// Modules `user` may navigate to, in display order.
///
/// For agents this is the grant order with duplicates removed, first
/// occurrence kept.
pub fn accessible_modules(user: Option<&User>) -> Vec<Module> {
    let Some(user) = user else {
        return Vec::new();
    };

    match user.role {
        Role::Superadmin => SUPERADMIN_MODULES.to_vec(),
        Role::Agency => AGENCY_MODULES.to_vec(),
        Role::Agent => {
            let mut modules: Vec<Module> = Vec::new();
            for grant in user.grants() {
                if !modules.contains(&grant.module) {
                    modules.push(grant.module);
                }
            }
            modules
        }
    }
}
