//! Navigation visibility filter.
//!
//! Visibility is decided by an ordered rule list; the first rule that has an
//! opinion about an entry settles it.

use serde::Serialize;

use crate::access::accessible_modules;
use crate::constants::{PATH_DASHBOARD, PATH_PROFILE};
use crate::module::Module;
use crate::user::{Role, User};

/// What a menu entry points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavTarget {
    Dashboard,
    Profile,
    Module(Module),
}

impl NavTarget {
    pub fn id(&self) -> &'static str {
        match self {
            NavTarget::Dashboard => "dashboard",
            NavTarget::Profile => "profile",
            NavTarget::Module(module) => module.as_str(),
        }
    }

    pub fn path(&self) -> String {
        match self {
            NavTarget::Dashboard => PATH_DASHBOARD.to_string(),
            NavTarget::Profile => PATH_PROFILE.to_string(),
            NavTarget::Module(module) => module.path(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NavTarget::Dashboard => "Tableau de bord",
            NavTarget::Profile => "Profil",
            NavTarget::Module(module) => module.label(),
        }
    }
}

/// Static menu entry.
#[derive(Debug, Clone, Copy)]
pub struct MenuEntry {
    pub target: NavTarget,
    /// Roles the entry is reserved for; `None` means any role.
    pub roles: Option<&'static [Role]>,
}

impl MenuEntry {
    const fn open(target: NavTarget) -> Self {
        Self {
            target,
            roles: None,
        }
    }

    const fn reserved(target: NavTarget, roles: &'static [Role]) -> Self {
        Self {
            target,
            roles: Some(roles),
        }
    }

    fn reserved_for(&self, role: Role) -> bool {
        self.roles.is_some_and(|roles| roles.contains(&role))
    }
}

const AGENCY_ONLY: &[Role] = &[Role::Agency];
const SUPERADMIN_ONLY: &[Role] = &[Role::Superadmin];

/// The menu, in display order.
pub const MENU: [MenuEntry; 18] = [
    MenuEntry::open(NavTarget::Dashboard),
    MenuEntry::reserved(NavTarget::Profile, AGENCY_ONLY),
    MenuEntry::reserved(NavTarget::Module(Module::Agencies), SUPERADMIN_ONLY),
    MenuEntry::reserved(NavTarget::Module(Module::SupportTickets), SUPERADMIN_ONLY),
    MenuEntry::open(NavTarget::Module(Module::Clients)),
    MenuEntry::open(NavTarget::Module(Module::Suppliers)),
    MenuEntry::open(NavTarget::Module(Module::PurchaseOrders)),
    MenuEntry::open(NavTarget::Module(Module::Invoices)),
    MenuEntry::open(NavTarget::Module(Module::Receivables)),
    MenuEntry::open(NavTarget::Module(Module::Cash)),
    MenuEntry::open(NavTarget::Module(Module::Situation)),
    MenuEntry::open(NavTarget::Module(Module::FlightTickets)),
    MenuEntry::open(NavTarget::Module(Module::Packages)),
    MenuEntry::open(NavTarget::Module(Module::Storefront)),
    MenuEntry::open(NavTarget::Module(Module::Todos)),
    MenuEntry::reserved(NavTarget::Module(Module::Agents), AGENCY_ONLY),
    MenuEntry::open(NavTarget::Module(Module::Logs)),
    MenuEntry::open(NavTarget::Module(Module::Settings)),
];

/// One step of the visibility decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRule {
    /// Entries reserved for other roles are hidden.
    RequiredRoles,
    /// Dashboard is always shown; profile only to agencies.
    AlwaysVisible,
    /// Superadmin entries are shown to superadmin only.
    SuperadminOnly,
    /// Remaining entries follow the accessible-module list.
    AccessibleModule,
}

/// Rules in precedence order.
pub const VISIBILITY_RULES: [VisibilityRule; 4] = [
    VisibilityRule::RequiredRoles,
    VisibilityRule::AlwaysVisible,
    VisibilityRule::SuperadminOnly,
    VisibilityRule::AccessibleModule,
];

impl VisibilityRule {
    /// `Some(visible)` when this rule settles the entry, `None` to defer.
    pub fn decide(&self, entry: &MenuEntry, role: Role, accessible: &[Module]) -> Option<bool> {
        match self {
            VisibilityRule::RequiredRoles => match entry.roles {
                Some(roles) if !roles.contains(&role) => Some(false),
                _ => None,
            },
            VisibilityRule::AlwaysVisible => match entry.target {
                NavTarget::Dashboard => Some(true),
                NavTarget::Profile => Some(role == Role::Agency),
                NavTarget::Module(_) => None,
            },
            VisibilityRule::SuperadminOnly => entry
                .reserved_for(Role::Superadmin)
                .then_some(role == Role::Superadmin),
            VisibilityRule::AccessibleModule => match entry.target {
                NavTarget::Module(module) => Some(accessible.contains(&module)),
                NavTarget::Dashboard | NavTarget::Profile => Some(false),
            },
        }
    }
}

/// Run the rule list; an entry no rule settles stays hidden.
pub fn is_visible(entry: &MenuEntry, role: Role, accessible: &[Module]) -> bool {
    VISIBILITY_RULES
        .iter()
        .find_map(|rule| rule.decide(entry, role, accessible))
        .unwrap_or(false)
}

/// Rendering state of a visible entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum EntryStatus {
    Active,
    /// Shown disabled with a pending-approval marker; clicks do nothing.
    Pending,
}

pub fn entry_status(target: NavTarget, role: Role, accessible: &[Module]) -> EntryStatus {
    let active = match (target, role) {
        (NavTarget::Dashboard | NavTarget::Profile, _) => true,
        (_, Role::Superadmin | Role::Agency) => true,
        (NavTarget::Module(module), Role::Agent) => accessible.contains(&module),
    };
    if active {
        EntryStatus::Active
    } else {
        EntryStatus::Pending
    }
}

/// Visible menu item as sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct NavItem {
    pub id: String,
    pub label: String,
    pub path: String,
    pub status: EntryStatus,
}

/// Menu entries visible to `user`, in menu order.
pub fn visible_entries(user: &User) -> Vec<NavItem> {
    let accessible = accessible_modules(Some(user));
    MENU.iter()
        .filter(|entry| is_visible(entry, user.role, &accessible))
        .map(|entry| NavItem {
            id: entry.target.id().to_string(),
            label: entry.target.label().to_string(),
            path: entry.target.path(),
            status: entry_status(entry.target, user.role, &accessible),
        })
        .collect()
}
