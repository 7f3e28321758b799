//! Module and action catalogs.
//!
//! A module is the unit of permission granting and navigation. Both catalogs
//! are closed: adding a variant forces every exhaustive match to be revisited.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{ACTION_CREATE, ACTION_DELETE, ACTION_READ, ACTION_UPDATE};
use crate::error::DomainError;

/// Functional area of the back-office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Module {
    #[serde(rename = "agences")]
    Agencies,
    #[serde(rename = "clients")]
    Clients,
    #[serde(rename = "fournisseurs")]
    Suppliers,
    #[serde(rename = "factures")]
    Invoices,
    #[serde(rename = "bons-commande")]
    PurchaseOrders,
    #[serde(rename = "creances")]
    Receivables,
    #[serde(rename = "caisse")]
    Cash,
    #[serde(rename = "packages")]
    Packages,
    #[serde(rename = "billets")]
    FlightTickets,
    #[serde(rename = "tickets")]
    SupportTickets,
    #[serde(rename = "todos")]
    Todos,
    #[serde(rename = "agents")]
    Agents,
    #[serde(rename = "logs")]
    Logs,
    #[serde(rename = "situation")]
    Situation,
    #[serde(rename = "vitrine")]
    Storefront,
    #[serde(rename = "parametres")]
    Settings,
}

impl Module {
    /// Every module of the catalog.
    pub const ALL: [Module; 16] = [
        Module::Agencies,
        Module::Clients,
        Module::Suppliers,
        Module::Invoices,
        Module::PurchaseOrders,
        Module::Receivables,
        Module::Cash,
        Module::Packages,
        Module::FlightTickets,
        Module::SupportTickets,
        Module::Todos,
        Module::Agents,
        Module::Logs,
        Module::Situation,
        Module::Storefront,
        Module::Settings,
    ];

    /// Modules an agency may delegate to its agents, in editor order.
    pub const GRANTABLE: [Module; 9] = [
        Module::Clients,
        Module::Suppliers,
        Module::Invoices,
        Module::PurchaseOrders,
        Module::Cash,
        Module::Packages,
        Module::FlightTickets,
        Module::Receivables,
        Module::Todos,
    ];

    /// Catalog identifier, also the route segment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::Agencies => "agences",
            Module::Clients => "clients",
            Module::Suppliers => "fournisseurs",
            Module::Invoices => "factures",
            Module::PurchaseOrders => "bons-commande",
            Module::Receivables => "creances",
            Module::Cash => "caisse",
            Module::Packages => "packages",
            Module::FlightTickets => "billets",
            Module::SupportTickets => "tickets",
            Module::Todos => "todos",
            Module::Agents => "agents",
            Module::Logs => "logs",
            Module::Situation => "situation",
            Module::Storefront => "vitrine",
            Module::Settings => "parametres",
        }
    }

    /// Human readable label used by the navigation menu.
    pub fn label(&self) -> &'static str {
        match self {
            Module::Agencies => "Agences",
            Module::Clients => "Clients",
            Module::Suppliers => "Fournisseurs",
            Module::Invoices => "Factures",
            Module::PurchaseOrders => "Bons de commande",
            Module::Receivables => "Créances",
            Module::Cash => "Caisse",
            Module::Packages => "Packages",
            Module::FlightTickets => "Billets d'avion",
            Module::SupportTickets => "Support",
            Module::Todos => "Tâches & Rappels",
            Module::Agents => "Agents",
            Module::Logs => "Logs",
            Module::Situation => "Situation",
            Module::Storefront => "Vitrine",
            Module::Settings => "Paramètres",
        }
    }

    /// Route path of the module page.
    pub fn path(&self) -> String {
        format!("/{}", self.as_str())
    }

    /// Look up a catalog identifier; `None` for anything outside the catalog.
    pub fn parse(id: &str) -> Option<Module> {
        Module::ALL.iter().copied().find(|m| m.as_str() == id)
    }

    pub fn is_grantable(&self) -> bool {
        Module::GRANTABLE.contains(self)
    }
}

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Module::parse(s).ok_or_else(|| DomainError::unknown("module", s))
    }
}

/// Operation a grant may allow on a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Action {
    #[serde(rename = "lire")]
    Read,
    #[serde(rename = "creer")]
    Create,
    #[serde(rename = "modifier")]
    Update,
    #[serde(rename = "supprimer")]
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Read, Action::Create, Action::Update, Action::Delete];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Read => ACTION_READ,
            Action::Create => ACTION_CREATE,
            Action::Update => ACTION_UPDATE,
            Action::Delete => ACTION_DELETE,
        }
    }

    pub fn parse(id: &str) -> Option<Action> {
        Action::ALL.iter().copied().find(|a| a.as_str() == id)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::parse(s).ok_or_else(|| DomainError::unknown("action", s))
    }
}
