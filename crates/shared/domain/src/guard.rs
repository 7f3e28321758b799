//! Route guard and route table.
//!
//! The guard is coarse: it decides whether the protected area can be entered
//! at all. Per-module checks belong to the evaluator.

use serde::Serialize;

use crate::constants::{
    PATH_DASHBOARD, PATH_LOGIN, PATH_PENDING_APPROVAL, PATH_PROFILE, PATH_REGISTER,
};
use crate::module::Module;
use crate::user::User;

/// Session context handed over by the auth provider.
#[derive(Debug, Clone, Default)]
pub struct AuthSession {
    pub user: Option<User>,
    pub is_loading: bool,
}

impl AuthSession {
    pub fn loading() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn authenticated(user: User) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }
}

/// Outcome of a navigation attempt into the protected area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum GuardState {
    /// Auth status unresolved; wait, do not redirect.
    Loading,
    /// No user; send to the login entry point.
    Unauthenticated,
    /// Agency awaiting approval; only the waiting page is shown.
    PendingApproval,
    Authorized,
}

impl GuardState {
    /// Evaluate the guard for a session.
    pub fn evaluate(session: &AuthSession) -> Self {
        if session.is_loading {
            return GuardState::Loading;
        }
        match &session.user {
            None => GuardState::Unauthenticated,
            Some(user) if user.is_pending_agency() => GuardState::PendingApproval,
            Some(_) => GuardState::Authorized,
        }
    }

    /// Where the client should be sent, if anywhere.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            GuardState::Unauthenticated => Some(PATH_LOGIN),
            GuardState::PendingApproval => Some(PATH_PENDING_APPROVAL),
            GuardState::Loading | GuardState::Authorized => None,
        }
    }
}

/// A page of the navigation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    PendingApproval,
    Dashboard,
    Profile,
    Module(Module),
}

impl Route {
    /// Resolve a path; `None` when nothing is mounted there.
    ///
    /// Trailing slashes are ignored. The root path is not a route, it
    /// redirects (see [`navigate`]).
    pub fn parse(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            PATH_LOGIN => Some(Route::Login),
            PATH_REGISTER => Some(Route::Register),
            PATH_PENDING_APPROVAL => Some(Route::PendingApproval),
            PATH_DASHBOARD => Some(Route::Dashboard),
            PATH_PROFILE => Some(Route::Profile),
            other => other
                .strip_prefix('/')
                .and_then(|segment| segment.split('/').next())
                .and_then(Module::parse)
                .map(Route::Module),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Login => PATH_LOGIN.to_string(),
            Route::Register => PATH_REGISTER.to_string(),
            Route::PendingApproval => PATH_PENDING_APPROVAL.to_string(),
            Route::Dashboard => PATH_DASHBOARD.to_string(),
            Route::Profile => PATH_PROFILE.to_string(),
            Route::Module(module) => module.path(),
        }
    }

    /// Auth entry points are reachable without a session.
    pub fn is_public(&self) -> bool {
        matches!(self, Route::Login | Route::Register | Route::PendingApproval)
    }
}

/// What the navigation surface should do with a requested path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(String),
    Wait,
    ShowPendingApproval,
    NotFound,
}

/// Resolve a navigation attempt against the route table and the guard.
pub fn navigate(path: &str, session: &AuthSession) -> Navigation {
    let route = if path.trim_end_matches('/').is_empty() {
        None
    } else {
        match Route::parse(path) {
            Some(route) if route.is_public() => return Navigation::Render(route),
            Some(route) => Some(route),
            None => return Navigation::NotFound,
        }
    };

    match GuardState::evaluate(session) {
        GuardState::Loading => Navigation::Wait,
        GuardState::Unauthenticated => Navigation::Redirect(PATH_LOGIN.to_string()),
        GuardState::PendingApproval => Navigation::ShowPendingApproval,
        GuardState::Authorized => match route {
            Some(route) => Navigation::Render(route),
            None => Navigation::Redirect(PATH_DASHBOARD.to_string()),
        },
    }
}
