//! Session resolution and the route guard.
//!
//! Every protected request resolves its bearer token into an
//! [`AuthSession`], runs it through the guard, and only then reaches the
//! handler with the account attached. Per-module checks happen in handlers.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use tracing::warn;

use common::{AppError, AppResult};
use domain::{has_permission, Action, AuthSession, GuardState, Module, Role, User};

use crate::clients::TokenVerifier;
use crate::state::AppState;

/// Account behind the current request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn can(&self, module: Module, action: Action) -> bool {
        has_permission(Some(&self.0), module, action)
    }
}

/// Refuse unless the user may perform `action` on `module`.
pub fn require_permission(user: &CurrentUser, module: Module, action: Action) -> AppResult<()> {
    if user.can(module, action) {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Platform administration is reserved to the superadmin, whatever the
/// blanket access of agencies says.
pub fn require_superadmin(user: &CurrentUser) -> AppResult<()> {
    if user.0.role == Role::Superadmin {
        Ok(())
    } else {
        Err(AppError::Forbidden)
    }
}

/// Turn an optional bearer token into a session.
///
/// An unreachable session service leaves the session loading rather than
/// anonymous, so clients wait instead of being sent to the login page.
pub async fn resolve_session(
    verifier: &dyn TokenVerifier,
    token: Option<&str>,
) -> AppResult<AuthSession> {
    let Some(token) = token else {
        return Ok(AuthSession::anonymous());
    };

    match verifier.verify_token(token).await {
        Ok(Some(user)) => Ok(AuthSession::authenticated(user)),
        Ok(None) => Ok(AuthSession::anonymous()),
        Err(AppError::ServiceUnavailable(reason) | AppError::Grpc(reason)) => {
            warn!("Session service unreachable: {}", reason);
            Ok(AuthSession::loading())
        }
        Err(e) => Err(e),
    }
}

/// Apply the guard; only an authorized session yields a user.
pub fn admit(session: AuthSession) -> AppResult<User> {
    match GuardState::evaluate(&session) {
        GuardState::Loading => Err(AppError::service_unavailable("session-service")),
        GuardState::Unauthenticated => Err(AppError::Unauthorized),
        GuardState::PendingApproval => Err(AppError::PendingApproval),
        GuardState::Authorized => session.user.ok_or(AppError::Unauthorized),
    }
}

pub fn bearer_token(header: &Option<TypedHeader<Authorization<Bearer>>>) -> Option<&str> {
    header.as_ref().map(|TypedHeader(auth)| auth.token())
}

/// Guard middleware for the protected area.
pub async fn session_middleware(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let session = resolve_session(state.session_client.as_ref(), bearer_token(&bearer)).await?;
    let user = admit(session)?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::MockTokenVerifier;
    use axum::http::StatusCode;
    use chrono::Utc;
    use domain::{Permission, UserStatus};
    use tokio_test::{assert_err, assert_ok};
    use uuid::Uuid;

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            email: "contact@agence-soleil.fr".to_string(),
            password_hash: String::new(),
            last_name: "Soleil".to_string(),
            first_name: "Agence".to_string(),
            role,
            agency_id: None,
            permissions: None,
            status: Some(UserStatus::Active),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_missing_token_is_anonymous_without_asking() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().never();

        let session = resolve_session(&verifier, None).await.unwrap();
        assert!(session.user.is_none());
        assert!(!session.is_loading);

        let err = admit(session).unwrap_err();
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_is_admitted() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify_token()
            .withf(|token| token.to_string() == "good")
            .times(1)
            .returning(|_| Ok(Some(user(Role::Agency))));

        let session = assert_ok!(resolve_session(&verifier, Some("good")).await);
        let admitted = assert_ok!(admit(session));
        assert_eq!(admitted.role, Role::Agency);
    }

    #[tokio::test]
    async fn test_rejected_token_is_unauthorized() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().returning(|_| Ok(None));

        let session = resolve_session(&verifier, Some("expired")).await.unwrap();
        assert!(matches!(admit(session), Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_unreachable_provider_keeps_session_loading() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify_token()
            .returning(|_| Err(AppError::service_unavailable("connection refused")));

        let session = resolve_session(&verifier, Some("token")).await.unwrap();
        assert!(session.is_loading);

        let err = admit(session).unwrap_err();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_timed_out_provider_keeps_session_loading() {
        let mut verifier = MockTokenVerifier::new();
        verifier.expect_verify_token().returning(|_| {
            Err(AppError::from(tonic::Status::cancelled("Timeout expired")))
        });

        let session = assert_ok!(resolve_session(&verifier, Some("token")).await);
        assert!(session.is_loading);
        assert_eq!(admit(session).unwrap_err().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_session_loading() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify_token()
            .returning(|_| Err(AppError::Grpc("h2 protocol error".to_string())));

        let session = assert_ok!(resolve_session(&verifier, Some("token")).await);
        assert!(session.is_loading);
    }

    #[tokio::test]
    async fn test_other_provider_errors_propagate() {
        let mut verifier = MockTokenVerifier::new();
        verifier
            .expect_verify_token()
            .returning(|_| Err(AppError::internal("boom")));

        assert_err!(resolve_session(&verifier, Some("token")).await);
    }

    #[test]
    fn test_pending_agency_is_held_back() {
        let pending = user(Role::Agency);
        let pending = User {
            status: Some(UserStatus::Pending),
            ..pending
        };

        let err = admit(AuthSession::authenticated(pending)).unwrap_err();
        assert_eq!(err.status(), StatusCode::FORBIDDEN);
        assert_eq!(err.code(), "PENDING_APPROVAL");
    }

    #[test]
    fn test_pending_agent_is_not_held_back() {
        let agent = User {
            status: Some(UserStatus::Pending),
            ..user(Role::Agent)
        };
        assert_ok!(admit(AuthSession::authenticated(agent)));
    }

    #[test]
    fn test_module_checks_follow_grants() {
        let agent = CurrentUser(
            user(Role::Agent).with_permissions(vec![Permission::new(Module::Todos, [Action::Read])]),
        );

        assert!(require_permission(&agent, Module::Todos, Action::Read).is_ok());
        assert!(matches!(
            require_permission(&agent, Module::Todos, Action::Delete),
            Err(AppError::Forbidden)
        ));
        assert!(require_permission(&agent, Module::Agents, Action::Read).is_err());
    }

    #[test]
    fn test_agency_blanket_access_does_not_reach_platform_admin() {
        let agency = CurrentUser(user(Role::Agency));
        assert!(require_permission(&agency, Module::Agencies, Action::Read).is_ok());
        assert!(require_superadmin(&agency).is_err());
        assert!(require_superadmin(&CurrentUser(user(Role::Superadmin))).is_ok());
    }
}
