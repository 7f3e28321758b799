//! Property tests for the permission evaluator and grant editing.

use std::collections::HashSet;

use domain::permission::normalize_grants;
use domain::{
    accessible_modules, check_permission, has_permission, set_action, Action, Module, Permission,
    Role, User,
};
use proptest::prelude::*;
use uuid::Uuid;

fn module() -> impl Strategy<Value = Module> {
    prop::sample::select(Module::ALL.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    prop::sample::select(Action::ALL.to_vec())
}

fn grant() -> impl Strategy<Value = Permission> {
    (module(), prop::collection::vec(action(), 0..4))
        .prop_map(|(module, actions)| Permission::new(module, actions))
}

fn grants() -> impl Strategy<Value = Vec<Permission>> {
    prop::collection::vec(grant(), 0..8)
}

fn user(role: Role, grants: Vec<Permission>) -> User {
    User::new(
        Uuid::new_v4(),
        "prop@agence.com".to_string(),
        String::new(),
        "Prop".to_string(),
        "Test".to_string(),
        role,
    )
    .with_permissions(grants)
}

proptest! {
    #[test]
    fn blanket_roles_allow_everything(grants in grants(), module in module(), action in action()) {
        for role in [Role::Superadmin, Role::Agency] {
            let user = user(role, grants.clone());
            prop_assert!(has_permission(Some(&user), module, action));
        }
    }

    #[test]
    fn absent_user_is_refused(module in module(), action in action()) {
        prop_assert!(!has_permission(None, module, action));
    }

    #[test]
    fn agent_accessible_modules_are_grant_modules_in_first_seen_order(grants in grants()) {
        let agent = user(Role::Agent, grants.clone());
        let accessible = accessible_modules(Some(&agent));

        let unique: HashSet<Module> = accessible.iter().copied().collect();
        prop_assert_eq!(unique.len(), accessible.len());

        let mut seen = HashSet::new();
        let expected: Vec<Module> = grants
            .iter()
            .map(|grant| grant.module)
            .filter(|module| seen.insert(*module))
            .collect();
        prop_assert_eq!(accessible, expected);
    }

    #[test]
    fn blanket_roles_pass_any_raw_ids(module_id in "[a-z-]{0,12}", action_id in "[a-z]{0,10}") {
        for role in [Role::Superadmin, Role::Agency] {
            let account = user(role, Vec::new());
            prop_assert!(check_permission(Some(&account), &module_id, &action_id));
        }
    }

    #[test]
    fn agent_permission_follows_first_grant(grants in grants(), module in module(), action in action()) {
        let agent = user(Role::Agent, grants.clone());
        let expected = grants
            .iter()
            .find(|g| g.module == module)
            .is_some_and(|g| g.actions.contains(&action));
        prop_assert_eq!(has_permission(Some(&agent), module, action), expected);
    }

    #[test]
    fn raw_ids_agree_with_typed_check(grants in grants(), module in module(), action in action()) {
        let agent = user(Role::Agent, grants);
        prop_assert_eq!(
            check_permission(Some(&agent), module.as_str(), action.as_str()),
            has_permission(Some(&agent), module, action)
        );
    }

    #[test]
    fn set_action_keeps_list_well_formed(
        grants in grants(),
        module in module(),
        action in action(),
        enabled in any::<bool>(),
    ) {
        let mut grants = normalize_grants(grants);
        set_action(&mut grants, module, action, enabled);

        prop_assert!(grants.iter().all(|g| !g.is_empty()));
        for (i, g) in grants.iter().enumerate() {
            prop_assert!(grants[i + 1..].iter().all(|other| other.module != g.module));
        }

        let agent = user(Role::Agent, grants);
        prop_assert_eq!(has_permission(Some(&agent), module, action), enabled);
    }
}
