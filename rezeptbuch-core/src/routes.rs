//! Route table and navigation guard.
//!
//! Static path-to-view mapping with per-route auth flags. The guard runs
//! before every navigation; when a token is still stored but the session
//! flag is down (fresh process after a reload), it re-validates first.

use crate::store::AuthStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteName {
    Home,
    Login,
    ResetPassword,
    RecipeNew,
    RecipeDetail,
    RecipeEdit,
    Profile,
    Users,
    IngredientCatalog,
    Changelog,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteDef {
    pub name: RouteName,
    /// Path pattern; a `:id` segment captures a numeric id.
    pub path: &'static str,
    pub requires_auth: bool,
    pub requires_admin: bool,
}

/// All routes. Order matters: literal paths come before `:id` patterns
/// so `/recipe/new` is not captured as a detail id.
pub static ROUTES: &[RouteDef] = &[
    RouteDef {
        name: RouteName::Home,
        path: "/",
        requires_auth: true,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::Login,
        path: "/login",
        requires_auth: false,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::ResetPassword,
        path: "/reset-password",
        requires_auth: false,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::RecipeNew,
        path: "/recipe/new",
        requires_auth: true,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::RecipeDetail,
        path: "/recipe/:id",
        requires_auth: true,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::RecipeEdit,
        path: "/recipe/:id/edit",
        requires_auth: true,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::Profile,
        path: "/profile",
        requires_auth: true,
        requires_admin: false,
    },
    RouteDef {
        name: RouteName::Users,
        path: "/users",
        requires_auth: true,
        requires_admin: true,
    },
    RouteDef {
        name: RouteName::IngredientCatalog,
        path: "/ingredient-catalog",
        requires_auth: true,
        requires_admin: true,
    },
    RouteDef {
        name: RouteName::Changelog,
        path: "/changelog",
        requires_auth: true,
        requires_admin: false,
    },
];

/// A resolved route plus its captured id, when the pattern has one.
#[derive(Debug, Clone, Copy)]
pub struct RouteMatch {
    pub def: &'static RouteDef,
    pub id: Option<i64>,
}

/// Resolve a path against the route table. Returns `None` for unknown
/// paths and for `:id` segments that are not numeric.
pub fn resolve(path: &str) -> Option<RouteMatch> {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    'routes: for def in ROUTES {
        let pattern: Vec<&str> = def.path.split('/').filter(|s| !s.is_empty()).collect();
        if pattern.len() != segments.len() {
            continue;
        }
        let mut id = None;
        for (pat, seg) in pattern.iter().zip(&segments) {
            if *pat == ":id" {
                match seg.parse::<i64>() {
                    Ok(parsed) => id = Some(parsed),
                    Err(_) => continue 'routes,
                }
            } else if pat != seg {
                continue 'routes;
            }
        }
        return Some(RouteMatch { def, id });
    }
    None
}

/// Outcome of the navigation guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    RedirectToLogin,
    RedirectHome,
}

/// Decide whether navigation to `route` may proceed.
pub async fn guard(route: &RouteDef, auth: &mut AuthStore) -> GuardDecision {
    // A stored token with the session flag down means a fresh process;
    // re-validate before applying the rules.
    if !auth.is_authenticated() && auth.has_token() {
        auth.check_auth().await;
    }
    if route.requires_auth && !auth.is_authenticated() {
        return GuardDecision::RedirectToLogin;
    }
    if route.requires_admin && !auth.is_admin() {
        return GuardDecision::RedirectHome;
    }
    if route.name == RouteName::Login && auth.is_authenticated() {
        return GuardDecision::RedirectHome;
    }
    GuardDecision::Proceed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockAuthApi;
    use crate::models::{Role, User};
    use std::sync::Arc;

    fn route(name: RouteName) -> &'static RouteDef {
        ROUTES.iter().find(|r| r.name == name).unwrap()
    }

    fn account(role: Role) -> User {
        User {
            id: 1,
            vorname: Some("Anna".to_string()),
            nachname: None,
            email: "anna@example.com".to_string(),
            role,
            must_change_password: false,
        }
    }

    async fn signed_in(role: Role) -> AuthStore {
        let api = Arc::new(MockAuthApi::new(account(role), "pw"));
        let mut store = AuthStore::new(api);
        assert!(store.login("anna@example.com", "pw").await);
        store
    }

    #[test]
    fn test_resolve_literal_paths() {
        assert_eq!(resolve("/").unwrap().def.name, RouteName::Home);
        assert_eq!(resolve("/login").unwrap().def.name, RouteName::Login);
        assert_eq!(resolve("/users").unwrap().def.name, RouteName::Users);
        assert!(resolve("/unbekannt").is_none());
    }

    #[test]
    fn test_resolve_new_wins_over_id() {
        assert_eq!(resolve("/recipe/new").unwrap().def.name, RouteName::RecipeNew);

        let detail = resolve("/recipe/42").unwrap();
        assert_eq!(detail.def.name, RouteName::RecipeDetail);
        assert_eq!(detail.id, Some(42));

        let edit = resolve("/recipe/42/edit").unwrap();
        assert_eq!(edit.def.name, RouteName::RecipeEdit);
        assert_eq!(edit.id, Some(42));
    }

    #[test]
    fn test_resolve_rejects_non_numeric_id() {
        assert!(resolve("/recipe/abc").is_none());
    }

    #[tokio::test]
    async fn test_guard_redirects_unauthenticated_to_login() {
        let api = Arc::new(MockAuthApi::new(account(Role::User), "pw"));
        let mut auth = AuthStore::new(api);
        let decision = guard(route(RouteName::Home), &mut auth).await;
        assert_eq!(decision, GuardDecision::RedirectToLogin);
    }

    #[tokio::test]
    async fn test_guard_allows_login_page_when_signed_out() {
        let api = Arc::new(MockAuthApi::new(account(Role::User), "pw"));
        let mut auth = AuthStore::new(api);
        let decision = guard(route(RouteName::Login), &mut auth).await;
        assert_eq!(decision, GuardDecision::Proceed);
    }

    #[tokio::test]
    async fn test_guard_bounces_signed_in_user_off_login() {
        let mut auth = signed_in(Role::User).await;
        let decision = guard(route(RouteName::Login), &mut auth).await;
        assert_eq!(decision, GuardDecision::RedirectHome);
    }

    #[tokio::test]
    async fn test_guard_blocks_non_admin_from_admin_routes() {
        let mut auth = signed_in(Role::User).await;
        assert_eq!(
            guard(route(RouteName::Users), &mut auth).await,
            GuardDecision::RedirectHome
        );
        assert_eq!(
            guard(route(RouteName::IngredientCatalog), &mut auth).await,
            GuardDecision::RedirectHome
        );
        assert_eq!(
            guard(route(RouteName::Home), &mut auth).await,
            GuardDecision::Proceed
        );
    }

    #[tokio::test]
    async fn test_guard_admits_admin() {
        let mut auth = signed_in(Role::Admin).await;
        assert_eq!(
            guard(route(RouteName::Users), &mut auth).await,
            GuardDecision::Proceed
        );
    }

    #[tokio::test]
    async fn test_guard_revalidates_stored_token() {
        let api = Arc::new(MockAuthApi::new(account(Role::User), "pw"));
        let mut first = AuthStore::new(api.clone());
        first.login("anna@example.com", "pw").await;

        // Fresh store with the token still on disk: guard should
        // re-validate and let the navigation through.
        let mut second = AuthStore::new(api);
        assert_eq!(
            guard(route(RouteName::Home), &mut second).await,
            GuardDecision::Proceed
        );
        assert!(second.is_authenticated());
    }
}
