//! Pre-navigation login gate.
//!
//! Protected routes bounce anonymous visitors to `/login`; the login and
//! signup pages bounce signed-in visitors to `/dashboard`. Everything else,
//! including paths the table does not declare, proceeds untouched.

use crate::credentials::{AuthState, CredentialStore};
use crate::router::{Route, RouteTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationRequest {
    pub to: Route,
    /// `None` on the first navigation of a session.
    pub from: Option<Route>,
}

impl NavigationRequest {
    pub fn new(to: Route, from: Option<Route>) -> Self {
        NavigationRequest { to, from }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    Proceed,
    RedirectTo(Route),
}

impl Resolution {
    /// Route that ends up rendered for `request`.
    pub fn target<'a>(&'a self, request: &'a NavigationRequest) -> &'a Route {
        match self {
            Resolution::Proceed => &request.to,
            Resolution::RedirectTo(route) => route,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NavigationGuard {
    table: RouteTable,
}

impl NavigationGuard {
    pub fn new(table: RouteTable) -> Self {
        NavigationGuard { table }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn resolve(&self, request: &NavigationRequest, auth: AuthState) -> Resolution {
        let resolution = if self.table.requires_auth(&request.to) && !auth.is_authenticated() {
            Resolution::RedirectTo(Route::Login)
        } else if matches!(request.to, Route::Login | Route::Signup) && auth.is_authenticated() {
            Resolution::RedirectTo(Route::Dashboard)
        } else {
            Resolution::Proceed
        };

        log::debug!(
            "Navigation {:?} -> {:?} ({:?}): {:?}",
            request.from,
            request.to,
            auth,
            resolution
        );
        resolution
    }

    pub fn resolve_with(
        &self,
        request: &NavigationRequest,
        store: &dyn CredentialStore,
    ) -> Resolution {
        self.resolve(request, AuthState::from_store(store))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::MemoryCredentials;
    use crate::router::{RouteMeta, RouteRecord};
    use rstest::rstest;

    use AuthState::{Anonymous, Authenticated};

    fn resolve(to: Route, auth: AuthState) -> Resolution {
        NavigationGuard::default().resolve(&NavigationRequest::new(to, None), auth)
    }

    /// | target     | authenticated | resolution            |
    /// |------------|---------------|-----------------------|
    /// | /dashboard | no            | redirect /login       |
    /// | /dashboard | yes           | proceed               |
    /// | /login     | yes           | redirect /dashboard   |
    /// | /signup    | yes           | redirect /dashboard   |
    /// | /login     | no            | proceed               |
    /// | /signup    | no            | proceed               |
    /// | /          | either        | proceed               |
    /// | 404        | either        | proceed               |
    #[rstest]
    #[case(Route::Dashboard, Anonymous, Resolution::RedirectTo(Route::Login))]
    #[case(Route::Dashboard, Authenticated, Resolution::Proceed)]
    #[case(Route::Login, Authenticated, Resolution::RedirectTo(Route::Dashboard))]
    #[case(Route::Signup, Authenticated, Resolution::RedirectTo(Route::Dashboard))]
    #[case(Route::Login, Anonymous, Resolution::Proceed)]
    #[case(Route::Signup, Anonymous, Resolution::Proceed)]
    #[case(Route::Home, Anonymous, Resolution::Proceed)]
    #[case(Route::Home, Authenticated, Resolution::Proceed)]
    #[case(Route::NotFound, Anonymous, Resolution::Proceed)]
    #[case(Route::NotFound, Authenticated, Resolution::Proceed)]
    fn decision_table(#[case] to: Route, #[case] auth: AuthState, #[case] expected: Resolution) {
        assert_eq!(resolve(to, auth), expected);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(Route::Home))]
    #[case(Some(Route::Dashboard))]
    fn origin_does_not_affect_resolution(#[case] from: Option<Route>) {
        let guard = NavigationGuard::default();
        let request = NavigationRequest::new(Route::Dashboard, from);
        assert_eq!(
            guard.resolve(&request, Anonymous),
            Resolution::RedirectTo(Route::Login)
        );
    }

    #[rstest]
    #[case(Route::Home)]
    #[case(Route::Login)]
    #[case(Route::Signup)]
    #[case(Route::Dashboard)]
    fn repeated_evaluation_is_stable(#[case] to: Route) {
        let guard = NavigationGuard::default();
        let store = MemoryCredentials::with_token("abc");
        let request = NavigationRequest::new(to, Some(Route::Home));

        let first = guard.resolve_with(&request, &store);
        let second = guard.resolve_with(&request, &store);
        assert_eq!(first, second);
        assert_eq!(store.read().unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn empty_store_sends_dashboard_to_login() {
        let store = MemoryCredentials::new();
        let request = NavigationRequest::new(Route::Dashboard, None);
        let resolution = NavigationGuard::default().resolve_with(&request, &store);
        assert_eq!(resolution, Resolution::RedirectTo(Route::Login));
        assert_eq!(resolution.target(&request), &Route::Login);
    }

    #[test]
    fn stored_token_sends_login_to_dashboard() {
        let store = MemoryCredentials::with_token("abc");
        let request = NavigationRequest::new(Route::Login, Some(Route::Home));
        let resolution = NavigationGuard::default().resolve_with(&request, &store);
        assert_eq!(resolution, Resolution::RedirectTo(Route::Dashboard));
    }

    #[test]
    fn stored_token_proceeds_home() {
        let store = MemoryCredentials::with_token("abc");
        let request = NavigationRequest::new(Route::Home, None);
        let resolution = NavigationGuard::default().resolve_with(&request, &store);
        assert_eq!(resolution, Resolution::Proceed);
        assert_eq!(resolution.target(&request), &Route::Home);
    }

    #[test]
    fn empty_token_is_not_a_session() {
        let store = MemoryCredentials::with_token("");
        let guard = NavigationGuard::default();
        assert_eq!(
            guard.resolve_with(&NavigationRequest::new(Route::Dashboard, None), &store),
            Resolution::RedirectTo(Route::Login)
        );
        assert_eq!(
            guard.resolve_with(&NavigationRequest::new(Route::Login, None), &store),
            Resolution::Proceed
        );
    }

    #[test]
    fn logout_reopens_login_page() {
        let guard = NavigationGuard::default();
        let store = MemoryCredentials::with_token("abc");
        let request = NavigationRequest::new(Route::Login, Some(Route::Dashboard));
        assert_eq!(
            guard.resolve_with(&request, &store),
            Resolution::RedirectTo(Route::Dashboard)
        );

        store.clear().unwrap();
        assert_eq!(guard.resolve_with(&request, &store), Resolution::Proceed);
    }

    static GUARDED_PARENT: &[RouteRecord] = &[
        RouteRecord {
            route: Route::Home,
            meta: RouteMeta::PROTECTED,
            parent: None,
        },
        RouteRecord {
            route: Route::Signup,
            meta: RouteMeta::PUBLIC,
            parent: Some(Route::Home),
        },
    ];

    #[test]
    fn protected_ancestor_wins_over_guest_bounce() {
        let guard = NavigationGuard::new(RouteTable::new(GUARDED_PARENT));
        let request = NavigationRequest::new(Route::Signup, None);
        assert_eq!(
            guard.resolve(&request, Anonymous),
            Resolution::RedirectTo(Route::Login)
        );
        assert_eq!(
            guard.resolve(&request, Authenticated),
            Resolution::RedirectTo(Route::Dashboard)
        );
    }
}
