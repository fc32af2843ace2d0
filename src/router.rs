use yew_router::prelude::*;

// Application routes. `NotFound` is the router's own fallback and has no
// record in the table.
#[derive(Routable, PartialEq, Eq, Clone, Debug)]
pub enum Route {
    #[at("/")]
    Home,
    #[at("/login")]
    Login,
    #[at("/signup")]
    Signup,
    #[at("/dashboard")]
    Dashboard,
    #[not_found]
    #[at("/404")]
    NotFound,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RouteMeta {
    pub requires_auth: bool,
}

impl RouteMeta {
    pub const PUBLIC: RouteMeta = RouteMeta {
        requires_auth: false,
    };
    pub const PROTECTED: RouteMeta = RouteMeta {
        requires_auth: true,
    };
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteRecord {
    pub route: Route,
    pub meta: RouteMeta,
    /// Enclosing record in the match chain, if the route is nested.
    pub parent: Option<Route>,
}

impl RouteRecord {
    pub fn path(&self) -> String {
        self.route.to_path()
    }
}

pub static ROUTES: &[RouteRecord] = &[
    RouteRecord {
        route: Route::Home,
        meta: RouteMeta::PUBLIC,
        parent: None,
    },
    RouteRecord {
        route: Route::Login,
        meta: RouteMeta::PUBLIC,
        parent: None,
    },
    RouteRecord {
        route: Route::Signup,
        meta: RouteMeta::PUBLIC,
        parent: None,
    },
    RouteRecord {
        route: Route::Dashboard,
        meta: RouteMeta::PROTECTED,
        parent: None,
    },
];

/// Immutable, ordered list of declared routes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouteTable {
    records: &'static [RouteRecord],
}

impl Default for RouteTable {
    fn default() -> Self {
        RouteTable::new(ROUTES)
    }
}

impl RouteTable {
    pub const fn new(records: &'static [RouteRecord]) -> Self {
        RouteTable { records }
    }

    pub fn routes(&self) -> &'static [RouteRecord] {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Exact path match. No wildcards or parameters.
    pub fn lookup(&self, path: &str) -> Option<&'static RouteRecord> {
        self.records.iter().find(|record| record.path() == path)
    }

    pub fn record(&self, route: &Route) -> Option<&'static RouteRecord> {
        self.records.iter().find(|record| &record.route == route)
    }

    /// Match chain for `route`, outermost record first. Empty when the route
    /// is not declared.
    pub fn matched(&self, route: &Route) -> Vec<&'static RouteRecord> {
        let mut chain = Vec::new();
        let mut next = self.record(route);
        while let Some(record) = next {
            if chain.len() == self.records.len() {
                log::warn!("Route parents form a cycle at {:?}, stopping walk", record.route);
                break;
            }
            chain.push(record);
            next = record.parent.as_ref().and_then(|parent| self.record(parent));
        }
        chain.reverse();
        chain
    }

    pub fn requires_auth(&self, route: &Route) -> bool {
        self.matched(route)
            .iter()
            .any(|record| record.meta.requires_auth)
    }
}
