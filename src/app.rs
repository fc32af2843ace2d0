use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};

use yew::prelude::*;
use yew_router::prelude::*;

use crate::config::Config;
use crate::credentials::{BrowserCredentials, CredentialStore};
use crate::error::{Error, Result};
use crate::guard::{NavigationGuard, NavigationRequest, Resolution};
use crate::pages::dashboard::DashboardPage;
use crate::pages::home::HomePage;
use crate::pages::login::LoginPage;
use crate::pages::not_found::NotFoundPage;
use crate::pages::signup::SignupPage;
use crate::router::Route;

static MOUNTED: AtomicBool = AtomicBool::new(false);

/// Shared by every page through a `ContextProvider`.
#[derive(Clone)]
pub struct AppContext {
    pub config: Rc<Config>,
    pub credentials: Rc<dyn CredentialStore>,
    /// Id of the signed-in user, keyed by `Config::user_key`.
    pub user: Rc<dyn CredentialStore>,
    pub guard: NavigationGuard,
}

impl AppContext {
    pub fn new(
        config: Config,
        credentials: Rc<dyn CredentialStore>,
        user: Rc<dyn CredentialStore>,
    ) -> Self {
        AppContext {
            config: Rc::new(config),
            credentials,
            user,
            guard: NavigationGuard::default(),
        }
    }

    pub fn browser(config: Config) -> Self {
        let credentials = Rc::new(BrowserCredentials::new(config.credential_key.clone()));
        let user = Rc::new(BrowserCredentials::new(config.user_key.clone()));
        AppContext::new(config, credentials, user)
    }
}

impl PartialEq for AppContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config)
            && Rc::ptr_eq(&self.credentials, &other.credentials)
            && Rc::ptr_eq(&self.user, &other.user)
            && self.guard == other.guard
    }
}

fn switch(route: Route) -> Html {
    match route {
        Route::Home => html! { <HomePage /> },
        Route::Login => html! { <LoginPage /> },
        Route::Signup => html! { <SignupPage /> },
        Route::Dashboard => html! { <DashboardPage /> },
        Route::NotFound => html! { <NotFoundPage /> },
    }
}

#[derive(Properties, PartialEq)]
struct GuardRedirectProps {
    to: Route,
}

// Replaces the blocked entry instead of pushing, so Back never returns to a
// path the guard refuses.
#[function_component(GuardRedirect)]
fn guard_redirect(props: &GuardRedirectProps) -> Html {
    let navigator = use_navigator();
    use_effect_with(props.to.clone(), move |target| {
        match navigator {
            Some(navigator) => navigator.replace(target),
            None => log::error!("GuardRedirect rendered outside a router"),
        }
        || ()
    });
    html! {}
}

// Runs the guard on every route the router recognizes, before the page
// renders. The last committed route is passed along as the request origin.
#[function_component(GuardedSwitch)]
fn guarded_switch() -> Html {
    let context = use_context::<AppContext>();
    let last_route = use_mut_ref(|| None::<Route>);

    let Some(context) = context else {
        log::error!("GuardedSwitch rendered without an AppContext");
        return html! {};
    };

    let render = Callback::from(move |route: Route| {
        let request = NavigationRequest::new(route, last_route.borrow().clone());
        match context
            .guard
            .resolve_with(&request, context.credentials.as_ref())
        {
            Resolution::Proceed => {
                *last_route.borrow_mut() = Some(request.to.clone());
                switch(request.to)
            }
            Resolution::RedirectTo(target) => html! { <GuardRedirect to={target} /> },
        }
    });

    html! {
        <Switch<Route> render={render} />
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Config,
}

#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let context = use_memo(props.config.clone(), |config| {
        AppContext::browser(config.clone())
    });

    html! {
        <ContextProvider<AppContext> context={(*context).clone()}>
            <BrowserRouter>
                <GuardedSwitch />
            </BrowserRouter>
        </ContextProvider<AppContext>>
    }
}

fn claim_mount() -> Result<()> {
    if MOUNTED.swap(true, Ordering::SeqCst) {
        return Err(Error::AlreadyMounted);
    }
    Ok(())
}

fn release_mount() {
    MOUNTED.store(false, Ordering::SeqCst);
}

/// Mounts the application into the element with id `config.mount_id`.
///
/// Succeeds at most once per page load.
pub fn start(config: Config) -> Result<()> {
    claim_mount()?;

    let root = match gloo::utils::document().get_element_by_id(&config.mount_id) {
        Some(root) => root,
        None => {
            release_mount();
            return Err(Error::MountTargetMissing(config.mount_id));
        }
    };

    log::info!(
        "Mounting application at #{} (service {})",
        config.mount_id,
        config.api_base
    );
    yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
    Ok(())
}
