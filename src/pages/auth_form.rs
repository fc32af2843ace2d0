use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::events::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, Credentials};
use crate::app::AppContext;
use crate::pages::header::Header;
use crate::router::Route;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Signup,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Log in",
            AuthMode::Signup => "Create account",
        }
    }

    /// The other form, offered as a link under this one.
    fn alternate(self) -> (Route, &'static str) {
        match self {
            AuthMode::Login => (Route::Signup, "No account yet? Sign up"),
            AuthMode::Signup => (Route::Login, "Already registered? Log in"),
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct AuthFormProps {
    pub mode: AuthMode,
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[function_component(AuthForm)]
pub fn auth_form(props: &AuthFormProps) -> Html {
    let context = use_context::<AppContext>();
    let navigator = use_navigator();
    let username = use_node_ref();
    let password = use_node_ref();
    let error = use_state(|| None::<String>);
    let pending = use_state(|| false);
    let mode = props.mode;

    let onsubmit = {
        let username = username.clone();
        let password = password.clone();
        let error = error.clone();
        let pending = pending.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let (Some(context), Some(navigator)) = (context.clone(), navigator.clone()) else {
                log::error!("Auth form rendered outside the application router");
                return;
            };

            let credentials = Credentials {
                username: input_value(&username).trim().to_string(),
                password: input_value(&password),
            };
            if credentials.username.is_empty() || credentials.password.is_empty() {
                error.set(Some("Please enter a username and a password".to_string()));
                return;
            }

            error.set(None);
            pending.set(true);
            let error = error.clone();
            let pending = pending.clone();
            spawn_local(async move {
                let issued = match mode {
                    AuthMode::Login => api::login(&context.config, &credentials).await,
                    AuthMode::Signup => api::signup(&context.config, &credentials).await,
                };
                pending.set(false);

                let stored = issued.and_then(|session| {
                    context.user.write(&session.user_id)?;
                    context.credentials.write(&session.token)
                });
                match stored {
                    Ok(()) => {
                        log::info!("{} succeeded for {}", mode.title(), credentials.username);
                        navigator.push(&Route::Dashboard);
                    }
                    Err(e) => {
                        log::error!("{} failed: {}", mode.title(), e);
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let (alternate_route, alternate_label) = mode.alternate();

    html! {
        <main>
            <Header />
            <form onsubmit={onsubmit}>
                <h2>{ mode.title() }</h2>
                <input type="text" id="username" ref={username} placeholder={"Username"} />
                <input type="password" id="password" ref={password} placeholder={"Password"} />
                <button type="submit" disabled={*pending}>{ mode.title() }</button>
                if let Some(message) = (*error).clone() {
                    <p class="error">{ message }</p>
                }
            </form>
            <Link<Route> to={alternate_route}>{ alternate_label }</Link<Route>>
        </main>
    }
}
