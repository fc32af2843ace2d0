use yew::prelude::*;

use crate::pages::auth_form::{AuthForm, AuthMode};

#[function_component(LoginPage)]
pub fn login_page() -> Html {
    html! { <AuthForm mode={AuthMode::Login} /> }
}
