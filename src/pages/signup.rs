use yew::prelude::*;

use crate::pages::auth_form::{AuthForm, AuthMode};

#[function_component(SignupPage)]
pub fn signup_page() -> Html {
    html! { <AuthForm mode={AuthMode::Signup} /> }
}
