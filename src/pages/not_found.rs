use yew::prelude::*;
use yew_router::prelude::*;

use crate::router::Route;

#[function_component(NotFoundPage)]
pub fn not_found_page() -> Html {
    html! {
        <main>
            <h1>{ "404 - Page not found" }</h1>
            <Link<Route> to={Route::Home}>{ "Back to home" }</Link<Route>>
        </main>
    }
}
