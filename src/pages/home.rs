use yew::prelude::*;
use yew_router::prelude::*;

use crate::pages::header::Header;
use crate::router::Route;

#[function_component(HomePage)]
pub fn home_page() -> Html {
    html! {
        <main>
            <Header />
            <nav>
                <Link<Route> to={Route::Login}>{ "Log in" }</Link<Route>>
                { " | " }
                <Link<Route> to={Route::Signup}>{ "Sign up" }</Link<Route>>
                { " | " }
                <Link<Route> to={Route::Dashboard}>{ "Dashboard" }</Link<Route>>
            </nav>
        </main>
    }
}
