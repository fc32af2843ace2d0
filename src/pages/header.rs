use yew::prelude::*;

use crate::APP_TITLE;

#[function_component(Header)]
pub fn header() -> Html {
    html! {
        <h1 style="text-align: center; margin: 10px 0; padding: 0;">{ APP_TITLE }</h1>
    }
}
