use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlTextAreaElement};
use yew::events::SubmitEvent;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::api::{self, HistoryEntry, Similarity, TermCount, TranscriptionRequest, WordFrequency};
use crate::app::AppContext;
use crate::config::Config;
use crate::error::Result;
use crate::pages::header::Header;
use crate::router::Route;

const TOP_WORDS: usize = 10;
const DEFAULT_LANGUAGE: &str = "en";

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Insights {
    pub history: Vec<HistoryEntry>,
    pub word_frequency: WordFrequency,
    pub phrases: Vec<TermCount>,
    pub similarity: Similarity,
}

pub async fn load_insights(config: &Config, user_id: &str) -> Result<Insights> {
    Ok(Insights {
        history: api::history(config, user_id).await?,
        word_frequency: api::word_frequency(config, user_id).await?,
        phrases: api::unique_phrases(config, user_id).await?,
        similarity: api::similarity(config, user_id).await?,
    })
}

fn percent(ratio: f64) -> String {
    format!("{:.0}%", ratio.clamp(0.0, 1.0) * 100.0)
}

fn term_list(terms: &[TermCount], limit: usize) -> Html {
    if terms.is_empty() {
        return html! { <p>{ "Nothing yet." }</p> };
    }
    html! {
        <ol>
            { for terms.iter().take(limit).map(|(term, count)| html! {
                <li>{ format!("{} ({})", term, count) }</li>
            }) }
        </ol>
    }
}

fn insights_view(insights: &Insights) -> Html {
    html! {
        <>
            <section>
                <h3>{ "History" }</h3>
                if insights.history.is_empty() {
                    <p>{ "No transcriptions yet." }</p>
                } else {
                    <ul>
                        { for insights.history.iter().map(|entry| html! {
                            <li>{ format!("[{}] {}", entry.language, entry.text) }</li>
                        }) }
                    </ul>
                }
            </section>
            <section>
                <h3>{ "Your most used words" }</h3>
                { term_list(&insights.word_frequency.user_frequency, TOP_WORDS) }
                <h3>{ "Most used words, all users" }</h3>
                { term_list(&insights.word_frequency.all_users_frequency, TOP_WORDS) }
            </section>
            <section>
                <h3>{ "Your common phrases" }</h3>
                { term_list(&insights.phrases, insights.phrases.len()) }
            </section>
            <section>
                <h3>{ "Users who sound like you" }</h3>
                if insights.similarity.most_similar_users.is_empty() {
                    <p>{ "No other users yet." }</p>
                } else {
                    <ol>
                        { for insights.similarity.most_similar_users.iter().map(|(user, ratio)| html! {
                            <li>{ format!("{} ({})", user, percent(*ratio)) }</li>
                        }) }
                    </ol>
                }
            </section>
        </>
    }
}

#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let context = use_context::<AppContext>();
    let navigator = use_navigator();
    let insights = use_state(|| None::<std::result::Result<Insights, String>>);
    let revision = use_state(|| 0u32);
    let text = use_node_ref();
    let language = use_node_ref();
    let submit_error = use_state(|| None::<String>);

    {
        let context = context.clone();
        let insights = insights.clone();
        use_effect_with(*revision, move |_| {
            if let Some(context) = context {
                spawn_local(async move {
                    let loaded = match context.user.read() {
                        Ok(Some(user_id)) if !user_id.is_empty() => {
                            load_insights(&context.config, &user_id).await
                        }
                        Ok(_) => {
                            insights.set(Some(Err(
                                "No user id stored for this session, please log in again"
                                    .to_string(),
                            )));
                            return;
                        }
                        Err(e) => Err(e),
                    };
                    if let Err(e) = &loaded {
                        log::error!("Failed to load dashboard data: {}", e);
                    }
                    insights.set(Some(loaded.map_err(|e| e.to_string())));
                });
            }
            || ()
        });
    }

    let onsubmit = {
        let context = context.clone();
        let text = text.clone();
        let language = language.clone();
        let revision = revision.clone();
        let submit_error = submit_error.clone();
        Callback::from(move |event: SubmitEvent| {
            event.prevent_default();
            let Some(context) = context.clone() else {
                return;
            };
            let Some(text_area) = text.cast::<HtmlTextAreaElement>() else {
                return;
            };
            let body = text_area.value().trim().to_string();
            if body.is_empty() {
                submit_error.set(Some("Nothing to submit".to_string()));
                return;
            }
            let language = language
                .cast::<HtmlInputElement>()
                .map(|input| input.value().trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

            let revision = revision.clone();
            let submit_error = submit_error.clone();
            spawn_local(async move {
                let submitted = match context.user.read() {
                    Ok(Some(user_id)) => {
                        let request = TranscriptionRequest {
                            user_id,
                            text: body,
                            language,
                        };
                        api::transcribe(&context.config, &request).await
                    }
                    Ok(None) => {
                        submit_error.set(Some("Please log in again".to_string()));
                        return;
                    }
                    Err(e) => Err(e),
                };
                match submitted {
                    Ok(stored) => {
                        log::info!("Stored transcription ({} chars)", stored.text.len());
                        text_area.set_value("");
                        submit_error.set(None);
                        revision.set(*revision + 1);
                    }
                    Err(e) => {
                        log::error!("Failed to submit transcription: {}", e);
                        submit_error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let onclick = Callback::from(move |_: MouseEvent| {
        let (Some(context), Some(navigator)) = (context.as_ref(), navigator.as_ref()) else {
            log::error!("Dashboard rendered outside the application router");
            return;
        };
        for store in [&context.credentials, &context.user] {
            if let Err(e) = store.clear() {
                log::error!("Failed to clear session on logout: {}", e);
            }
        }
        log::info!("Logged out");
        navigator.push(&Route::Login);
    });

    html! {
        <main>
            <Header />
            <div>
                <h2>{ "Dashboard" }</h2>
                <button onclick={onclick}>{ "Log out" }</button>
            </div>
            <form onsubmit={onsubmit}>
                <textarea ref={text} placeholder={"Transcribed speech"} />
                <input type="text" ref={language} placeholder={"Language (en)"} />
                <button type="submit">{ "Submit" }</button>
                if let Some(message) = (*submit_error).clone() {
                    <p class="error">{ message }</p>
                }
            </form>
            {
                match &*insights {
                    None => html! { <p>{ "Loading..." }</p> },
                    Some(Ok(insights)) => insights_view(insights),
                    Some(Err(message)) => html! { <p class="error">{ message.clone() }</p> },
                }
            }
        </main>
    }
}
