//! Client for the auth and voice-analysis service.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// What a successful login or signup leaves behind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: String,
}

#[derive(Deserialize, Debug)]
struct TokenResponse {
    token: String,
    // older auth deployments only return the token
    #[serde(default)]
    user_id: Option<String>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct TranscriptionRequest {
    pub user_id: String,
    pub text: String,
    pub language: String,
}

/// Stored text, translated to English when the detected language differs.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct Transcription {
    pub text: String,
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub text: String,
    /// Language detected at submission time.
    pub language: String,
}

/// `(term, count)`, most common first.
pub type TermCount = (String, u64);

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct WordFrequency {
    pub user_frequency: Vec<TermCount>,
    pub all_users_frequency: Vec<TermCount>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Similarity {
    /// `(user_id, ratio)` with ratio in `0.0..=1.0`, best match first.
    pub most_similar_users: Vec<(String, f64)>,
}

pub async fn login(config: &Config, credentials: &Credentials) -> Result<Session> {
    request_session(&config.endpoint("login"), credentials).await
}

pub async fn signup(config: &Config, credentials: &Credentials) -> Result<Session> {
    request_session(&config.endpoint("signup"), credentials).await
}

pub async fn transcribe(config: &Config, request: &TranscriptionRequest) -> Result<Transcription> {
    let url = config.endpoint("transcribe");
    log::debug!("Submitting transcription to {}", url);
    let response = checked(Request::post(&url).json(request)?.send().await?).await?;
    Ok(response.json().await?)
}

pub async fn history(config: &Config, user_id: &str) -> Result<Vec<HistoryEntry>> {
    get_json(&config.user_endpoint("history", user_id)?).await
}

pub async fn word_frequency(config: &Config, user_id: &str) -> Result<WordFrequency> {
    get_json(&config.user_endpoint("word_frequency", user_id)?).await
}

/// The user's three most frequent three-word phrases.
pub async fn unique_phrases(config: &Config, user_id: &str) -> Result<Vec<TermCount>> {
    get_json(&config.user_endpoint("unique_phrases", user_id)?).await
}

pub async fn similarity(config: &Config, user_id: &str) -> Result<Similarity> {
    get_json(&config.user_endpoint("similarity", user_id)?).await
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T> {
    log::debug!("Fetching {}", url);
    let response = checked(Request::get(url).send().await?).await?;
    Ok(response.json().await?)
}

async fn request_session(url: &str, credentials: &Credentials) -> Result<Session> {
    log::debug!("Requesting token from {}", url);
    let response = checked(Request::post(url).json(credentials)?.send().await?).await?;
    let status = response.status();
    let body: TokenResponse = response.json().await?;
    session_from(body, &credentials.username, status)
}

fn session_from(body: TokenResponse, username: &str, status: u16) -> Result<Session> {
    if body.token.is_empty() {
        return Err(Error::Rejected {
            status,
            message: "service returned an empty token".to_string(),
        });
    }
    let user_id = body
        .user_id
        .filter(|id| !id.is_empty())
        .unwrap_or_else(|| username.to_string());
    Ok(Session {
        token: body.token,
        user_id,
    })
}

async fn checked(response: Response) -> Result<Response> {
    if response.ok() {
        return Ok(response);
    }
    let status = response.status();
    let message = match response.text().await {
        Ok(text) if !text.trim().is_empty() => text,
        _ => response.status_text(),
    };
    log::warn!("Request to {} rejected with {}", response.url(), status);
    Err(Error::Rejected { status, message })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn credentials_serialize_as_flat_object() {
        let credentials = Credentials {
            username: "ada@example.com".to_string(),
            password: "hunter2".to_string(),
        };
        let json = serde_json::to_value(&credentials).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"username": "ada@example.com", "password": "hunter2"})
        );
    }

    #[test]
    fn token_response_ignores_extra_fields() {
        let body: TokenResponse =
            serde_json::from_str(r#"{"token": "abc", "expires": 3600}"#).unwrap();
        assert_eq!(body.token, "abc");
        assert_eq!(body.user_id, None);
    }

    #[rstest]
    #[case(r#"{"token": "abc", "user_id": "42"}"#, "42")]
    #[case(r#"{"token": "abc"}"#, "ada")]
    #[case(r#"{"token": "abc", "user_id": ""}"#, "ada")]
    fn session_user_id_falls_back_to_username(#[case] body: &str, #[case] expected: &str) {
        let body: TokenResponse = serde_json::from_str(body).unwrap();
        let session = session_from(body, "ada", 200).unwrap();
        assert_eq!(session.token, "abc");
        assert_eq!(session.user_id, expected);
    }

    #[rstest]
    #[case(200)]
    #[case(201)]
    fn empty_token_is_rejected_with_actual_status(#[case] status: u16) {
        let body: TokenResponse = serde_json::from_str(r#"{"token": ""}"#).unwrap();
        match session_from(body, "ada", status) {
            Err(Error::Rejected { status: got, .. }) => assert_eq!(got, status),
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[test]
    fn rejection_message_includes_status() {
        let err = Error::Rejected {
            status: 401,
            message: "bad password".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "service rejected the request (401): bad password"
        );
    }

    #[test]
    fn transcription_request_matches_backend_fields() {
        let request = TranscriptionRequest {
            user_id: "42".to_string(),
            text: "hola mundo".to_string(),
            language: "es".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({"user_id": "42", "text": "hola mundo", "language": "es"})
        );
        let reply: Transcription = serde_json::from_str(r#"{"text": "hello world"}"#).unwrap();
        assert_eq!(reply.text, "hello world");
    }

    #[test]
    fn history_decodes_list_of_entries() {
        let entries: Vec<HistoryEntry> = serde_json::from_str(
            r#"[{"text": "hello world", "language": "es"}, {"text": "good morning", "language": "en"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].language, "es");
        assert_eq!(entries[1].text, "good morning");
    }

    #[test]
    fn word_frequency_decodes_pair_arrays() {
        let frequency: WordFrequency = serde_json::from_str(
            r#"{"user_frequency": [["hello", 3], ["world", 1]],
                "all_users_frequency": [["hello", 7], ["good", 4], ["world", 2]]}"#,
        )
        .unwrap();
        assert_eq!(frequency.user_frequency[0], ("hello".to_string(), 3));
        assert_eq!(frequency.all_users_frequency.len(), 3);
    }

    #[test]
    fn unique_phrases_decode_pair_arrays() {
        let phrases: Vec<TermCount> =
            serde_json::from_str(r#"[["how are you", 2], ["are you doing", 1]]"#).unwrap();
        assert_eq!(phrases[0], ("how are you".to_string(), 2));
    }

    #[test]
    fn similarity_decodes_ratios() {
        let similarity: Similarity = serde_json::from_str(
            r#"{"most_similar_users": [["7", 0.82], ["9", 0.4]]}"#,
        )
        .unwrap();
        assert_eq!(similarity.most_similar_users[0].0, "7");
        assert!((similarity.most_similar_users[0].1 - 0.82).abs() < f64::EPSILON);
    }
}
