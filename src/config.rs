use std::str::FromStr;

use log::Level;
use url::Url;

use crate::error::{Error, Result};

pub const DEFAULT_MOUNT_ID: &str = "app";
pub const DEFAULT_CREDENTIAL_KEY: &str = "token";
pub const DEFAULT_USER_KEY: &str = "user_id";
pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000";

/// Settings baked into the bundle at build time.
///
/// A WASM bundle has no process environment, so overrides are read with
/// `option_env!` when Trunk compiles the crate:
///
/// * `VOICE_ANALYZER_API_BASE` - base URL of the auth and analysis service
/// * `VOICE_ANALYZER_LOG_LEVEL` - `error`, `warn`, `info`, `debug` or `trace`
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub mount_id: String,
    pub credential_key: String,
    /// Storage key of the signed-in user's id.
    pub user_key: String,
    pub api_base: String,
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            mount_id: DEFAULT_MOUNT_ID.to_string(),
            credential_key: DEFAULT_CREDENTIAL_KEY.to_string(),
            user_key: DEFAULT_USER_KEY.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            log_level: Level::Info,
        }
    }
}

impl Config {
    pub fn from_build_env() -> Self {
        Config::default().with_overrides(
            option_env!("VOICE_ANALYZER_API_BASE"),
            option_env!("VOICE_ANALYZER_LOG_LEVEL"),
        )
    }

    fn with_overrides(mut self, api_base: Option<&str>, log_level: Option<&str>) -> Self {
        if let Some(base) = api_base.filter(|b| !b.trim().is_empty()) {
            self.api_base = base.trim().to_string();
        }
        // unknown level names keep the default
        if let Some(level) = log_level.and_then(|l| Level::from_str(l.trim()).ok()) {
            self.log_level = level;
        }
        self
    }

    /// Joins an endpoint onto `api_base`, tolerating a trailing slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_base.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Endpoint of a per-user resource such as `history/<user_id>`. The id is
    /// percent-encoded as a single path segment.
    pub fn user_endpoint(&self, resource: &str, user_id: &str) -> Result<String> {
        let mut endpoint = Url::parse(&self.endpoint(resource))?;
        endpoint
            .path_segments_mut()
            .map_err(|_| Error::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .push(user_id);
        Ok(endpoint.into())
    }
}
