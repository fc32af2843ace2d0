//! Credential lookup.
//!
//! The session token is an opaque string owned by the auth service. This
//! crate only ever asks whether one is present; the login, signup and logout
//! flows are the only writers.

use std::cell::RefCell;

use web_sys::Storage;

use crate::error::{Error, Result};

pub trait CredentialStore {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, token: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Token kept in the browser's `localStorage`, surviving page reloads.
///
/// Values are stored raw rather than JSON encoded so a token written by any
/// other script under the same key is still seen.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserCredentials {
    key: String,
}

impl BrowserCredentials {
    pub fn new(key: impl Into<String>) -> Self {
        BrowserCredentials { key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn storage(&self) -> Result<Storage> {
        let window = web_sys::window().ok_or(Error::StorageUnavailable)?;
        window
            .local_storage()
            .map_err(Error::storage)?
            .ok_or(Error::StorageUnavailable)
    }
}

impl CredentialStore for BrowserCredentials {
    fn read(&self) -> Result<Option<String>> {
        self.storage()?.get_item(&self.key).map_err(Error::storage)
    }

    fn write(&self, token: &str) -> Result<()> {
        self.storage()?
            .set_item(&self.key, token)
            .map_err(Error::storage)
    }

    fn clear(&self) -> Result<()> {
        self.storage()?.remove_item(&self.key).map_err(Error::storage)
    }
}

#[derive(Debug, Default)]
pub struct MemoryCredentials {
    token: RefCell<Option<String>>,
}

impl MemoryCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        MemoryCredentials {
            token: RefCell::new(Some(token.into())),
        }
    }
}

impl CredentialStore for MemoryCredentials {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.token.borrow().clone())
    }

    fn write(&self, token: &str) -> Result<()> {
        *self.token.borrow_mut() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.token.borrow_mut().take();
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthState {
    Authenticated,
    Anonymous,
}

impl AuthState {
    /// An empty token counts as absent. Content and expiry are never checked.
    pub fn from_credential(token: Option<&str>) -> Self {
        match token {
            Some(t) if !t.is_empty() => AuthState::Authenticated,
            _ => AuthState::Anonymous,
        }
    }

    pub fn from_store(store: &dyn CredentialStore) -> Self {
        match store.read() {
            Ok(token) => AuthState::from_credential(token.as_deref()),
            Err(e) => {
                log::warn!("Failed to read credential, treating session as anonymous: {}", e);
                AuthState::Anonymous
            }
        }
    }

    pub fn is_authenticated(self) -> bool {
        self == AuthState::Authenticated
    }
}
