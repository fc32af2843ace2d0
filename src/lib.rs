//! Voice analyzer web frontend.
//!
//! Maps URL paths to pages, mounts the Yew application and gates navigation
//! on the presence of a session token: `/dashboard` needs one, `/login` and
//! `/signup` are skipped when one exists.

pub mod api;
pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod guard;
pub mod router;

pub mod pages {
    pub mod auth_form;
    pub mod dashboard;
    pub mod header;
    pub mod home;
    pub mod login;
    pub mod not_found;
    pub mod signup;
}

pub use config::Config;
pub use error::{Error, Result};

pub const APP_TITLE: &str = "Voice Analyzer";
