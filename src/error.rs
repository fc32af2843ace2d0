use wasm_bindgen::JsValue;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("local storage is not available in this browser context")]
    StorageUnavailable,

    #[error("credential store access failed: {0}")]
    Storage(String),

    #[error("mount element #{0} not found in document")]
    MountTargetMissing(String),

    #[error("application is already mounted")]
    AlreadyMounted,

    #[error("service request failed: {0}")]
    Request(#[from] gloo_net::Error),

    #[error("invalid service URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

impl Error {
    /// Wraps a JS exception raised by a storage call.
    pub fn storage(value: JsValue) -> Self {
        Error::Storage(
            value
                .as_string()
                .unwrap_or_else(|| format!("{:?}", value)),
        )
    }
}
