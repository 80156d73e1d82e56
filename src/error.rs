use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Every failure the popup or the background worker can run into
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClipError {
    #[error("not logged in to Notion")]
    NotAuthenticated,
    #[error("no destination workspace configured")]
    NoDestination,
    #[error("no tabs to clip")]
    NoQualifyingTabs,
    #[error("Notion API {status}: {body}")]
    Api { status: u16, body: String },
    #[error("network error: {0}")]
    Transport(String),
    #[error("browser error: {0}")]
    Host(String),
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl ClipError {
    pub fn host(err: JsValue) -> Self {
        ClipError::Host(describe(&err))
    }

    pub fn transport(err: JsValue) -> Self {
        ClipError::Transport(describe(&err))
    }
}

impl From<serde_wasm_bindgen::Error> for ClipError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ClipError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for ClipError {
    fn from(e: serde_json::Error) -> Self {
        ClipError::Serialization(e.to_string())
    }
}

impl From<ClipError> for JsValue {
    fn from(e: ClipError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Best-effort message extraction from a thrown JS value
fn describe(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    format!("{:?}", err)
}
