/// Notion Tab Clipper - Chrome Extension that saves open tabs to Notion
/// Built with Rust + WASM + Yew

mod background;
mod config;
mod controller;
mod error;
mod host;
mod i18n;
mod notion;
mod settings;
mod tabs;
pub mod ui;

#[cfg(test)]
mod test_support;

use wasm_bindgen::prelude::*;

use crate::background::RuntimeMessage;
use crate::host::ChromeHost;
use crate::notion::FetchTransport;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export the loopback check for JavaScript access
#[wasm_bindgen]
pub fn is_localhost_url(url: &str) -> bool {
    tabs::is_localhost_url(url)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    i18n::apply_document_language();
    yew::Renderer::<ui::popup::App>::new().render();
}

/// Whether the background worker should answer this runtime message
#[wasm_bindgen]
pub fn is_clip_request(message: JsValue) -> bool {
    serde_wasm_bindgen::from_value::<RuntimeMessage>(message)
        .map(|m| m.is_clip_request())
        .unwrap_or(false)
}

/// Background entry point for runtime messages; resolves to `{ok, error?}`
/// for `clipNow` and to `undefined` for anything else
#[wasm_bindgen]
pub async fn handle_runtime_message(message: JsValue) -> Result<JsValue, JsValue> {
    let message: RuntimeMessage = serde_wasm_bindgen::from_value(message).unwrap_or_default();

    match background::handle_message(&ChromeHost, FetchTransport, &message).await {
        Some(response) => Ok(serde_wasm_bindgen::to_value(&response).map_err(error::ClipError::from)?),
        None => Ok(JsValue::UNDEFINED),
    }
}

/// Clear the action badge when the service worker activates
#[wasm_bindgen]
pub async fn reset_badge() -> Result<(), JsValue> {
    background::reset_badge(&ChromeHost).await?;
    Ok(())
}
