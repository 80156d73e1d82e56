//! HTTP transport for Notion's internal `/api/v3` endpoints.
//!
//! Every call is a `POST` with a JSON body. The session cookie rides along
//! through `credentials: include` and the user id is forwarded in
//! `x-notion-active-user-header`.

use serde_json::{Value, json};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestCredentials, RequestInit, Response, Window, WorkerGlobalScope};

use crate::config::{ACTIVE_USER_HEADER, ERROR_BODY_LIMIT, api_url};
use crate::error::ClipError;

/// Sends one JSON request to a Notion endpoint and returns the decoded body
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post(&self, endpoint: &str, body: &Value, user_id: &str) -> Result<Value, ClipError>;
}

impl<T: Transport> Transport for &T {
    async fn post(&self, endpoint: &str, body: &Value, user_id: &str) -> Result<Value, ClipError> {
        (**self).post(endpoint, body, user_id).await
    }
}

/// `fetch`-backed transport, usable from both the popup window and the
/// background service worker
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    async fn post(&self, endpoint: &str, body: &Value, user_id: &str) -> Result<Value, ClipError> {
        let headers = Headers::new().map_err(ClipError::transport)?;
        headers
            .set("Content-Type", "application/json")
            .map_err(ClipError::transport)?;
        headers
            .set(ACTIVE_USER_HEADER, user_id)
            .map_err(ClipError::transport)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_credentials(RequestCredentials::Include);
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&serde_json::to_string(body)?));

        let url = api_url(endpoint);
        let request = Request::new_with_str_and_init(&url, &init).map_err(ClipError::transport)?;

        log::debug!("POST {}", url);

        let response: Response = JsFuture::from(fetch(&request))
            .await
            .map_err(ClipError::transport)?
            .dyn_into()
            .map_err(ClipError::transport)?;

        let text = JsFuture::from(response.text().map_err(ClipError::transport)?)
            .await
            .map_err(ClipError::transport)?
            .as_string()
            .unwrap_or_default();

        decode_response(response.status(), &text)
    }
}

fn fetch(request: &Request) -> js_sys::Promise {
    let global = js_sys::global();
    match global.dyn_ref::<Window>() {
        Some(window) => window.fetch_with_request(request),
        None => global
            .unchecked_ref::<WorkerGlobalScope>()
            .fetch_with_request(request),
    }
}

/// Turn a raw HTTP status and body into a JSON value.
///
/// Non-2xx statuses become `ClipError::Api` with the body cut down to
/// `ERROR_BODY_LIMIT` characters. A 2xx body that is not JSON is wrapped as
/// `{"raw": text}`; an empty one becomes `{}`.
pub fn decode_response(status: u16, text: &str) -> Result<Value, ClipError> {
    if !(200..300).contains(&status) {
        return Err(ClipError::Api {
            status,
            body: truncate_chars(text, ERROR_BODY_LIMIT),
        });
    }

    if text.trim().is_empty() {
        return Ok(json!({}));
    }

    Ok(serde_json::from_str(text).unwrap_or_else(|_| json!({ "raw": text })))
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
