//! Background coordinator: saves the window's tabs to Notion on request.
//!
//! The popup posts `{action: "clipNow"}` and does not wait for the answer.
//! The worker still replies `{ok, error?}` and logs the outcome.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::ClipError;
use crate::host::BrowserHost;
use crate::notion::{ClipItem, ClipRequest, NotionClient, Transport};
use crate::tabs::clippable_tabs;

pub const CLIP_NOW: &str = "clipNow";

/// Runtime message sent from the popup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeMessage {
    pub action: String,
}

impl RuntimeMessage {
    pub fn clip_now() -> Self {
        RuntimeMessage {
            action: CLIP_NOW.to_string(),
        }
    }

    pub fn is_clip_request(&self) -> bool {
        self.action == CLIP_NOW
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({ "action": self.action })
    }
}

/// Reply to a `clipNow` message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<ClipSummary, ClipError>> for ClipResponse {
    fn from(result: Result<ClipSummary, ClipError>) -> Self {
        match result {
            Ok(_) => ClipResponse { ok: true, error: None },
            Err(e) => ClipResponse {
                ok: false,
                error: Some(e.to_string()),
            },
        }
    }
}

/// How saved tabs were closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseMode {
    /// Tabs were left open
    Kept,
    /// Moved into one window and closed with it, restorable as one entry
    Window,
    /// Consolidation failed, tabs removed one by one
    Individually,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClipSummary {
    pub clipped: usize,
    pub appended: bool,
    pub closed: CloseMode,
}

/// Clip every qualifying tab of the current window
pub async fn clip_all_tabs<H, T>(host: &H, transport: T) -> Result<ClipSummary, ClipError>
where
    H: BrowserHost,
    T: Transport,
{
    let settings = host.load_settings().await?;
    let client = NotionClient::connect(host, transport).await?;

    if !settings.has_destination() {
        return Err(ClipError::NoDestination);
    }

    let tabs = clippable_tabs(&host.current_window_tabs().await?);
    if tabs.is_empty() {
        return Err(ClipError::NoQualifyingTabs);
    }

    let items: Vec<ClipItem> = tabs.iter().map(ClipItem::from).collect();
    let request = ClipRequest::for_settings(&settings, items)?;
    client.add_web_clipper_urls(&request).await?;

    let closed = if settings.close_tabs {
        let tab_ids: Vec<i32> = tabs.iter().filter_map(|t| t.id).collect();
        close_as_single_window(host, &tab_ids).await?
    } else {
        CloseMode::Kept
    };

    Ok(ClipSummary {
        clipped: tabs.len(),
        appended: request.is_append(),
        closed,
    })
}

/// Close tabs so the browser's history can restore them as one window.
///
/// The first tab is detached into a new unfocused window, the rest are moved
/// after it, and the window is removed. If any step fails, every tab is
/// removed directly instead.
pub async fn close_as_single_window<H: BrowserHost>(
    host: &H,
    tab_ids: &[i32],
) -> Result<CloseMode, ClipError> {
    let Some((&first, rest)) = tab_ids.split_first() else {
        return Ok(CloseMode::Kept);
    };

    match consolidate(host, first, rest).await {
        Ok(()) => Ok(CloseMode::Window),
        Err(e) => {
            log::warn!("Window consolidation failed, closing tabs individually: {}", e);
            host.remove_tabs(tab_ids).await?;
            Ok(CloseMode::Individually)
        }
    }
}

async fn consolidate<H: BrowserHost>(host: &H, first: i32, rest: &[i32]) -> Result<(), ClipError> {
    let window_id = host.create_window(first).await?;
    if !rest.is_empty() {
        host.move_tabs(rest, window_id).await?;
    }
    host.remove_window(window_id).await
}

/// Answer a runtime message; `None` for messages this worker does not handle
pub async fn handle_message<H, T>(host: &H, transport: T, message: &RuntimeMessage) -> Option<ClipResponse>
where
    H: BrowserHost,
    T: Transport,
{
    if !message.is_clip_request() {
        return None;
    }

    let result = clip_all_tabs(host, transport).await;
    match &result {
        Ok(summary) => log::info!(
            "Clipped {} tabs ({}), tabs {:?}",
            summary.clipped,
            if summary.appended { "appended" } else { "new collection" },
            summary.closed
        ),
        Err(e) => log::error!("Clip failed: {}", e),
    }
    Some(ClipResponse::from(result))
}

/// Clear the action badge when the worker starts
pub async fn reset_badge<H: BrowserHost>(host: &H) -> Result<(), ClipError> {
    host.set_badge_text("").await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::tabs::TabInfo;
    use crate::test_support::{FakeHost, FakeTransport, HostCall};
    use futures::executor::block_on;
    use serde_json::json;

    fn window_tabs() -> Vec<TabInfo> {
        vec![
            TabInfo::new(1, "https://github.com", "GitHub"),
            TabInfo::new(2, "chrome://extensions", "Extensions"),
            TabInfo::new(3, "http://localhost:3000", "Dev"),
            TabInfo::new(4, "https://docs.rs", "Docs.rs"),
            TabInfo::new(5, "https://crates.io", "crates.io"),
        ]
    }

    fn logged_in_host(settings: Settings) -> FakeHost {
        FakeHost::new()
            .with_user("user-1")
            .with_settings(settings)
            .with_tabs(window_tabs())
    }

    #[test]
    fn test_not_authenticated() {
        let host = FakeHost::new()
            .with_settings(Settings::new("space-1", "", false))
            .with_tabs(window_tabs());
        let transport = FakeTransport::new();

        let result = block_on(clip_all_tabs(&host, &transport));

        assert_eq!(result, Err(ClipError::NotAuthenticated));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_no_destination() {
        let host = logged_in_host(Settings::default());
        let transport = FakeTransport::new();

        let result = block_on(clip_all_tabs(&host, &transport));

        assert_eq!(result, Err(ClipError::NoDestination));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_no_qualifying_tabs() {
        let host = FakeHost::new()
            .with_user("user-1")
            .with_settings(Settings::new("space-1", "", false))
            .with_tabs(vec![
                TabInfo::new(1, "chrome://newtab", "New Tab"),
                TabInfo::new(2, "http://127.0.0.1:8000", "Local"),
            ]);
        let transport = FakeTransport::new();

        let result = block_on(clip_all_tabs(&host, &transport));

        assert_eq!(result, Err(ClipError::NoQualifyingTabs));
    }

    #[test]
    fn test_creates_collection_without_block() {
        let host = logged_in_host(Settings::new("space-1", "", false));
        let transport = FakeTransport::new();

        let summary = block_on(clip_all_tabs(&host, &transport)).unwrap();

        assert_eq!(summary.clipped, 3);
        assert!(!summary.appended);
        assert_eq!(summary.closed, CloseMode::Kept);

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        let (endpoint, body, user_id) = &requests[0];
        assert_eq!(endpoint, "addWebClipperURLs");
        assert_eq!(user_id, "user-1");
        assert_eq!(body["type"], "create_collection");
        assert_eq!(body["name"], "My Links");
        assert_eq!(
            body["items"],
            json!([
                { "url": "https://github.com", "title": "GitHub" },
                { "url": "https://docs.rs", "title": "Docs.rs" },
                { "url": "https://crates.io", "title": "crates.io" }
            ])
        );
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_appends_with_block() {
        let host = logged_in_host(Settings::new("space-1", "block-9", false));
        let transport = FakeTransport::new();

        let summary = block_on(clip_all_tabs(&host, &transport)).unwrap();

        assert!(summary.appended);
        let requests = transport.requests();
        assert_eq!(requests[0].1["type"], "block");
        assert_eq!(requests[0].1["blockId"], "block-9");
        assert_eq!(requests[0].1["spaceId"], "space-1");
    }

    #[test]
    fn test_api_error_keeps_tabs_open() {
        let host = logged_in_host(Settings::new("space-1", "", true));
        let transport = FakeTransport::new().failing(
            "addWebClipperURLs",
            ClipError::Api { status: 500, body: "boom".to_string() },
        );

        let result = block_on(clip_all_tabs(&host, &transport));

        assert_eq!(result, Err(ClipError::Api { status: 500, body: "boom".to_string() }));
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_closes_as_one_window() {
        let host = logged_in_host(Settings::new("space-1", "", true)).with_next_window(42);
        let transport = FakeTransport::new();

        let summary = block_on(clip_all_tabs(&host, &transport)).unwrap();

        assert_eq!(summary.closed, CloseMode::Window);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::CreateWindow(1),
                HostCall::MoveTabs(vec![4, 5], 42),
                HostCall::RemoveWindow(42),
            ]
        );
    }

    #[test]
    fn test_consolidation_failure_falls_back() {
        let host = logged_in_host(Settings::new("space-1", "", true))
            .with_next_window(42)
            .failing_move();
        let transport = FakeTransport::new();

        let summary = block_on(clip_all_tabs(&host, &transport)).unwrap();

        assert_eq!(summary.closed, CloseMode::Individually);
        assert_eq!(
            host.calls(),
            vec![
                HostCall::CreateWindow(1),
                HostCall::MoveTabs(vec![4, 5], 42),
                HostCall::RemoveTabs(vec![1, 4, 5]),
            ]
        );
    }

    #[test]
    fn test_single_tab_skips_move() {
        let host = FakeHost::new().with_next_window(7);

        let mode = block_on(close_as_single_window(&host, &[3])).unwrap();

        assert_eq!(mode, CloseMode::Window);
        assert_eq!(host.calls(), vec![HostCall::CreateWindow(3), HostCall::RemoveWindow(7)]);
    }

    #[test]
    fn test_no_tabs_to_close() {
        let host = FakeHost::new();

        let mode = block_on(close_as_single_window(&host, &[])).unwrap();

        assert_eq!(mode, CloseMode::Kept);
        assert!(host.calls().is_empty());
    }

    #[test]
    fn test_handle_message_responses() {
        let host = logged_in_host(Settings::new("space-1", "", false));
        let transport = FakeTransport::new();

        let ok = block_on(handle_message(&host, &transport, &RuntimeMessage::clip_now()));
        assert_eq!(ok, Some(ClipResponse { ok: true, error: None }));

        let anon = FakeHost::new().with_settings(Settings::new("space-1", "", false));
        let failed = block_on(handle_message(&anon, &transport, &RuntimeMessage::clip_now()));
        assert_eq!(
            failed,
            Some(ClipResponse {
                ok: false,
                error: Some("not logged in to Notion".to_string())
            })
        );

        let other = RuntimeMessage { action: "ping".to_string() };
        assert_eq!(block_on(handle_message(&host, &transport, &other)), None);
    }

    #[test]
    fn test_response_serialization() {
        let ok = serde_json::to_value(ClipResponse { ok: true, error: None }).unwrap();
        assert_eq!(ok, json!({ "ok": true }));

        let message: RuntimeMessage = serde_json::from_value(json!({ "action": "clipNow" })).unwrap();
        assert!(message.is_clip_request());
        assert_eq!(message.to_json(), json!({ "action": "clipNow" }));
    }

    #[test]
    fn test_reset_badge() {
        let host = FakeHost::new();

        block_on(reset_badge(&host)).unwrap();

        assert_eq!(host.calls(), vec![HostCall::SetBadge(String::new())]);
    }
}
