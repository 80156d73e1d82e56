//! In-memory `BrowserHost` and `Transport` used by unit tests

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::{Value, json};

use crate::error::ClipError;
use crate::host::BrowserHost;
use crate::notion::Transport;
use crate::settings::Settings;
use crate::tabs::TabInfo;

/// Side effects a `FakeHost` observed, in order
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    SaveSettings(Settings),
    CreateWindow(i32),
    MoveTabs(Vec<i32>, i32),
    RemoveWindow(i32),
    RemoveTabs(Vec<i32>),
    PlaySound(i32),
    SetBadge(String),
    SendMessage(Value),
}

#[derive(Default)]
pub struct FakeHost {
    user_id: Option<String>,
    settings: RefCell<Settings>,
    tabs: Vec<TabInfo>,
    next_window: i32,
    fail_move: bool,
    silent_tabs: Vec<i32>,
    calls: RefCell<Vec<HostCall>>,
}

impl FakeHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_user(mut self, user_id: &str) -> Self {
        self.user_id = Some(user_id.to_string());
        self
    }

    pub fn with_settings(self, settings: Settings) -> Self {
        *self.settings.borrow_mut() = settings;
        self
    }

    pub fn with_tabs(mut self, tabs: Vec<TabInfo>) -> Self {
        self.tabs = tabs;
        self
    }

    pub fn with_next_window(mut self, window_id: i32) -> Self {
        self.next_window = window_id;
        self
    }

    pub fn failing_move(mut self) -> Self {
        self.fail_move = true;
        self
    }

    /// Tabs where audio injection fails
    pub fn with_silent_tabs(mut self, tab_ids: &[i32]) -> Self {
        self.silent_tabs = tab_ids.to_vec();
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.borrow().clone()
    }

    pub fn stored_settings(&self) -> Settings {
        self.settings.borrow().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl BrowserHost for FakeHost {
    async fn notion_user_id(&self) -> Result<Option<String>, ClipError> {
        Ok(self.user_id.clone())
    }

    async fn load_settings(&self) -> Result<Settings, ClipError> {
        Ok(self.settings.borrow().clone())
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), ClipError> {
        self.record(HostCall::SaveSettings(settings.clone()));
        *self.settings.borrow_mut() = settings.clone();
        Ok(())
    }

    async fn current_window_tabs(&self) -> Result<Vec<TabInfo>, ClipError> {
        Ok(self.tabs.clone())
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>, ClipError> {
        Ok(self.tabs.iter().find(|t| t.active).cloned())
    }

    async fn create_window(&self, tab_id: i32) -> Result<i32, ClipError> {
        self.record(HostCall::CreateWindow(tab_id));
        Ok(self.next_window)
    }

    async fn move_tabs(&self, tab_ids: &[i32], window_id: i32) -> Result<(), ClipError> {
        self.record(HostCall::MoveTabs(tab_ids.to_vec(), window_id));
        if self.fail_move {
            return Err(ClipError::Host("Tabs cannot be edited right now".to_string()));
        }
        Ok(())
    }

    async fn remove_window(&self, window_id: i32) -> Result<(), ClipError> {
        self.record(HostCall::RemoveWindow(window_id));
        Ok(())
    }

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), ClipError> {
        self.record(HostCall::RemoveTabs(tab_ids.to_vec()));
        Ok(())
    }

    async fn play_sound(&self, tab_id: i32) -> Result<(), ClipError> {
        self.record(HostCall::PlaySound(tab_id));
        if self.silent_tabs.contains(&tab_id) {
            return Err(ClipError::Host("Cannot access contents of the page".to_string()));
        }
        Ok(())
    }

    async fn set_badge_text(&self, text: &str) -> Result<(), ClipError> {
        self.record(HostCall::SetBadge(text.to_string()));
        Ok(())
    }

    fn send_message(&self, message: &Value) -> Result<(), ClipError> {
        self.record(HostCall::SendMessage(message.clone()));
        Ok(())
    }
}

/// Canned responses per endpoint; unknown endpoints answer `{}`
#[derive(Default)]
pub struct FakeTransport {
    responses: HashMap<String, Result<Value, ClipError>>,
    requests: RefCell<Vec<(String, Value, String)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn responding(mut self, endpoint: &str, response: Value) -> Self {
        self.responses.insert(endpoint.to_string(), Ok(response));
        self
    }

    pub fn failing(mut self, endpoint: &str, error: ClipError) -> Self {
        self.responses.insert(endpoint.to_string(), Err(error));
        self
    }

    /// `(endpoint, body, user id)` of every request, in order
    pub fn requests(&self) -> Vec<(String, Value, String)> {
        self.requests.borrow().clone()
    }

    pub fn endpoints(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.0.clone()).collect()
    }
}

impl Transport for FakeTransport {
    async fn post(&self, endpoint: &str, body: &Value, user_id: &str) -> Result<Value, ClipError> {
        self.requests
            .borrow_mut()
            .push((endpoint.to_string(), body.clone(), user_id.to_string()));

        self.responses
            .get(endpoint)
            .cloned()
            .unwrap_or_else(|| Ok(json!({})))
    }
}
