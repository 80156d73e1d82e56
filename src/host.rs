/// Browser host capabilities, bridged from the chrome.* extension APIs
use wasm_bindgen::prelude::*;

use crate::config::{SOUND_PATH, SOUND_VOLUME, STORE_KEY, USER_COOKIE, cookie_url};
use crate::error::ClipError;
use crate::settings::Settings;
use crate::tabs::TabInfo;

// Import JS bridge functions
#[wasm_bindgen(module = "/chrome.js")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn getSyncStorage(key: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn setSyncStorage(key: &str, value: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn getCookie(url: &str, name: &str) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn queryTabs(active_only: bool) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn createWindowWithTab(tab_id: i32, focused: bool) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn moveTabsToWindow(tab_ids: JsValue, window_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeWindow(window_id: i32) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn removeTabs(tab_ids: JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn playSoundInTab(tab_id: i32, path: &str, volume: f64) -> Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    async fn setBadgeText(text: &str) -> Result<(), JsValue>;

    fn sendRuntimeMessage(message: JsValue);
}

/// Everything the popup and the background worker need from the browser.
///
/// All methods map one-to-one onto extension API calls. Tab and window ids
/// are the browser's own.
#[allow(async_fn_in_trait)]
pub trait BrowserHost {
    /// Value of the Notion session cookie, if logged in
    async fn notion_user_id(&self) -> Result<Option<String>, ClipError>;

    async fn load_settings(&self) -> Result<Settings, ClipError>;

    async fn save_settings(&self, settings: &Settings) -> Result<(), ClipError>;

    async fn current_window_tabs(&self) -> Result<Vec<TabInfo>, ClipError>;

    async fn active_tab(&self) -> Result<Option<TabInfo>, ClipError>;

    /// Detach a tab into a new unfocused window and return the window id
    async fn create_window(&self, tab_id: i32) -> Result<i32, ClipError>;

    /// Move tabs to the end of a window
    async fn move_tabs(&self, tab_ids: &[i32], window_id: i32) -> Result<(), ClipError>;

    async fn remove_window(&self, window_id: i32) -> Result<(), ClipError>;

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), ClipError>;

    /// Inject the audio cue into a tab's page
    async fn play_sound(&self, tab_id: i32) -> Result<(), ClipError>;

    async fn set_badge_text(&self, text: &str) -> Result<(), ClipError>;

    /// Post a message to the background worker without waiting for a reply
    fn send_message(&self, message: &serde_json::Value) -> Result<(), ClipError>;
}

/// `BrowserHost` backed by the real extension APIs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChromeHost;

impl BrowserHost for ChromeHost {
    async fn notion_user_id(&self) -> Result<Option<String>, ClipError> {
        let value = getCookie(&cookie_url(), USER_COOKIE)
            .await
            .map_err(ClipError::host)?;
        Ok(value.as_string().filter(|id| !id.is_empty()))
    }

    async fn load_settings(&self) -> Result<Settings, ClipError> {
        let value = getSyncStorage(STORE_KEY).await.map_err(ClipError::host)?;
        Settings::from_js(value)
    }

    async fn save_settings(&self, settings: &Settings) -> Result<(), ClipError> {
        setSyncStorage(STORE_KEY, settings.to_js()?)
            .await
            .map_err(ClipError::host)?;
        log::debug!("Saved settings: {:?}", settings);
        Ok(())
    }

    async fn current_window_tabs(&self) -> Result<Vec<TabInfo>, ClipError> {
        let tabs_js = queryTabs(false).await.map_err(ClipError::host)?;
        Ok(serde_wasm_bindgen::from_value(tabs_js)?)
    }

    async fn active_tab(&self) -> Result<Option<TabInfo>, ClipError> {
        let tabs_js = queryTabs(true).await.map_err(ClipError::host)?;
        let tabs: Vec<TabInfo> = serde_wasm_bindgen::from_value(tabs_js)?;
        Ok(tabs.into_iter().next())
    }

    async fn create_window(&self, tab_id: i32) -> Result<i32, ClipError> {
        let window_id = createWindowWithTab(tab_id, false)
            .await
            .map_err(ClipError::host)?;
        window_id
            .as_f64()
            .map(|id| id as i32)
            .ok_or_else(|| ClipError::Host("window created without an id".to_string()))
    }

    async fn move_tabs(&self, tab_ids: &[i32], window_id: i32) -> Result<(), ClipError> {
        let tab_ids_js = serde_wasm_bindgen::to_value(tab_ids)?;
        moveTabsToWindow(tab_ids_js, window_id)
            .await
            .map_err(ClipError::host)
    }

    async fn remove_window(&self, window_id: i32) -> Result<(), ClipError> {
        removeWindow(window_id).await.map_err(ClipError::host)
    }

    async fn remove_tabs(&self, tab_ids: &[i32]) -> Result<(), ClipError> {
        let tab_ids_js = serde_wasm_bindgen::to_value(tab_ids)?;
        removeTabs(tab_ids_js).await.map_err(ClipError::host)
    }

    async fn play_sound(&self, tab_id: i32) -> Result<(), ClipError> {
        playSoundInTab(tab_id, SOUND_PATH, SOUND_VOLUME)
            .await
            .map_err(ClipError::host)
    }

    async fn set_badge_text(&self, text: &str) -> Result<(), ClipError> {
        setBadgeText(text).await.map_err(ClipError::host)
    }

    fn send_message(&self, message: &serde_json::Value) -> Result<(), ClipError> {
        let serializer = serde_wasm_bindgen::Serializer::json_compatible();
        let message_js = serde::Serialize::serialize(message, &serializer)?;
        sendRuntimeMessage(message_js);
        Ok(())
    }
}
