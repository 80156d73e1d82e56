/// Compile-time configuration for the clipper

pub const NOTION_BASE: &str = "https://www.notion.so";
pub const API_PREFIX: &str = "/api/v3/";

pub const USER_COOKIE: &str = "notion_user_id";
pub const ACTIVE_USER_HEADER: &str = "x-notion-active-user-header";

/// chrome.storage.sync key holding the settings blob
pub const STORE_KEY: &str = "nbc_settings";

pub const SOUND_PATH: &str = "execute.mp3";
pub const SOUND_VOLUME: f64 = 0.9;

pub const DEFAULT_COLLECTION_NAME: &str = "My Links";
pub const DEFAULT_COLLECTION_ICON: &str = "🔗";
pub const CLIP_SOURCE: &str = "chrome";

pub const SEARCH_LIMIT: u32 = 50;

/// Error bodies from Notion are cut to this many characters
pub const ERROR_BODY_LIMIT: usize = 200;

pub const NO_NAME: &str = "(no name)";
pub const NO_TITLE: &str = "(no title)";

/// Build the full URL for a Notion internal API endpoint
pub fn api_url(endpoint: &str) -> String {
    format!("{}{}{}", NOTION_BASE, API_PREFIX, endpoint)
}

/// URL the session cookie is scoped to
pub fn cookie_url() -> String {
    format!("{}/", NOTION_BASE)
}
