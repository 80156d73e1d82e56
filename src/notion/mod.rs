/// Client for Notion's internal web API
mod clip;
mod databases;
mod transport;
mod workspaces;

pub use clip::ClipRequest;
pub use databases::parse_search_results;
pub use transport::{FetchTransport, Transport};
pub use workspaces::WorkspaceSet;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::config::SEARCH_LIMIT;
use crate::error::ClipError;
use crate::host::BrowserHost;
use crate::tabs::TabInfo;

/// A Notion workspace ("space") the user belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub domain: String,
}

/// A database (collection) links can be appended to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Database {
    pub id: String,
    pub title: String,
}

/// One link submitted to Notion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipItem {
    pub url: String,
    pub title: String,
}

impl From<&TabInfo> for ClipItem {
    fn from(tab: &TabInfo) -> Self {
        ClipItem {
            url: tab.url.clone(),
            title: tab.title.clone(),
        }
    }
}

/// First candidate that is a non-empty string
pub(crate) fn first_text(candidates: &[Option<&Value>]) -> Option<String> {
    candidates
        .iter()
        .flatten()
        .filter_map(|v| v.as_str())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// An authenticated API session: a transport plus the active user id
pub struct NotionClient<T> {
    transport: T,
    user_id: String,
}

impl<T: Transport> NotionClient<T> {
    /// Read the session cookie and fail with `NotAuthenticated` if there is none
    pub async fn connect<H: BrowserHost>(host: &H, transport: T) -> Result<Self, ClipError> {
        let user_id = host
            .notion_user_id()
            .await?
            .filter(|id| !id.is_empty())
            .ok_or(ClipError::NotAuthenticated)?;

        Ok(NotionClient { transport, user_id })
    }

    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value, ClipError> {
        self.transport.post(endpoint, body, &self.user_id).await
    }

    /// Workspaces merged from all three listing endpoints.
    ///
    /// `getWebClipperData` is required; `getSpaces` and `loadUserContent`
    /// only enrich the result and their failures are logged and skipped.
    pub async fn fetch_workspaces(&self) -> Result<Vec<Workspace>, ClipError> {
        let init = json!({
            "addToSpaceBlockIds": {},
            "recentSpaceBlockIds": {},
            "addToBlockProperties": {}
        });
        let data = self.post("getWebClipperData", &init).await?;
        let mut set = WorkspaceSet::from_web_clipper_data(&data);

        match self.post("getSpaces", &json!({})).await {
            Ok(spaces) => set.merge_spaces(&spaces),
            Err(e) => log::warn!("getSpaces failed, continuing: {}", e),
        }

        match self.post("loadUserContent", &json!({})).await {
            Ok(content) => set.merge_user_content(&content),
            Err(e) => log::warn!("loadUserContent failed, continuing: {}", e),
        }

        let workspaces = set.into_sorted();
        log::info!("Found {} workspaces", workspaces.len());
        Ok(workspaces)
    }

    /// Databases in a workspace; an empty space id yields an empty list
    pub async fn fetch_databases(&self, space_id: &str) -> Result<Vec<Database>, ClipError> {
        if space_id.is_empty() {
            return Ok(Vec::new());
        }

        let body = json!({ "spaceId": space_id, "query": "", "limit": SEARCH_LIMIT });
        let data = self.post("searchWebClipperPages", &body).await?;
        let databases = parse_search_results(&data);

        log::info!("Found {} databases in {}", databases.len(), space_id);
        Ok(databases)
    }

    pub async fn add_web_clipper_urls(&self, request: &ClipRequest) -> Result<Value, ClipError> {
        let body = serde_json::to_value(request)?;
        self.post("addWebClipperURLs", &body).await
    }
}
