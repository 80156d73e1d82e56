/// Browser tab data and the filters that decide what gets clipped
use std::collections::HashSet;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::{Host, Url};

static HTTP_SCHEME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?:").expect("valid scheme pattern"));

/// Information about a browser tab, as reported by chrome.tabs.query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TabInfo {
    pub id: Option<i32>,
    pub url: String,
    pub title: String,
    pub active: bool,
}

impl TabInfo {
    pub fn new(id: i32, url: &str, title: &str) -> TabInfo {
        TabInfo {
            id: Some(id),
            url: url.to_string(),
            title: title.to_string(),
            active: false,
        }
    }

    pub fn is_http(&self) -> bool {
        is_http_url(&self.url)
    }

    /// http/https and not pointing at the local machine
    pub fn is_clippable(&self) -> bool {
        self.is_http() && !is_localhost_url(&self.url)
    }
}

pub fn is_http_url(url: &str) -> bool {
    HTTP_SCHEME.is_match(url)
}

/// Loopback hosts: localhost, *.localhost, 127.0.0.1 and ::1
///
/// Unparseable URLs are not considered local.
pub fn is_localhost_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url) else {
        return false;
    };

    match parsed.host() {
        Some(Host::Domain(host)) => {
            let host = host.to_lowercase();
            host == "localhost" || host.ends_with(".localhost")
        }
        Some(Host::Ipv4(ip)) => ip == Ipv4Addr::LOCALHOST,
        Some(Host::Ipv6(ip)) => ip == Ipv6Addr::LOCALHOST,
        None => false,
    }
}

/// Tabs that qualify for clipping, in window order
pub fn clippable_tabs(tabs: &[TabInfo]) -> Vec<TabInfo> {
    tabs.iter().filter(|tab| tab.is_clippable()).cloned().collect()
}

/// Tab ids to try the audio cue in: the active tab first, then every
/// http/https tab of the window, each id at most once
pub fn sound_targets(active: Option<&TabInfo>, tabs: &[TabInfo]) -> Vec<i32> {
    let candidates = active
        .and_then(|tab| tab.id)
        .into_iter()
        .chain(tabs.iter().filter(|tab| tab.is_http()).filter_map(|tab| tab.id));

    let mut seen = HashSet::new();
    candidates.filter(|id| seen.insert(*id)).collect()
}
