//! Popup controller logic, kept apart from the Yew view so it can run
//! against any `BrowserHost`/`Transport` pair.

use crate::background::RuntimeMessage;
use crate::error::ClipError;
use crate::host::BrowserHost;
use crate::notion::{Database, NotionClient, Transport, Workspace};
use crate::settings::Settings;
use crate::tabs::sound_targets;

/// Everything the popup renders besides its status line
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PopupData {
    pub workspaces: Vec<Workspace>,
    pub databases: Vec<Database>,
    pub selection: Settings,
}

/// Keep a saved id only if it is still on offer
pub fn restore_selection<'a>(saved: &str, mut available: impl Iterator<Item = &'a str>) -> String {
    if !saved.is_empty() && available.any(|id| id == saved) {
        saved.to_string()
    } else {
        String::new()
    }
}

/// Running is possible once a workspace is chosen
pub fn can_run(selection: &Settings) -> bool {
    selection.has_destination()
}

/// Fetch both lists for the popup and restore the saved selection into them
pub async fn populate<H, T>(host: &H, transport: T, saved: &Settings) -> Result<PopupData, ClipError>
where
    H: BrowserHost,
    T: Transport,
{
    let client = NotionClient::connect(host, transport).await?;

    let workspaces = client.fetch_workspaces().await?;
    let space_id = restore_selection(&saved.space_id, workspaces.iter().map(|w| w.id.as_str()));

    let databases = client.fetch_databases(&space_id).await?;
    let block_id = restore_selection(&saved.block_id, databases.iter().map(|d| d.id.as_str()));

    Ok(PopupData {
        workspaces,
        databases,
        selection: Settings::new(space_id, block_id, saved.close_tabs),
    })
}

/// Refetch button: reload workspaces, keep the chosen one if it still
/// exists, reload its databases and persist the result
pub async fn refresh<H, T>(host: &H, transport: T, current: &Settings) -> Result<PopupData, ClipError>
where
    H: BrowserHost,
    T: Transport,
{
    let client = NotionClient::connect(host, transport).await?;

    let workspaces = client.fetch_workspaces().await?;
    let space_id = restore_selection(&current.space_id, workspaces.iter().map(|w| w.id.as_str()));
    let databases = client.fetch_databases(&space_id).await?;

    let selection = Settings::new(space_id, "", current.close_tabs);
    host.save_settings(&selection).await?;

    Ok(PopupData {
        workspaces,
        databases,
        selection,
    })
}

/// A new workspace invalidates the database list and selection
pub async fn select_workspace<H, T>(
    host: &H,
    transport: T,
    current: &Settings,
    space_id: &str,
) -> Result<(Vec<Database>, Settings), ClipError>
where
    H: BrowserHost,
    T: Transport,
{
    let client = NotionClient::connect(host, transport).await?;
    let databases = client.fetch_databases(space_id).await?;

    let selection = Settings::new(space_id, "", current.close_tabs);
    host.save_settings(&selection).await?;

    Ok((databases, selection))
}

/// Fire the clip request and play the audio cue; never waits on the clip
pub async fn run_clip<H: BrowserHost>(host: &H) -> Option<i32> {
    if let Err(e) = host.send_message(&RuntimeMessage::clip_now().to_json()) {
        log::warn!("Could not reach background worker: {}", e);
    }
    play_sound(host).await
}

/// Try the audio cue in each candidate tab until one accepts it.
///
/// Returns the tab it played in. All failures are swallowed.
pub async fn play_sound<H: BrowserHost>(host: &H) -> Option<i32> {
    let tabs = host.current_window_tabs().await.unwrap_or_default();
    let active = host.active_tab().await.ok().flatten();

    for tab_id in sound_targets(active.as_ref(), &tabs) {
        match host.play_sound(tab_id).await {
            Ok(()) => return Some(tab_id),
            Err(e) => log::debug!("No sound in tab {}: {}", tab_id, e),
        }
    }

    None
}
