/// Localized UI strings via chrome.i18n, with English fallbacks
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chrome.js")]
extern "C" {
    fn getMessage(key: &str) -> String;

    fn getUiLanguage() -> String;
}

/// Built-in strings used when `_locales` has no entry for a key
pub fn fallback(key: &str) -> &'static str {
    match key {
        "popupTitle" => "Save tabs to Notion",
        "workspaceLabel" => "Workspace",
        "databaseLabel" => "Database",
        "notSelected" => "(not selected)",
        "newDatabaseHint" => "No database selected: a new \"My Links\" database is created",
        "closeTabsLabel" => "Close saved tabs",
        "fetchSpaces" => "Reload workspaces",
        "run" => "Save all tabs",
        "loading" => "Loading from Notion...",
        _ => "",
    }
}

pub fn tr(key: &str) -> String {
    let message = getMessage(key);
    if message.is_empty() {
        fallback(key).to_string()
    } else {
        message
    }
}

/// Primary subtag of the browser UI language, e.g. "ja" for "ja-JP"
pub fn primary_language(ui_language: &str) -> &str {
    match ui_language.split(['-', '_']).next() {
        Some(lang) if !lang.is_empty() => lang,
        _ => "en",
    }
}

/// Set `<html lang>` to match the browser UI
pub fn apply_document_language() {
    let ui_language = getUiLanguage();
    let lang = primary_language(&ui_language);

    if let Some(root) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    {
        if let Err(e) = root.set_attribute("lang", lang) {
            log::warn!("Could not set document language: {:?}", e);
        }
    }
}
