/// Settings record persisted in chrome.storage.sync

use serde::{Deserialize, Serialize};
use wasm_bindgen::JsValue;

use crate::error::ClipError;

/// Root settings structure, stored as a single blob under `config::STORE_KEY`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub space_id: String,
    pub block_id: String,
    pub close_tabs: bool,
}

impl Settings {
    pub fn new(space_id: impl Into<String>, block_id: impl Into<String>, close_tabs: bool) -> Self {
        Settings {
            space_id: space_id.into(),
            block_id: block_id.into(),
            close_tabs,
        }
    }

    /// A workspace is required before anything can be clipped
    pub fn has_destination(&self) -> bool {
        !self.space_id.is_empty()
    }

    /// Whether clips append to an existing database instead of creating one
    pub fn appends_to_block(&self) -> bool {
        !self.block_id.is_empty()
    }

    /// Decode the stored blob; a missing key yields defaults
    pub fn from_js(value: JsValue) -> Result<Self, ClipError> {
        if value.is_null() || value.is_undefined() {
            return Ok(Settings::default());
        }
        Ok(serde_wasm_bindgen::from_value(value)?)
    }

    pub fn to_js(&self) -> Result<JsValue, ClipError> {
        Ok(serde_wasm_bindgen::to_value(self)?)
    }
}
