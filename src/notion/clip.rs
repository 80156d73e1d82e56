/// Request body for `addWebClipperURLs`
use serde::Serialize;

use super::ClipItem;
use crate::config::{CLIP_SOURCE, DEFAULT_COLLECTION_ICON, DEFAULT_COLLECTION_NAME};
use crate::error::ClipError;
use crate::settings::Settings;

/// Either append to a chosen database, or let Notion create a new one
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClipRequest {
    #[serde(rename_all = "camelCase")]
    Block {
        block_id: String,
        space_id: String,
        items: Vec<ClipItem>,
        from: String,
    },
    #[serde(rename_all = "camelCase")]
    CreateCollection {
        space_id: String,
        name: String,
        icon_emoji: String,
        items: Vec<ClipItem>,
        from: String,
    },
}

impl ClipRequest {
    pub fn for_settings(settings: &Settings, items: Vec<ClipItem>) -> Result<Self, ClipError> {
        if !settings.has_destination() {
            return Err(ClipError::NoDestination);
        }

        let request = if settings.appends_to_block() {
            ClipRequest::Block {
                block_id: settings.block_id.clone(),
                space_id: settings.space_id.clone(),
                items,
                from: CLIP_SOURCE.to_string(),
            }
        } else {
            ClipRequest::CreateCollection {
                space_id: settings.space_id.clone(),
                name: DEFAULT_COLLECTION_NAME.to_string(),
                icon_emoji: DEFAULT_COLLECTION_ICON.to_string(),
                items,
                from: CLIP_SOURCE.to_string(),
            }
        };

        Ok(request)
    }

    pub fn is_append(&self) -> bool {
        matches!(self, ClipRequest::Block { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn items() -> Vec<ClipItem> {
        vec![ClipItem {
            url: "https://a.com".to_string(),
            title: "A".to_string(),
        }]
    }

    #[test]
    fn test_append_body() {
        let settings = Settings::new("space-1", "block-1", false);
        let request = ClipRequest::for_settings(&settings, items()).unwrap();

        assert!(request.is_append());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "type": "block",
                "blockId": "block-1",
                "spaceId": "space-1",
                "items": [{ "url": "https://a.com", "title": "A" }],
                "from": "chrome"
            })
        );
    }

    #[test]
    fn test_create_collection_body() {
        let settings = Settings::new("space-1", "", false);
        let request = ClipRequest::for_settings(&settings, items()).unwrap();

        assert!(!request.is_append());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "type": "create_collection",
                "spaceId": "space-1",
                "name": "My Links",
                "iconEmoji": "🔗",
                "items": [{ "url": "https://a.com", "title": "A" }],
                "from": "chrome"
            })
        );
    }

    #[test]
    fn test_no_destination() {
        let settings = Settings::new("", "block-1", true);
        assert_eq!(
            ClipRequest::for_settings(&settings, items()),
            Err(ClipError::NoDestination)
        );
    }
}
