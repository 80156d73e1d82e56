/// Database listing from `searchWebClipperPages`
use std::collections::HashSet;

use serde_json::Value;

use super::{Database, first_text};
use crate::config::NO_TITLE;

const DATABASE_TYPES: [&str; 2] = ["collection", "collection_view"];

/// Extract collections from a search response, first occurrence of an id wins.
///
/// Results live under `results` (or `records` on older responses) and the
/// id/type/name may sit on the item itself or under `record`, `value` or
/// `block`.
pub fn parse_search_results(data: &Value) -> Vec<Database> {
    let items = data
        .get("results")
        .and_then(Value::as_array)
        .or_else(|| data.get("records").and_then(Value::as_array));

    let Some(items) = items else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut databases = Vec::new();

    for item in items {
        let Some(id) = first_text(&[
            item.get("id"),
            item.pointer("/record/id"),
            item.pointer("/value/id"),
            item.pointer("/block/id"),
        ]) else {
            continue;
        };

        let kind = first_text(&[
            item.get("type"),
            item.pointer("/record/type"),
            item.pointer("/value/type"),
            item.pointer("/block/type"),
        ]);
        if !kind.is_some_and(|k| DATABASE_TYPES.contains(&k.as_str())) {
            continue;
        }

        if !seen.insert(id.clone()) {
            continue;
        }

        let title = first_text(&[
            item.get("name"),
            item.pointer("/record/name"),
            item.pointer("/value/name"),
            item.pointer("/block/properties/title/0/0"),
        ])
        .unwrap_or_else(|| NO_TITLE.to_string());

        databases.push(Database { id, title });
    }

    databases
}
