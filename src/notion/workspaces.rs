//! Workspace list reconciliation.
//!
//! Three endpoints describe the user's workspaces, each in its own shape:
//!
//! - `getWebClipperData`: `spaces` keyed by id, or a single `addToSpace.record`
//! - `getSpaces`: arrays of spaces, nested under per-user entries
//! - `loadUserContent`: `recordMap.space` keyed by id, records under `value`
//!
//! `WorkspaceSet` folds them into one list, keyed by id. The first non-empty
//! name and domain seen for an id win. Ids reported by `getSpaces` or
//! `loadUserContent` are "confirmed" and survive even without a name.

use std::collections::{HashMap, HashSet};

use serde_json::Value;

use super::{Workspace, first_text};
use crate::config::NO_NAME;

#[derive(Debug, Default)]
pub struct WorkspaceSet {
    entries: Vec<Workspace>,
    index: HashMap<String, usize>,
    confirmed: HashSet<String>,
}

impl WorkspaceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from a `getWebClipperData` response
    pub fn from_web_clipper_data(data: &Value) -> Self {
        let mut set = WorkspaceSet::new();

        if let Some(spaces) = data.get("spaces").and_then(Value::as_object) {
            for (id, space) in spaces {
                let domain = first_text(&[space.get("domain"), space.pointer("/space/domain")]);
                let name = first_text(&[
                    space.get("name"),
                    space.pointer("/space/name"),
                    data.get("spaceNameBySpaceId").and_then(|names| names.get(id)),
                ])
                .or_else(|| domain.clone());
                set.merge(id, name, domain, false);
            }
        } else if let Some(record) = data.pointer("/addToSpace/record") {
            if let Some(id) = first_text(&[record.get("id")]) {
                let name = first_text(&[record.get("name")]);
                let domain = first_text(&[record.get("domain")]);
                set.merge(&id, name, domain, false);
            }
        }

        set
    }

    /// Fold in a `getSpaces` response
    pub fn merge_spaces(&mut self, data: &Value) {
        for space in spaces_in(data) {
            let Some(id) = first_text(&[space.get("id")]) else {
                continue;
            };
            let domain = first_text(&[space.get("domain")]);
            let name = first_text(&[space.get("name")]).or_else(|| domain.clone());
            self.merge(&id, name, domain, true);
        }
    }

    /// Fold in a `loadUserContent` response
    pub fn merge_user_content(&mut self, data: &Value) {
        let Some(spaces) = data.pointer("/recordMap/space").and_then(Value::as_object) else {
            return;
        };

        for (id, record) in spaces {
            let value = match record.get("value") {
                Some(value) if value.is_object() => value,
                _ => record,
            };
            let domain = first_text(&[value.get("domain")]);
            let name = first_text(&[value.get("name")]).or_else(|| domain.clone());
            self.merge(id, name, domain, true);
        }
    }

    fn merge(&mut self, id: &str, name: Option<String>, domain: Option<String>, confirmed: bool) {
        if confirmed {
            self.confirmed.insert(id.to_string());
        }

        let i = match self.index.get(id) {
            Some(&i) => i,
            None => {
                self.entries.push(Workspace {
                    id: id.to_string(),
                    name: String::new(),
                    domain: String::new(),
                });
                self.index.insert(id.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        let entry = &mut self.entries[i];

        if entry.name.is_empty() {
            if let Some(name) = name {
                entry.name = name;
            }
        }
        if entry.domain.is_empty() {
            if let Some(domain) = domain {
                entry.domain = domain;
            }
        }
    }

    /// Drop unnamed, unconfirmed entries and sort the rest by name
    pub fn into_sorted(self) -> Vec<Workspace> {
        let confirmed = self.confirmed;
        let mut workspaces: Vec<Workspace> = self
            .entries
            .into_iter()
            .filter(|ws| !ws.name.is_empty() || !ws.domain.is_empty() || confirmed.contains(&ws.id))
            .map(|mut ws| {
                if ws.name.is_empty() {
                    ws.name = NO_NAME.to_string();
                }
                ws
            })
            .collect();

        workspaces.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });

        workspaces
    }
}

/// Every space object in a `getSpaces` response, whatever the nesting
fn spaces_in(data: &Value) -> Vec<&Value> {
    let mut spaces = Vec::new();

    match data {
        Value::Array(entries) => {
            for entry in entries {
                if let Some(list) = entry.get("spaces").and_then(Value::as_array) {
                    spaces.extend(list);
                }
            }
        }
        Value::Object(map) => {
            for value in map.values() {
                if let Some(list) = value.as_array() {
                    spaces.extend(list);
                } else if let Some(list) = value.get("spaces").and_then(Value::as_array) {
                    spaces.extend(list);
                }
            }
        }
        _ => {}
    }

    spaces
}
