// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Knowledge tags kept on the local device.
//!
//! Nodes reference tags through `associated_tag_ids`; the tag records themselves never leave
//! the device, so a dangling reference on a node is tolerated rather than repaired.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::model::TagId;

use super::{KeyValueStore, StoreError};

const TAGS_KEY: &str = "knowledge_tags";

/// A user-defined label nodes can carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeTag {
    id: TagId,
    name: String,
    description: Option<String>,
}

impl KnowledgeTag {
    pub fn id(&self) -> &TagId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TagJson {
    id: String,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

/// The full tag list lives under one key and is rewritten on every change; tag counts are
/// small (tens, not thousands).
#[derive(Debug)]
pub struct TagStore<S> {
    store: S,
}

impl<S: KeyValueStore> TagStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// A missing key lists as empty; malformed contents are an error.
    pub fn list(&self) -> Result<Vec<KnowledgeTag>, StoreError> {
        let Some(value) = self.store.get(TAGS_KEY)? else {
            return Ok(Vec::new());
        };
        let raw: Vec<TagJson> =
            serde_json::from_value(value).map_err(|source| StoreError::Decode {
                key: TAGS_KEY.to_owned(),
                source,
            })?;
        raw.into_iter().map(tag_from_json).collect()
    }

    pub fn add(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
    ) -> Result<KnowledgeTag, StoreError> {
        let mut tags = self.list()?;
        let tag = KnowledgeTag {
            id: next_tag_id(&tags),
            name: name.into(),
            description,
        };
        tags.push(tag.clone());
        self.save(&tags)?;
        Ok(tag)
    }

    /// Returns whether a tag with that id existed.
    pub fn remove(&mut self, id: &TagId) -> Result<bool, StoreError> {
        let mut tags = self.list()?;
        let before = tags.len();
        tags.retain(|tag| tag.id() != id);
        if tags.len() == before {
            return Ok(false);
        }
        self.save(&tags)?;
        Ok(true)
    }

    fn save(&mut self, tags: &[KnowledgeTag]) -> Result<(), StoreError> {
        let raw: Vec<TagJson> = tags.iter().map(tag_to_json).collect();
        let value = serde_json::to_value(raw).map_err(|source| StoreError::Decode {
            key: TAGS_KEY.to_owned(),
            source,
        })?;
        self.store.set(TAGS_KEY, &value)
    }
}

fn tag_from_json(raw: TagJson) -> Result<KnowledgeTag, StoreError> {
    let id = TagId::new(raw.id.clone()).map_err(|source| StoreError::InvalidId {
        field: "tags[].id",
        value: raw.id,
        source: Box::new(source),
    })?;
    Ok(KnowledgeTag {
        id,
        name: raw.name,
        description: raw.description,
    })
}

fn tag_to_json(tag: &KnowledgeTag) -> TagJson {
    TagJson {
        id: tag.id.as_str().to_owned(),
        name: tag.name.clone(),
        description: tag.description.clone(),
    }
}

// Millisecond timestamps collide when tags are created back to back, so the candidate is
// bumped until it is free of the existing list.
fn next_tag_id(existing: &[KnowledgeTag]) -> TagId {
    let mut candidate = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    loop {
        let id = format!("tag_{candidate}");
        if !existing.iter().any(|tag| tag.id().as_str() == id) {
            return TagId::new(id).expect("generated tag id should be valid");
        }
        candidate = candidate.saturating_add(1);
    }
}
