// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The quick-save slot: one locally stashed text the user can restore later.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use super::{KeyValueStore, StoreError};

const QUICK_SAVE_KEY: &str = "quick_save";

/// Contents of the slot. `timestamp` is unix milliseconds at save time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSaveEntry {
    pub id: String,
    pub title: String,
    pub content: String,
    pub timestamp: u64,
}

/// Single-slot store with overwrite semantics.
#[derive(Debug)]
pub struct QuickSaveStore<S> {
    store: S,
}

impl<S: KeyValueStore> QuickSaveStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replaces whatever the slot held.
    pub fn save(
        &mut self,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<QuickSaveEntry, StoreError> {
        let millis = unix_millis();
        let entry = QuickSaveEntry {
            id: format!("quick_{millis}"),
            title: title.into(),
            content: content.into(),
            timestamp: millis,
        };
        let value = serde_json::to_value(&entry).map_err(|source| StoreError::Decode {
            key: QUICK_SAVE_KEY.to_owned(),
            source,
        })?;
        self.store.set(QUICK_SAVE_KEY, &value)?;
        Ok(entry)
    }

    pub fn load(&self) -> Result<Option<QuickSaveEntry>, StoreError> {
        let Some(value) = self.store.get(QUICK_SAVE_KEY)? else {
            return Ok(None);
        };
        let entry = serde_json::from_value(value).map_err(|source| StoreError::Decode {
            key: QUICK_SAVE_KEY.to_owned(),
            source,
        })?;
        Ok(Some(entry))
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(QUICK_SAVE_KEY)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
