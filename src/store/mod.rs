// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence for client-only entities on the local device.
//!
//! Knowledge tags and the quick-save slot never travel to the remote service. They live behind
//! a small key-value interface with a file-folder implementation ([`StoreFolder`]) and an
//! in-memory one ([`MemoryStore`]) for tests and ephemeral use.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::PathBuf;

use serde_json::Value;

use crate::model::IdError;

mod folder;
pub mod quick_save;
pub mod tags;

pub use folder::StoreFolder;
pub use quick_save::{QuickSaveEntry, QuickSaveStore};
pub use tags::{KnowledgeTag, TagStore};

#[derive(Debug)]
pub enum StoreError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    Decode {
        key: String,
        source: serde_json::Error,
    },
    InvalidKey {
        key: String,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: Box<IdError>,
    },
    SymlinkRefused {
        path: PathBuf,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
            Self::Json { path, source } => write!(f, "json error at {path:?}: {source}"),
            Self::Decode { key, source } => {
                write!(f, "stored value for {key:?} is malformed: {source}")
            }
            Self::InvalidKey { key } => write!(f, "invalid store key: {key:?}"),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::SymlinkRefused { path } => {
                write!(f, "refusing to write through symlink at {path:?}")
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            Self::Decode { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidKey { .. } => None,
            Self::SymlinkRefused { .. } => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Fast, best-effort persistence.
    ///
    /// Writes go through a temp file and an atomic rename, without per-file fsync.
    #[default]
    BestEffort,

    /// Slower persistence that also flushes to stable storage.
    ///
    /// File contents and the rename are synced where the platform allows it. Exact guarantees
    /// remain filesystem-dependent.
    Durable,
}

/// Keyed JSON storage underneath [`TagStore`] and [`QuickSaveStore`].
///
/// Keys are flat names, never paths; implementations reject anything that could address a
/// file outside their root.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError>;

    /// Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

// Store keys become file stems, so path separators, leading dots, and empty names are refused.
fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() || key.starts_with('.') || key.contains('/') || key.contains('\\') {
        return Err(StoreError::InvalidKey {
            key: key.to_owned(),
        });
    }
    Ok(())
}

/// Ephemeral store backed by a plain map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.insert(key.to_owned(), value.clone());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        validate_key(key)?;
        self.entries.remove(key);
        Ok(())
    }
}
