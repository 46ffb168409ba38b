// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Typed identifiers for graph entities.
//!
//! Each entity family gets its own id type so that a `NodeId` cannot stand in
//! for an `EdgeId`. At runtime an id is a plain string; the tag parameter
//! exists only at the type level. Request keys join ids with `:`
//! (`details:<graph>:<node>`) and store paths use `/`, so both characters are
//! reserved and rejected at construction.

use std::cmp::Ordering;
use std::error::Error;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

const RESERVED_CHARS: [char; 2] = [':', '/'];

/// A validated string identifier tagged with the entity family it names.
pub struct Id<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Validates `value` and wraps it. Ids must be non-empty and free of the
    /// reserved characters `:` and `/`.
    pub fn new(value: impl Into<String>) -> Result<Self, IdError> {
        let value = value.into();
        if value.is_empty() {
            return Err(IdError::Empty);
        }
        if let Some(reserved) = value.chars().find(|c| RESERVED_CHARS.contains(c)) {
            return Err(IdError::Reserved(reserved));
        }
        Ok(Id {
            value,
            _marker: PhantomData,
        })
    }

    /// The id as a borrowed string.
    pub fn as_str(&self) -> &str {
        &self.value
    }
}

// The impls below are written out by hand so that they hold for every tag
// type, without `T` itself having to implement anything.

impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        Id {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> Hash for Id<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Id").field(&self.value).finish()
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Rejected identifier input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdError {
    /// The input string was empty.
    Empty,
    /// The input contains a character reserved for key and path syntax.
    Reserved(char),
}

impl fmt::Display for IdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdError::Empty => f.write_str("id is empty"),
            IdError::Reserved(reserved) => {
                write!(f, "id contains reserved character {reserved:?}")
            }
        }
    }
}

impl Error for IdError {}

// Uninhabited type tags; only the aliases below are used directly.
pub enum NodeIdTag {}
pub enum EdgeIdTag {}
pub enum GraphIdTag {}
pub enum TagIdTag {}
pub enum SystemIdTag {}
pub enum TextIdTag {}

/// Identifier of a node within a graph.
pub type NodeId = Id<NodeIdTag>;
/// Identifier of an edge within a graph.
pub type EdgeId = Id<EdgeIdTag>;
/// Identifier of a stored graph.
pub type GraphId = Id<GraphIdTag>;
/// Identifier of a knowledge tag.
pub type TagId = Id<TagIdTag>;
/// Identifier of a knowledge system.
pub type SystemId = Id<SystemIdTag>;
/// Identifier of a saved source text.
pub type TextId = Id<TextIdTag>;
