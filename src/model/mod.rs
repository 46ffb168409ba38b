// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A [`GraphModel`] holds concept nodes and the directed, typed edges between
//! them, along with the closed vocabularies the analysis service emits.

#[cfg(test)]
pub(crate) mod fixtures;
pub mod graph;
pub mod ids;
pub mod semantic;

pub use graph::{Edge, GraphModel, Node, Position};
pub use ids::{EdgeId, GraphId, Id, IdError, NodeId, SystemId, TagId, TextId};
pub use semantic::{NodeCategory, RelationshipType, Significance};
