// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Mutation operations for the graph model.
//!
//! A batch of ops applies all-or-nothing against a working copy and produces a
//! minimal delta that callers can use to refresh derived state. Node removal
//! cascades to incident edges, so the model never holds a dangling endpoint.

use std::collections::{BTreeSet, HashSet};
use std::fmt;

use crate::model::{
    Edge, EdgeId, GraphModel, Node, NodeCategory, NodeId, Position, RelationshipType, Significance,
    TagId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum GraphOp {
    AddNode {
        node_id: NodeId,
        label: String,
        category: Option<NodeCategory>,
    },
    UpdateNode {
        node_id: NodeId,
        patch: NodePatch,
    },
    SetNodeDetails {
        node_id: NodeId,
        details: NodeDetails,
    },
    RemoveNode {
        node_id: NodeId,
    },
    AddEdge {
        edge_id: EdgeId,
        source: NodeId,
        target: NodeId,
        relationship: Option<RelationshipType>,
        label: Option<String>,
    },
    UpdateEdge {
        edge_id: EdgeId,
        patch: EdgePatch,
    },
    RemoveEdge {
        edge_id: EdgeId,
    },
}

/// Partial update of a node's structural fields. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePatch {
    pub label: Option<String>,
    pub category: Option<NodeCategory>,
    pub user_importance: Option<u32>,
    pub position: Option<Position>,
}

/// Full replacement of a node's user detail, matching the detail editor: the
/// dialog always submits every field, so `None` here clears.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeDetails {
    pub user_notes: Option<String>,
    pub applicability_conditions: Option<String>,
    pub user_significance: Option<Significance>,
    pub associated_tag_ids: BTreeSet<TagId>,
}

/// Partial update of an edge. Endpoint changes are validated against the node
/// set before anything mutates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePatch {
    pub source: Option<NodeId>,
    pub target: Option<NodeId>,
    pub relationship: Option<RelationshipType>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub new_rev: u64,
    pub applied: usize,
    pub delta: Delta,
}

/// Which entities changed as the result of applying a batch.
///
/// This is intentionally coarse: it reports only added/removed/updated ids,
/// sorted, with nodes ahead of edges.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Delta {
    pub added: Vec<EntityRef>,
    pub removed: Vec<EntityRef>,
    pub updated: Vec<EntityRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityRef {
    Node(NodeId),
    Edge(EdgeId),
}

#[derive(Debug, Default)]
struct DeltaBuilder {
    added: HashSet<EntityRef>,
    removed: HashSet<EntityRef>,
    updated: HashSet<EntityRef>,
}

impl DeltaBuilder {
    fn record_added(&mut self, entity: EntityRef) {
        self.removed.remove(&entity);
        self.updated.remove(&entity);
        self.added.insert(entity);
    }

    fn record_removed(&mut self, entity: EntityRef) {
        self.added.remove(&entity);
        self.updated.remove(&entity);
        self.removed.insert(entity);
    }

    fn record_updated(&mut self, entity: EntityRef) {
        if self.added.contains(&entity) || self.removed.contains(&entity) {
            return;
        }
        self.updated.insert(entity);
    }

    fn finish(self) -> Delta {
        let mut added = self.added.into_iter().collect::<Vec<_>>();
        let mut removed = self.removed.into_iter().collect::<Vec<_>>();
        let mut updated = self.updated.into_iter().collect::<Vec<_>>();

        added.sort();
        removed.sort();
        updated.sort();

        Delta { added, removed, updated }
    }
}

/// Applies a batch against a working copy and installs the result only when
/// every op succeeds. The revision bumps once per installed batch, not per op.
pub fn apply_ops(model: &mut GraphModel, ops: &[GraphOp]) -> Result<ApplyResult, ApplyError> {
    if ops.is_empty() {
        return Ok(ApplyResult {
            new_rev: model.rev(),
            applied: 0,
            delta: Delta::default(),
        });
    }

    let mut working = model.clone();
    let mut delta = DeltaBuilder::default();

    for op in ops {
        apply_op(&mut working, op, &mut delta)?;
    }

    working.bump_rev();
    let new_rev = working.rev();
    *model = working;

    Ok(ApplyResult {
        new_rev,
        applied: ops.len(),
        delta: delta.finish(),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyError {
    NodeExists { node_id: NodeId },
    NodeNotFound { node_id: NodeId },
    EdgeExists { edge_id: EdgeId },
    EdgeNotFound { edge_id: EdgeId },
    MissingEndpoint { node_id: NodeId },
}

impl fmt::Display for ApplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NodeExists { node_id } => write!(f, "node already exists (id={node_id})"),
            Self::NodeNotFound { node_id } => write!(f, "node not found (id={node_id})"),
            Self::EdgeExists { edge_id } => write!(f, "edge already exists (id={edge_id})"),
            Self::EdgeNotFound { edge_id } => write!(f, "edge not found (id={edge_id})"),
            Self::MissingEndpoint { node_id } => {
                write!(f, "edge endpoint is not in the graph (id={node_id})")
            }
        }
    }
}

impl std::error::Error for ApplyError {}

// Extracted op-application implementation for node/edge mutations.
include!("ops_impl.rs");
