// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::graph::{Edge, GraphModel, Node};
use super::ids::{EdgeId, NodeId, TagId};
use super::semantic::{NodeCategory, RelationshipType, Significance};

pub(crate) fn nid(value: &str) -> NodeId {
    NodeId::new(value).expect("node id")
}

pub(crate) fn eid(value: &str) -> EdgeId {
    EdgeId::new(value).expect("edge id")
}

pub(crate) fn tid(value: &str) -> TagId {
    TagId::new(value).expect("tag id")
}

/// Four concepts in a diamond: one core, two aspects, one detail.
pub(crate) fn graph_small_diamond() -> GraphModel {
    let mut model = GraphModel::new();

    model.insert_node(Node::new(
        nid("a"),
        "Quantum computing",
        NodeCategory::CoreConcept,
    ));
    model.insert_node(Node::new(
        nid("b"),
        "Superposition",
        NodeCategory::PrimaryAspect,
    ));
    model.insert_node(Node::new(
        nid("c"),
        "Entanglement",
        NodeCategory::PrimaryAspect,
    ));
    model.insert_node(Node::new(
        nid("d"),
        "Decoherence",
        NodeCategory::RelatedDetail,
    ));

    model.push_edge(Edge::new(
        eid("a-b"),
        nid("a"),
        nid("b"),
        RelationshipType::Hierarchical,
    ));
    model.push_edge(Edge::new(
        eid("a-c"),
        nid("a"),
        nid("c"),
        RelationshipType::Hierarchical,
    ));
    model.push_edge(Edge::new(
        eid("b-d"),
        nid("b"),
        nid("d"),
        RelationshipType::Causal,
    ));
    model.push_edge(Edge::new(
        eid("c-d"),
        nid("c"),
        nid("d"),
        RelationshipType::Causal,
    ));

    model
}

/// The diamond with user detail filled in on the core node.
pub(crate) fn graph_with_user_detail() -> GraphModel {
    let mut model = graph_small_diamond();

    let node = model.node_mut(&nid("a")).expect("node a");
    node.set_user_importance(2);
    node.set_user_significance(Some(Significance::Core));
    node.set_user_notes(Some("anchor of the whole map"));

    let mut tags = BTreeSet::new();
    tags.insert(tid("tag_1"));
    node.set_associated_tag_ids(tags);

    model
}
