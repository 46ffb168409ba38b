// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::ids::{EdgeId, NodeId, TagId};
use crate::model::semantic::{NodeCategory, RelationshipType, Significance};
use crate::style::{edge_style, node_style, EdgeStyle, NodeStyle};

/// Canvas coordinates of a node, only present once a layout or the user has
/// placed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A concept node.
///
/// Semantic fields (category, importance, significance) drive the derived
/// [`NodeStyle`]; the setters for those fields restyle in place so the style
/// never goes stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    label: String,
    category: NodeCategory,
    user_importance: u32,
    user_significance: Option<Significance>,
    user_notes: Option<String>,
    applicability_conditions: Option<String>,
    associated_tag_ids: BTreeSet<TagId>,
    position: Option<Position>,
    style: NodeStyle,
}

impl Node {
    pub fn new(id: NodeId, label: impl Into<String>, category: NodeCategory) -> Self {
        Self {
            id,
            label: label.into(),
            category,
            user_importance: 0,
            user_significance: None,
            user_notes: None,
            applicability_conditions: None,
            associated_tag_ids: BTreeSet::new(),
            position: None,
            style: node_style(category, 0, None),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn category(&self) -> NodeCategory {
        self.category
    }

    pub fn set_category(&mut self, category: NodeCategory) {
        self.category = category;
        self.restyle();
    }

    pub fn user_importance(&self) -> u32 {
        self.user_importance
    }

    pub fn set_user_importance(&mut self, user_importance: u32) {
        self.user_importance = user_importance;
        self.restyle();
    }

    pub fn user_significance(&self) -> Option<Significance> {
        self.user_significance
    }

    pub fn set_user_significance(&mut self, user_significance: Option<Significance>) {
        self.user_significance = user_significance;
        self.restyle();
    }

    pub fn user_notes(&self) -> Option<&str> {
        self.user_notes.as_deref()
    }

    pub fn set_user_notes<T: Into<String>>(&mut self, user_notes: Option<T>) {
        self.user_notes = user_notes.map(Into::into);
    }

    pub fn applicability_conditions(&self) -> Option<&str> {
        self.applicability_conditions.as_deref()
    }

    pub fn set_applicability_conditions<T: Into<String>>(&mut self, conditions: Option<T>) {
        self.applicability_conditions = conditions.map(Into::into);
    }

    /// Tag references are tolerant: a tag id here may no longer exist in the
    /// tag store and that is not an error.
    pub fn associated_tag_ids(&self) -> &BTreeSet<TagId> {
        &self.associated_tag_ids
    }

    pub fn set_associated_tag_ids(&mut self, tag_ids: BTreeSet<TagId>) {
        self.associated_tag_ids = tag_ids;
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn set_position(&mut self, position: Option<Position>) {
        self.position = position;
    }

    pub fn style(&self) -> &NodeStyle {
        &self.style
    }

    fn restyle(&mut self) {
        self.style = node_style(self.category, self.user_importance, self.user_significance);
    }
}

/// A directed edge between two nodes that both exist in the same model.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    id: EdgeId,
    source: NodeId,
    target: NodeId,
    relationship: RelationshipType,
    label: Option<String>,
    style: EdgeStyle,
}

impl Edge {
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, relationship: RelationshipType) -> Self {
        Self {
            id,
            source,
            target,
            relationship,
            label: None,
            style: edge_style(relationship),
        }
    }

    pub fn id(&self) -> &EdgeId {
        &self.id
    }

    pub fn source(&self) -> &NodeId {
        &self.source
    }

    pub fn set_source(&mut self, source: NodeId) {
        self.source = source;
    }

    pub fn target(&self) -> &NodeId {
        &self.target
    }

    pub fn set_target(&mut self, target: NodeId) {
        self.target = target;
    }

    pub fn relationship(&self) -> RelationshipType {
        self.relationship
    }

    pub fn set_relationship(&mut self, relationship: RelationshipType) {
        self.relationship = relationship;
        self.style = edge_style(relationship);
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn set_label<T: Into<String>>(&mut self, label: Option<T>) {
        self.label = label.map(Into::into);
    }

    /// Label to render: the explicit label when set, otherwise the
    /// relationship's wire name.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) => label,
            None => self.relationship.as_wire_str(),
        }
    }

    pub fn style(&self) -> &EdgeStyle {
        &self.style
    }
}

/// The in-memory knowledge graph.
///
/// Nodes are keyed by id; edges keep their arrival order, which is the order
/// they render in. Endpoint integrity (every edge's source and target resolve
/// to a present node) is maintained by the constructing layers: the normalizer
/// drops dangling edges and the op interpreter cascades node removals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphModel {
    nodes: BTreeMap<NodeId, Node>,
    edges: Vec<Edge>,
    rev: u64,
}

impl GraphModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes(&self) -> &BTreeMap<NodeId, Node> {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn insert_node(&mut self, node: Node) -> Option<Node> {
        self.nodes.insert(node.id().clone(), node)
    }

    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        self.nodes.remove(id)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    pub fn edge(&self, id: &EdgeId) -> Option<&Edge> {
        self.edges.iter().find(|edge| edge.id() == id)
    }

    pub fn edge_mut(&mut self, id: &EdgeId) -> Option<&mut Edge> {
        self.edges.iter_mut().find(|edge| edge.id() == id)
    }

    pub fn contains_edge_id(&self, id: &EdgeId) -> bool {
        self.edges.iter().any(|edge| edge.id() == id)
    }

    pub fn push_edge(&mut self, edge: Edge) {
        self.edges.push(edge);
    }

    pub fn remove_edge(&mut self, id: &EdgeId) -> Option<Edge> {
        let index = self.edges.iter().position(|edge| edge.id() == id)?;
        Some(self.edges.remove(index))
    }

    /// Id for an edge that arrived without one: `<source>-<target>`, with a
    /// `#2`, `#3`, ... suffix when earlier edges between the same endpoints
    /// already claimed the plain form.
    pub fn derived_edge_id(&self, source: &NodeId, target: &NodeId) -> EdgeId {
        let base = format!("{source}-{target}");
        let mut candidate = base.clone();
        let mut suffix = 2u64;
        while self
            .edges
            .iter()
            .any(|edge| edge.id().as_str() == candidate)
        {
            candidate = format!("{base}#{suffix}");
            suffix = suffix.saturating_add(1);
        }
        EdgeId::new(candidate).expect("joined ids form a valid id segment")
    }

    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn set_rev(&mut self, rev: u64) {
        self.rev = rev;
    }

    pub fn bump_rev(&mut self) {
        self.rev = self.rev.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::{Edge, GraphModel, Node, Position};
    use crate::model::ids::{EdgeId, NodeId, TagId};
    use crate::model::semantic::{NodeCategory, RelationshipType, Significance};
    use crate::style::HIGHLIGHT_FILL;

    fn nid(value: &str) -> NodeId {
        NodeId::new(value).expect("node id")
    }

    #[test]
    fn new_node_has_category_defaults_and_a_derived_style() {
        let node = Node::new(nid("a"), "Alpha", NodeCategory::Other);
        assert_eq!(node.label(), "Alpha");
        assert_eq!(node.user_importance(), 0);
        assert_eq!(node.user_significance(), None);
        assert_eq!(node.style().size, 30);
    }

    #[test]
    fn semantic_setters_keep_the_style_in_sync() {
        let mut node = Node::new(nid("a"), "Alpha", NodeCategory::CoreConcept);
        assert_eq!(node.style().size, 70);

        node.set_user_importance(3);
        assert_eq!(node.style().size, 85);

        node.set_user_significance(Some(Significance::Core));
        assert_eq!(node.style().fill, HIGHLIGHT_FILL);
    }

    #[test]
    fn node_detail_setters_accept_optional_strings() {
        let mut node = Node::new(nid("a"), "Alpha", NodeCategory::Other);
        node.set_user_notes(Some("applies to closed systems"));
        node.set_applicability_conditions(None::<String>);
        let mut tags = BTreeSet::new();
        tags.insert(TagId::new("tag_1").expect("tag id"));
        node.set_associated_tag_ids(tags);

        assert_eq!(node.user_notes(), Some("applies to closed systems"));
        assert_eq!(node.applicability_conditions(), None);
        assert_eq!(node.associated_tag_ids().len(), 1);

        node.set_position(Some(Position::new(10.0, -4.5)));
        assert_eq!(node.position().map(|p| p.x), Some(10.0));
    }

    #[test]
    fn edge_display_label_falls_back_to_the_relationship_name() {
        let id = EdgeId::new("a-b").expect("edge id");
        let mut edge = Edge::new(id, nid("a"), nid("b"), RelationshipType::Causal);
        assert_eq!(edge.display_label(), "causal");

        edge.set_label(Some("leads to"));
        assert_eq!(edge.display_label(), "leads to");
    }

    #[test]
    fn derived_edge_id_appends_a_suffix_for_parallel_edges() {
        let mut model = GraphModel::new();
        model.insert_node(Node::new(nid("a"), "Alpha", NodeCategory::Other));
        model.insert_node(Node::new(nid("b"), "Beta", NodeCategory::Other));

        let first = model.derived_edge_id(&nid("a"), &nid("b"));
        assert_eq!(first.as_str(), "a-b");
        model.push_edge(Edge::new(
            first,
            nid("a"),
            nid("b"),
            RelationshipType::GeneralAssociation,
        ));

        let second = model.derived_edge_id(&nid("a"), &nid("b"));
        assert_eq!(second.as_str(), "a-b#2");
        model.push_edge(Edge::new(
            second,
            nid("a"),
            nid("b"),
            RelationshipType::GeneralAssociation,
        ));

        let third = model.derived_edge_id(&nid("a"), &nid("b"));
        assert_eq!(third.as_str(), "a-b#3");
    }

    #[test]
    fn rev_bumps_by_one() {
        let mut model = GraphModel::new();
        assert_eq!(model.rev(), 0);
        model.bump_rev();
        model.bump_rev();
        assert_eq!(model.rev(), 2);
    }
}
