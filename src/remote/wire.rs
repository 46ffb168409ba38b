// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Wire DTOs for the analysis and graph-storage service.
//!
//! The service speaks camelCase JSON. Graph-bearing responses are NOT typed
//! here: they arrive as raw [`serde_json::Value`] and go through
//! [`crate::normalize`], which is the only place untrusted graph data is
//! interpreted. List responses are typed with lenient defaults.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::model::{Edge, GraphModel, Node};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub text: String,
    pub include_details: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetGraphRequest {
    pub graph_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGraphRequest {
    pub graph_id: String,
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
}

/// Full detail block for one node. Every detail field is always sent; a
/// `null` clears the stored value, mirroring the detail editor which submits
/// the whole form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNodeDetailsRequest {
    pub graph_id: String,
    pub node_id: String,
    pub user_notes: Option<String>,
    pub applicability_conditions: Option<String>,
    pub user_significance: Option<String>,
    pub associated_tag_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveTextRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTextRequest {
    pub text_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateKnowledgeSystemRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignGraphToSystemRequest {
    pub graph_id: String,
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListGraphsBySystemRequest {
    pub system_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SavedText {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GraphSummary {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub source_text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KnowledgeSystem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Persistable projection of one node: semantic and user fields only, no
/// derived style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WireNode {
    pub id: String,
    pub label: String,
    pub category: String,
    #[serde(default)]
    pub user_importance: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_significance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applicability_conditions: Option<String>,
    #[serde(default)]
    pub associated_tag_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

/// Persistable projection of one edge. The label is the explicit label only;
/// the relationship-name fallback is derived and stays out of storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WireEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relationship_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GraphSnapshot {
    pub nodes: Vec<WireNode>,
    pub edges: Vec<WireEdge>,
}

impl From<&Node> for WireNode {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id().to_string(),
            label: node.label().to_owned(),
            category: node.category().as_wire_str().to_owned(),
            user_importance: node.user_importance(),
            user_significance: node
                .user_significance()
                .map(|significance| significance.as_wire_str().to_owned()),
            user_notes: node.user_notes().map(str::to_owned),
            applicability_conditions: node.applicability_conditions().map(str::to_owned),
            associated_tag_ids: node
                .associated_tag_ids()
                .iter()
                .map(ToString::to_string)
                .collect(),
            x: node.position().map(|position| position.x),
            y: node.position().map(|position| position.y),
        }
    }
}

impl From<&Edge> for WireEdge {
    fn from(edge: &Edge) -> Self {
        Self {
            id: edge.id().to_string(),
            source: edge.source().to_string(),
            target: edge.target().to_string(),
            relationship_type: edge.relationship().as_wire_str().to_owned(),
            label: edge.label().map(str::to_owned),
        }
    }
}

impl GraphSnapshot {
    pub fn from_model(model: &GraphModel) -> Self {
        Self {
            nodes: model.nodes().values().map(WireNode::from).collect(),
            edges: model.edges().iter().map(WireEdge::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::GraphSnapshot;
    use crate::model::fixtures::graph_with_user_detail;

    #[test]
    fn snapshot_carries_semantic_fields_and_no_style() {
        let model = graph_with_user_detail();
        let snapshot = GraphSnapshot::from_model(&model);

        assert_eq!(snapshot.nodes.len(), 4);
        assert_eq!(snapshot.edges.len(), 4);

        let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
        let nodes = json["nodes"].as_array().expect("nodes array");
        let detailed = nodes
            .iter()
            .find(|n| n["id"] == "a")
            .expect("detailed node");
        assert_eq!(detailed["label"], "Quantum computing");
        assert_eq!(detailed["category"], "core-concept");
        assert_eq!(detailed["userImportance"], 2);
        assert_eq!(detailed["userSignificance"], "core");
        assert_eq!(detailed["associatedTagIds"][0], "tag_1");
        assert!(detailed.get("size").is_none());
        assert!(detailed.get("style").is_none());

        let plain = nodes.iter().find(|n| n["id"] == "b").expect("plain node");
        assert!(plain.get("userSignificance").is_none());
        assert!(plain.get("x").is_none());
    }

    #[test]
    fn snapshot_edges_keep_explicit_labels_only() {
        let model = graph_with_user_detail();
        let snapshot = GraphSnapshot::from_model(&model);

        let json = serde_json::to_value(&snapshot).expect("snapshot serializes");
        let edge = &json["edges"][0];
        assert_eq!(edge["relationshipType"], "hierarchical");
        assert!(edge.get("label").is_none());
        assert!(edge.get("style").is_none());
    }
}
