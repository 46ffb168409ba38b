// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Tolerant decode of untrusted graph payloads.
//!
//! The analysis service and graph storage both return JSON shaped like
//! `{ "nodes": [...], "edges": [...] }`, but neither is trusted to get every
//! field right. Normalization is per-entity all-or-nothing and per-payload
//! best-effort: an entity missing a required field is excluded with a
//! [`Diagnostic`], an entity with a broken optional field is kept with the
//! default and a [`Diagnostic`], and everything that survives is styled and
//! endpoint-checked. Nothing is dropped silently.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::model::{
    Edge, EdgeId, GraphModel, IdError, Node, NodeCategory, NodeId, Position, RelationshipType,
    Significance, TagId,
};


type JsonMap = serde_json::Map<String, Value>;

/// Why a whole node or edge was excluded from the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExcludeReason {
    NotAnObject,
    MissingField { field: &'static str },
    InvalidField { field: &'static str },
    InvalidId { field: &'static str, source: IdError },
}

impl std::fmt::Display for ExcludeReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotAnObject => f.write_str("not an object"),
            Self::MissingField { field } => {
                write!(f, "missing required field (field={field})")
            }
            Self::InvalidField { field } => {
                write!(f, "required field has the wrong type (field={field})")
            }
            Self::InvalidId { field, source } => {
                write!(f, "not a valid id (field={field}): {source}")
            }
        }
    }
}

/// One observation made while normalizing a payload.
///
/// Diagnostics are reports, not errors: a payload that produces only
/// diagnostics still normalized successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    NodesMissing,
    EdgesMissing,
    NodeExcluded {
        index: usize,
        reason: ExcludeReason,
    },
    EdgeExcluded {
        index: usize,
        reason: ExcludeReason,
    },
    NodeFieldDefaulted {
        node_id: NodeId,
        field: &'static str,
        value: String,
    },
    EdgeFieldDefaulted {
        edge_id: EdgeId,
        field: &'static str,
        value: String,
    },
    DuplicateNode {
        node_id: NodeId,
    },
    DuplicateEdge {
        edge_id: EdgeId,
    },
    DanglingEdge {
        edge_id: EdgeId,
        endpoint: NodeId,
    },
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NodesMissing => f.write_str("payload has no nodes array"),
            Self::EdgesMissing => f.write_str("payload has no edges array"),
            Self::NodeExcluded { index, reason } => {
                write!(f, "node at index {index} excluded: {reason}")
            }
            Self::EdgeExcluded { index, reason } => {
                write!(f, "edge at index {index} excluded: {reason}")
            }
            Self::NodeFieldDefaulted {
                node_id,
                field,
                value,
            } => {
                write!(
                    f,
                    "node '{node_id}': unusable value '{value}' (field={field}), using default"
                )
            }
            Self::EdgeFieldDefaulted {
                edge_id,
                field,
                value,
            } => {
                write!(
                    f,
                    "edge '{edge_id}': unusable value '{value}' (field={field}), using default"
                )
            }
            Self::DuplicateNode { node_id } => {
                write!(f, "duplicate node id '{node_id}': first occurrence wins")
            }
            Self::DuplicateEdge { edge_id } => {
                write!(f, "duplicate edge id '{edge_id}': edge dropped")
            }
            Self::DanglingEdge { edge_id, endpoint } => {
                write!(f, "edge '{edge_id}' references missing node '{endpoint}'")
            }
        }
    }
}

/// Normalizes an untrusted payload into a styled, endpoint-consistent
/// [`GraphModel`] plus the diagnostics collected along the way.
///
/// Nodes are processed first so the edge pass can check endpoints against the
/// finished node set. Edge order in the result matches payload order.
pub fn normalize(payload: &Value) -> (GraphModel, Vec<Diagnostic>) {
    let mut model = GraphModel::new();
    let mut diagnostics = Vec::new();

    match payload.get("nodes").and_then(Value::as_array) {
        Some(nodes) => {
            for (index, raw) in nodes.iter().enumerate() {
                match build_node(raw, &mut diagnostics) {
                    Ok(node) => {
                        if model.node(node.id()).is_some() {
                            diagnostics.push(Diagnostic::DuplicateNode {
                                node_id: node.id().clone(),
                            });
                        } else {
                            model.insert_node(node);
                        }
                    }
                    Err(reason) => diagnostics.push(Diagnostic::NodeExcluded { index, reason }),
                }
            }
        }
        None => diagnostics.push(Diagnostic::NodesMissing),
    }

    match payload.get("edges").and_then(Value::as_array) {
        Some(edges) => {
            for (index, raw) in edges.iter().enumerate() {
                match build_edge(raw, &model, &mut diagnostics) {
                    Ok(Some(edge)) => model.push_edge(edge),
                    Ok(None) => {}
                    Err(reason) => diagnostics.push(Diagnostic::EdgeExcluded { index, reason }),
                }
            }
        }
        None => diagnostics.push(Diagnostic::EdgesMissing),
    }

    (model, diagnostics)
}

fn build_node(raw: &Value, diagnostics: &mut Vec<Diagnostic>) -> Result<Node, ExcludeReason> {
    let object = raw.as_object().ok_or(ExcludeReason::NotAnObject)?;

    let id = NodeId::new(required_str(object, "id")?).map_err(|source| {
        ExcludeReason::InvalidId {
            field: "id",
            source,
        }
    })?;
    let label = required_str(object, "label")?.to_owned();

    let category = match object.get("category") {
        None | Some(Value::Null) => NodeCategory::default(),
        Some(Value::String(value)) => match NodeCategory::from_wire(value) {
            Some(category) => category,
            None => {
                push_node_default(diagnostics, &id, "category", value.clone());
                NodeCategory::default()
            }
        },
        Some(other) => {
            push_node_default(diagnostics, &id, "category", render_raw(other));
            NodeCategory::default()
        }
    };

    let user_importance = match object.get("userImportance") {
        None | Some(Value::Null) => 0,
        Some(value) => match value.as_u64() {
            Some(n) => u32::try_from(n).unwrap_or(u32::MAX),
            None => {
                push_node_default(diagnostics, &id, "userImportance", render_raw(value));
                0
            }
        },
    };

    let user_significance = match object.get("userSignificance") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => match Significance::from_wire(value) {
            Some(significance) => Some(significance),
            None => {
                push_node_default(diagnostics, &id, "userSignificance", value.clone());
                None
            }
        },
        Some(other) => {
            push_node_default(diagnostics, &id, "userSignificance", render_raw(other));
            None
        }
    };

    let user_notes = optional_node_str(object, "userNotes", &id, diagnostics);
    let applicability_conditions =
        optional_node_str(object, "applicabilityConditions", &id, diagnostics);

    let mut associated_tag_ids = BTreeSet::new();
    match object.get("associatedTagIds") {
        None | Some(Value::Null) => {}
        Some(Value::Array(items)) => {
            for item in items {
                match item.as_str().map(TagId::new) {
                    Some(Ok(tag_id)) => {
                        associated_tag_ids.insert(tag_id);
                    }
                    _ => push_node_default(diagnostics, &id, "associatedTagIds", render_raw(item)),
                }
            }
        }
        Some(other) => push_node_default(diagnostics, &id, "associatedTagIds", render_raw(other)),
    }

    let position = match (object.get("x"), object.get("y")) {
        (None, None) => None,
        (x, y) => match (x.and_then(Value::as_f64), y.and_then(Value::as_f64)) {
            (Some(x), Some(y)) => Some(Position::new(x, y)),
            _ => {
                push_node_default(diagnostics, &id, "position", render_position(x, y));
                None
            }
        },
    };

    let mut node = Node::new(id, label, category);
    node.set_user_importance(user_importance);
    node.set_user_significance(user_significance);
    node.set_user_notes(user_notes);
    node.set_applicability_conditions(applicability_conditions);
    node.set_associated_tag_ids(associated_tag_ids);
    node.set_position(position);
    Ok(node)
}

fn build_edge(
    raw: &Value,
    model: &GraphModel,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Option<Edge>, ExcludeReason> {
    let object = raw.as_object().ok_or(ExcludeReason::NotAnObject)?;

    let source = NodeId::new(required_str(object, "source")?).map_err(|source| {
        ExcludeReason::InvalidId {
            field: "source",
            source,
        }
    })?;
    let target = NodeId::new(required_str(object, "target")?).map_err(|source| {
        ExcludeReason::InvalidId {
            field: "target",
            source,
        }
    })?;

    // Endpoint check comes before id assignment so a dropped edge never
    // claims a `#<n>` suffix slot.
    let missing = if model.node(&source).is_none() {
        Some(source.clone())
    } else if model.node(&target).is_none() {
        Some(target.clone())
    } else {
        None
    };
    if let Some(endpoint) = missing {
        diagnostics.push(Diagnostic::DanglingEdge {
            edge_id: labeled_edge_id(object, &source, &target),
            endpoint,
        });
        return Ok(None);
    }

    let id = match object.get("id") {
        None | Some(Value::Null) => model.derived_edge_id(&source, &target),
        Some(Value::String(value)) => match EdgeId::new(value.clone()) {
            Ok(id) => {
                if model.contains_edge_id(&id) {
                    diagnostics.push(Diagnostic::DuplicateEdge { edge_id: id });
                    return Ok(None);
                }
                id
            }
            Err(_) => {
                let derived = model.derived_edge_id(&source, &target);
                push_edge_default(diagnostics, &derived, "id", value.clone());
                derived
            }
        },
        Some(other) => {
            let derived = model.derived_edge_id(&source, &target);
            push_edge_default(diagnostics, &derived, "id", render_raw(other));
            derived
        }
    };

    let relationship = match object.get("relationshipType") {
        None | Some(Value::Null) => RelationshipType::default(),
        Some(Value::String(value)) => match RelationshipType::from_wire(value) {
            Some(relationship) => relationship,
            None => {
                push_edge_default(diagnostics, &id, "relationshipType", value.clone());
                RelationshipType::default()
            }
        },
        Some(other) => {
            push_edge_default(diagnostics, &id, "relationshipType", render_raw(other));
            RelationshipType::default()
        }
    };

    let label = match object.get("label") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            push_edge_default(diagnostics, &id, "label", render_raw(other));
            None
        }
    };

    let mut edge = Edge::new(id, source, target, relationship);
    edge.set_label(label);
    Ok(Some(edge))
}

fn required_str<'a>(object: &'a JsonMap, field: &'static str) -> Result<&'a str, ExcludeReason> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ExcludeReason::MissingField { field }),
        Some(Value::String(value)) => Ok(value),
        Some(_) => Err(ExcludeReason::InvalidField { field }),
    }
}

fn optional_node_str(
    object: &JsonMap,
    field: &'static str,
    node_id: &NodeId,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<String> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => Some(value.clone()),
        Some(other) => {
            push_node_default(diagnostics, node_id, field, render_raw(other));
            None
        }
    }
}

/// Id to report for an edge that never makes it into the model: the explicit
/// id when it is usable, otherwise the plain `<source>-<target>` form.
fn labeled_edge_id(object: &JsonMap, source: &NodeId, target: &NodeId) -> EdgeId {
    if let Some(Value::String(value)) = object.get("id") {
        if let Ok(id) = EdgeId::new(value.clone()) {
            return id;
        }
    }
    EdgeId::new(format!("{source}-{target}")).expect("joined ids form a valid id segment")
}

fn push_node_default(
    diagnostics: &mut Vec<Diagnostic>,
    node_id: &NodeId,
    field: &'static str,
    value: String,
) {
    diagnostics.push(Diagnostic::NodeFieldDefaulted {
        node_id: node_id.clone(),
        field,
        value,
    });
}

fn push_edge_default(
    diagnostics: &mut Vec<Diagnostic>,
    edge_id: &EdgeId,
    field: &'static str,
    value: String,
) {
    diagnostics.push(Diagnostic::EdgeFieldDefaulted {
        edge_id: edge_id.clone(),
        field,
        value,
    });
}

fn render_raw(value: &Value) -> String {
    match value {
        Value::String(value) => value.clone(),
        other => other.to_string(),
    }
}

fn render_position(x: Option<&Value>, y: Option<&Value>) -> String {
    let x = x.map(render_raw).unwrap_or_else(|| "null".to_owned());
    let y = y.map(render_raw).unwrap_or_else(|| "null".to_owned());
    format!("({x}, {y})")
}
