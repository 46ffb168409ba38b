// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Node/edge mutation implementation used by `apply_ops`.
/// Keeps `ops::mod` focused on public op types and orchestration.
fn apply_op(
    model: &mut GraphModel,
    op: &GraphOp,
    delta: &mut DeltaBuilder,
) -> Result<(), ApplyError> {
    match op {
        GraphOp::AddNode {
            node_id,
            label,
            category,
        } => {
            if model.node(node_id).is_some() {
                return Err(ApplyError::NodeExists {
                    node_id: node_id.clone(),
                });
            }
            model.insert_node(Node::new(
                node_id.clone(),
                label.clone(),
                category.unwrap_or_default(),
            ));
            delta.record_added(EntityRef::Node(node_id.clone()));
            Ok(())
        }
        GraphOp::UpdateNode { node_id, patch } => {
            let Some(existing) = model.node_mut(node_id) else {
                return Err(ApplyError::NodeNotFound {
                    node_id: node_id.clone(),
                });
            };

            if let Some(label) = &patch.label {
                existing.set_label(label.clone());
            }
            if let Some(category) = patch.category {
                existing.set_category(category);
            }
            if let Some(user_importance) = patch.user_importance {
                existing.set_user_importance(user_importance);
            }
            if let Some(position) = patch.position {
                existing.set_position(Some(position));
            }
            delta.record_updated(EntityRef::Node(node_id.clone()));
            Ok(())
        }
        GraphOp::SetNodeDetails { node_id, details } => {
            let Some(existing) = model.node_mut(node_id) else {
                return Err(ApplyError::NodeNotFound {
                    node_id: node_id.clone(),
                });
            };

            existing.set_user_notes(details.user_notes.clone());
            existing.set_applicability_conditions(details.applicability_conditions.clone());
            existing.set_user_significance(details.user_significance);
            existing.set_associated_tag_ids(details.associated_tag_ids.clone());
            delta.record_updated(EntityRef::Node(node_id.clone()));
            Ok(())
        }
        GraphOp::RemoveNode { node_id } => {
            if model.remove_node(node_id).is_none() {
                return Err(ApplyError::NodeNotFound {
                    node_id: node_id.clone(),
                });
            }
            let removed_edge_ids = model
                .edges()
                .iter()
                .filter(|edge| edge.source() == node_id || edge.target() == node_id)
                .map(|edge| edge.id().clone())
                .collect::<Vec<_>>();
            model
                .edges_mut()
                .retain(|edge| edge.source() != node_id && edge.target() != node_id);
            for edge_id in removed_edge_ids {
                delta.record_removed(EntityRef::Edge(edge_id));
            }
            delta.record_removed(EntityRef::Node(node_id.clone()));
            Ok(())
        }
        GraphOp::AddEdge {
            edge_id,
            source,
            target,
            relationship,
            label,
        } => {
            if model.contains_edge_id(edge_id) {
                return Err(ApplyError::EdgeExists {
                    edge_id: edge_id.clone(),
                });
            }
            if model.node(source).is_none() {
                return Err(ApplyError::MissingEndpoint {
                    node_id: source.clone(),
                });
            }
            if model.node(target).is_none() {
                return Err(ApplyError::MissingEndpoint {
                    node_id: target.clone(),
                });
            }
            let mut edge = Edge::new(
                edge_id.clone(),
                source.clone(),
                target.clone(),
                relationship.unwrap_or_default(),
            );
            edge.set_label(label.clone());
            model.push_edge(edge);
            delta.record_added(EntityRef::Edge(edge_id.clone()));
            Ok(())
        }
        GraphOp::UpdateEdge { edge_id, patch } => {
            if !model.contains_edge_id(edge_id) {
                return Err(ApplyError::EdgeNotFound {
                    edge_id: edge_id.clone(),
                });
            }
            if let Some(source) = &patch.source {
                if model.node(source).is_none() {
                    return Err(ApplyError::MissingEndpoint {
                        node_id: source.clone(),
                    });
                }
            }
            if let Some(target) = &patch.target {
                if model.node(target).is_none() {
                    return Err(ApplyError::MissingEndpoint {
                        node_id: target.clone(),
                    });
                }
            }

            let existing = model
                .edge_mut(edge_id)
                .expect("edge existence checked above");
            if let Some(source) = &patch.source {
                existing.set_source(source.clone());
            }
            if let Some(target) = &patch.target {
                existing.set_target(target.clone());
            }
            if let Some(relationship) = patch.relationship {
                existing.set_relationship(relationship);
            }
            if let Some(label) = &patch.label {
                existing.set_label(Some(label.clone()));
            }
            delta.record_updated(EntityRef::Edge(edge_id.clone()));
            Ok(())
        }
        GraphOp::RemoveEdge { edge_id } => {
            if model.remove_edge(edge_id).is_none() {
                return Err(ApplyError::EdgeNotFound {
                    edge_id: edge_id.clone(),
                });
            }
            delta.record_removed(EntityRef::Edge(edge_id.clone()));
            Ok(())
        }
    }
}
