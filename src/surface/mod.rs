// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Boundary types for the rendering and interaction engine.
//!
//! The engine receives a normalized graph plus a [`LayoutConfig`] and reports user
//! interaction back as [`SurfaceEvent`]s, which the session translates into its own
//! operations. Layout configs serialize with the engine's camelCase parameter names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{EdgeId, NodeId};

/// Layout parameter sets handed to the engine.
///
/// The numbers are the tuned values the host product ships with; the constructors are the
/// supported way to obtain them. Field meanings belong to the engine and are not
/// interpreted here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum LayoutConfig {
    #[serde(rename_all = "camelCase")]
    Force {
        link_distance: u32,
        node_strength: i32,
        edge_strength: f64,
        collide_strength: f64,
        prevent_overlap: bool,
        node_size: u32,
    },
    #[serde(rename_all = "camelCase")]
    Radial {
        unit_radius: u32,
        link_distance: u32,
        prevent_overlap: bool,
        node_size: u32,
        strict_radial: bool,
    },
    #[serde(rename_all = "camelCase")]
    Circular {
        radius: u32,
        divisions: u32,
        ordering: CircularOrdering,
    },
    #[serde(rename = "dagre", rename_all = "camelCase")]
    Hierarchical {
        rankdir: RankDirection,
        nodesep: u32,
        ranksep: u32,
        control_points: bool,
    },
}

impl LayoutConfig {
    /// Force-directed layout, the default view.
    pub fn force() -> Self {
        LayoutConfig::Force {
            link_distance: 150,
            node_strength: -30,
            edge_strength: 0.1,
            collide_strength: 0.8,
            prevent_overlap: true,
            node_size: 60,
        }
    }

    pub fn radial() -> Self {
        LayoutConfig::Radial {
            unit_radius: 120,
            link_distance: 150,
            prevent_overlap: true,
            node_size: 60,
            strict_radial: false,
        }
    }

    pub fn circular() -> Self {
        LayoutConfig::Circular {
            radius: 300,
            divisions: 5,
            ordering: CircularOrdering::Degree,
        }
    }

    /// Top-to-bottom layered layout.
    pub fn hierarchical() -> Self {
        LayoutConfig::Hierarchical {
            rankdir: RankDirection::Tb,
            nodesep: 40,
            ranksep: 100,
            control_points: true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::force()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CircularOrdering {
    Degree,
    Topology,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankDirection {
    Tb,
    Bt,
    Lr,
    Rl,
}

/// User interaction reported back by the engine.
///
/// `GraphChanged` carries the engine's own export of its current data; the payload is
/// untrusted and goes through normalization before it replaces the session's model.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    NodeClicked { node_id: NodeId },
    EdgeClicked { edge_id: EdgeId },
    CanvasClicked,
    GraphChanged { payload: Value },
}
