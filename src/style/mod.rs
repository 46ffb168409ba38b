// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{NodeCategory, RelationshipType, Significance};

/// Size added per point of user importance.
pub const SIZE_STEP: u32 = 5;

/// Fill used when the user marks a node as core, regardless of category.
pub const HIGHLIGHT_FILL: &str = "#FFD700";

pub const NODE_LINE_WIDTH: u32 = 2;
pub const NODE_FILL_OPACITY: f32 = 0.9;

/// Node label font scales with node size but never drops below this.
pub const MIN_LABEL_FONT_SIZE: u32 = 12;
pub const NODE_LABEL_FILL: &str = "#000";
pub const NODE_LABEL_POSITION: &str = "bottom";
pub const NODE_LABEL_OFFSET: u32 = 5;

pub const EDGE_LINE_WIDTH: u32 = 2;
pub const EDGE_LABEL_FILL: &str = "#666";
pub const EDGE_LABEL_FONT_SIZE: u32 = 11;

/// Closed triangle arrowhead, drawn at the target end.
pub const ARROW_PATH: &str = "M 0,0 L 8,4 L 8,-4 Z";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLabelStyle {
    pub font_size: u32,
    pub fill: &'static str,
    pub position: &'static str,
    pub offset: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeStyle {
    pub size: u32,
    pub fill: &'static str,
    pub stroke: &'static str,
    pub line_width: u32,
    pub fill_opacity: f32,
    pub label: NodeLabelStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowStyle {
    pub path: &'static str,
    pub fill: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeLabelStyle {
    pub fill: &'static str,
    pub font_size: u32,
    pub auto_rotate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeStyle {
    pub stroke: &'static str,
    pub line_width: u32,
    pub line_dash: Option<[u32; 2]>,
    pub end_arrow: ArrowStyle,
    pub label: EdgeLabelStyle,
}

pub fn base_size(category: NodeCategory) -> u32 {
    match category {
        NodeCategory::CoreConcept => 70,
        NodeCategory::PrimaryAspect => 55,
        NodeCategory::RelatedDetail => 40,
        NodeCategory::Other => 30,
    }
}

pub fn base_fill(category: NodeCategory) -> &'static str {
    match category {
        NodeCategory::CoreConcept => "#1890ff",
        NodeCategory::PrimaryAspect => "#52c41a",
        NodeCategory::RelatedDetail => "#faad14",
        NodeCategory::Other => "#bfbfbf",
    }
}

fn relationship_stroke(relationship: RelationshipType) -> &'static str {
    match relationship {
        RelationshipType::Causal => "#E91E63",
        RelationshipType::Conditional => "#FF9800",
        RelationshipType::Hierarchical => "#2196F3",
        RelationshipType::Contrast => "#9C27B0",
        RelationshipType::Parallel => "#4CAF50",
        RelationshipType::Explanatory => "#00BCD4",
        RelationshipType::Instrumental => "#8BC34A",
        RelationshipType::Temporal => "#FFC107",
        RelationshipType::Dependency => "#CDDC39",
        RelationshipType::GeneralAssociation => "#9E9E9E",
    }
}

fn relationship_dash(relationship: RelationshipType) -> Option<[u32; 2]> {
    match relationship {
        RelationshipType::Contrast => Some([5, 5]),
        RelationshipType::Parallel => Some([2, 2]),
        RelationshipType::GeneralAssociation => Some([10, 5]),
        _ => None,
    }
}

/// Derives the full visual style of a node from its semantic fields.
///
/// Size grows linearly with importance from the category's base size. A
/// significance of [`Significance::Core`] wins over the category fill.
pub fn node_style(
    category: NodeCategory,
    user_importance: u32,
    user_significance: Option<Significance>,
) -> NodeStyle {
    let size = base_size(category).saturating_add(user_importance.saturating_mul(SIZE_STEP));
    let fill = if user_significance == Some(Significance::Core) {
        HIGHLIGHT_FILL
    } else {
        base_fill(category)
    };

    NodeStyle {
        size,
        fill,
        stroke: fill,
        line_width: NODE_LINE_WIDTH,
        fill_opacity: NODE_FILL_OPACITY,
        label: NodeLabelStyle {
            font_size: (size / 5).max(MIN_LABEL_FONT_SIZE),
            fill: NODE_LABEL_FILL,
            position: NODE_LABEL_POSITION,
            offset: NODE_LABEL_OFFSET,
        },
    }
}

/// Derives the stroke, dash pattern, and arrowhead of an edge. Total over
/// [`RelationshipType`], so styling can never fail.
pub fn edge_style(relationship: RelationshipType) -> EdgeStyle {
    let stroke = relationship_stroke(relationship);
    EdgeStyle {
        stroke,
        line_width: EDGE_LINE_WIDTH,
        line_dash: relationship_dash(relationship),
        end_arrow: ArrowStyle {
            path: ARROW_PATH,
            fill: stroke,
        },
        label: EdgeLabelStyle {
            fill: EDGE_LABEL_FILL,
            font_size: EDGE_LABEL_FONT_SIZE,
            auto_rotate: true,
        },
    }
}
