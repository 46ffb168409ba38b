// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

/// Structural role the analysis service assigned to a node.
///
/// Wire values: `core-concept`, `primary-aspect`, `related-detail`, `other`.
/// Unrecognized wire values coerce to [`NodeCategory::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum NodeCategory {
    CoreConcept,
    PrimaryAspect,
    RelatedDetail,
    #[default]
    Other,
}

impl NodeCategory {
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "core-concept" => Some(Self::CoreConcept),
            "primary-aspect" => Some(Self::PrimaryAspect),
            "related-detail" => Some(Self::RelatedDetail),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::CoreConcept => "core-concept",
            Self::PrimaryAspect => "primary-aspect",
            Self::RelatedDetail => "related-detail",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for NodeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// Semantic kind of a directed edge.
///
/// Unrecognized wire values coerce to [`RelationshipType::GeneralAssociation`],
/// which doubles as the fallback stroke style. This keeps edge styling total:
/// an unknown type renders, it never errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum RelationshipType {
    Causal,
    Conditional,
    Hierarchical,
    Contrast,
    Parallel,
    Explanatory,
    Instrumental,
    Temporal,
    Dependency,
    #[default]
    GeneralAssociation,
}

impl RelationshipType {
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "causal" => Some(Self::Causal),
            "conditional" => Some(Self::Conditional),
            "hierarchical" => Some(Self::Hierarchical),
            "contrast" => Some(Self::Contrast),
            "parallel" => Some(Self::Parallel),
            "explanatory" => Some(Self::Explanatory),
            "instrumental" => Some(Self::Instrumental),
            "temporal" => Some(Self::Temporal),
            "dependency" => Some(Self::Dependency),
            "general-association" => Some(Self::GeneralAssociation),
            _ => None,
        }
    }

    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Causal => "causal",
            Self::Conditional => "conditional",
            Self::Hierarchical => "hierarchical",
            Self::Contrast => "contrast",
            Self::Parallel => "parallel",
            Self::Explanatory => "explanatory",
            Self::Instrumental => "instrumental",
            Self::Temporal => "temporal",
            Self::Dependency => "dependency",
            Self::GeneralAssociation => "general-association",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

/// User-assigned weight of a node, set from the detail editor.
///
/// `Core` overrides the category fill with the highlight color. There is no
/// default: an absent significance means the user has not weighed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Significance {
    Core,
    Important,
    Related,
    Pending,
}

impl Significance {
    pub fn from_wire(value: &str) -> Option<Self> {
        match value {
            "core" => Some(Self::Core),
            "important" => Some(Self::Important),
            "related" => Some(Self::Related),
            "pending" => Some(Self::Pending),
            _ => None,
        }
    }

    pub const fn as_wire_str(self) -> &'static str {
        match self {
            Self::Core => "core",
            Self::Important => "important",
            Self::Related => "related",
            Self::Pending => "pending",
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{NodeCategory, RelationshipType, Significance};

    #[test]
    fn category_wire_names_round_trip() {
        for category in [
            NodeCategory::CoreConcept,
            NodeCategory::PrimaryAspect,
            NodeCategory::RelatedDetail,
            NodeCategory::Other,
        ] {
            assert_eq!(NodeCategory::from_wire(category.as_wire_str()), Some(category));
        }
    }

    #[test]
    fn unknown_category_is_not_parsed() {
        assert_eq!(NodeCategory::from_wire("anchor"), None);
        assert_eq!(NodeCategory::default(), NodeCategory::Other);
    }

    #[test]
    fn relationship_wire_names_round_trip() {
        for relationship in [
            RelationshipType::Causal,
            RelationshipType::Conditional,
            RelationshipType::Hierarchical,
            RelationshipType::Contrast,
            RelationshipType::Parallel,
            RelationshipType::Explanatory,
            RelationshipType::Instrumental,
            RelationshipType::Temporal,
            RelationshipType::Dependency,
            RelationshipType::GeneralAssociation,
        ] {
            assert_eq!(
                RelationshipType::from_wire(relationship.as_wire_str()),
                Some(relationship)
            );
        }
    }

    #[test]
    fn unknown_relationship_is_not_parsed() {
        assert_eq!(RelationshipType::from_wire("entails"), None);
        assert_eq!(
            RelationshipType::default(),
            RelationshipType::GeneralAssociation
        );
    }

    #[test]
    fn significance_wire_names_round_trip() {
        for significance in [
            Significance::Core,
            Significance::Important,
            Significance::Related,
            Significance::Pending,
        ] {
            assert_eq!(
                Significance::from_wire(significance.as_wire_str()),
                Some(significance)
            );
        }
    }
}
