// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

// Shared deterministic benchmark fixtures (no RNG).

#![allow(dead_code)]

pub fn ascii_repeat_to_len(prefix: &str, fill: char, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len.max(prefix.len()));
    out.push_str(prefix);
    while out.len() < target_len {
        out.push(fill);
    }
    out
}

pub mod payload {
    use serde_json::{json, Value};

    use super::ascii_repeat_to_len;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Params {
        pub nodes: usize,
        pub edges_per_node: usize,
        pub label_len: usize,
    }

    impl Params {
        pub const fn new(nodes: usize, edges_per_node: usize, label_len: usize) -> Self {
            Self {
                nodes,
                edges_per_node,
                label_len,
            }
        }
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Case {
        Small,
        MediumDense,
        LargeLongLabels,
    }

    impl Case {
        pub const fn id(self) -> &'static str {
            match self {
                Self::Small => "small",
                Self::MediumDense => "medium_dense",
                Self::LargeLongLabels => "large_long_labels",
            }
        }

        pub const fn params(self) -> Params {
            match self {
                Self::Small => Params::new(40, 2, 12),
                Self::MediumDense => Params::new(400, 4, 12),
                Self::LargeLongLabels => Params::new(2000, 3, 64),
            }
        }
    }

    const CATEGORIES: [&str; 4] = ["core-concept", "primary-aspect", "related-detail", "other"];
    const RELATIONSHIPS: [&str; 5] = [
        "causal",
        "conditional",
        "hierarchical",
        "contrast",
        "general-association",
    ];

    fn node_id(idx: usize) -> String {
        format!("n{idx:05}")
    }

    /// Well-formed analysis export: every edge references nodes that exist and
    /// every enum field carries a recognized wire value, so normalization
    /// produces no diagnostics.
    pub fn clean(params: Params) -> Value {
        assert!(params.nodes >= 2, "nodes must be >= 2");

        let nodes: Vec<Value> = (0..params.nodes)
            .map(|idx| {
                let prefix = format!("concept_{idx:05}_");
                json!({
                    "id": node_id(idx),
                    "label": ascii_repeat_to_len(&prefix, 'x', params.label_len),
                    "category": CATEGORIES[idx % CATEGORIES.len()],
                    "userImportance": (idx % 4) as u64,
                })
            })
            .collect();

        let mut edges = Vec::with_capacity(params.nodes * params.edges_per_node);
        let mut next_edge = 0usize;
        for idx in 0..params.nodes {
            for k in 0..params.edges_per_node {
                let mut target = idx.wrapping_mul(7).wrapping_add(3 + k) % params.nodes;
                if target == idx {
                    target = (target + 1) % params.nodes;
                }
                edges.push(json!({
                    "id": format!("e{next_edge:06}"),
                    "source": node_id(idx),
                    "target": node_id(target),
                    "relationshipType": RELATIONSHIPS[(idx + k) % RELATIONSHIPS.len()],
                }));
                next_edge += 1;
            }
        }

        json!({ "nodes": nodes, "edges": edges })
    }

    /// The same export with recurring damage: unknown categories, edges whose
    /// target never existed, and one duplicated node id.
    pub fn dirty(params: Params) -> Value {
        let mut payload = clean(params);

        let nodes = payload["nodes"].as_array_mut().expect("nodes array");
        for (idx, node) in nodes.iter_mut().enumerate() {
            if idx % 7 == 0 {
                node["category"] = json!("mystery");
            }
        }
        if let Some(first) = nodes.first().cloned() {
            nodes.push(first);
        }

        let edges = payload["edges"].as_array_mut().expect("edges array");
        for (idx, edge) in edges.iter_mut().enumerate() {
            if idx % 11 == 0 {
                edge["target"] = json!("ghost");
            }
        }

        payload
    }

    pub fn entity_count(payload: &Value) -> u64 {
        let nodes = payload["nodes"].as_array().map_or(0, Vec::len);
        let edges = payload["edges"].as_array().map_or(0, Vec::len);
        (nodes + edges) as u64
    }

    pub fn fixture(case: Case) -> Value {
        clean(case.params())
    }
}

pub mod graph {
    use noema::model::GraphModel;
    use noema::normalize::normalize;

    use super::payload;

    /// Normalized model for the mutation benches.
    pub fn fixture(case: payload::Case) -> GraphModel {
        let value = payload::fixture(case);
        let (model, diagnostics) = normalize(&value);
        assert!(
            diagnostics.is_empty(),
            "clean payload normalized with diagnostics: {diagnostics:?}"
        );
        model
    }
}
