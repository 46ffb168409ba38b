// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Noema-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Noema and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Read-only queries over a graph model.
//!
//! Queries provide the derived views behind node focus and search: degree counts,
//! one-hop neighborhoods, and label search in substring, regex, and fuzzy-ranked flavors.

use std::collections::{BTreeMap, BTreeSet};

use regex::RegexBuilder;

use crate::model::{GraphModel, Node, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NodeDegree {
    pub in_degree: u64,
    pub out_degree: u64,
}

/// Degree counts for every node; isolated nodes report zeros.
pub fn degrees(model: &GraphModel) -> BTreeMap<NodeId, NodeDegree> {
    let mut degrees: BTreeMap<NodeId, NodeDegree> = BTreeMap::new();
    for node_id in model.nodes().keys() {
        degrees.entry(node_id.clone()).or_default();
    }

    for edge in model.edges() {
        let source_degree = degrees.entry(edge.source().clone()).or_default();
        source_degree.out_degree = source_degree.out_degree.saturating_add(1);

        let target_degree = degrees.entry(edge.target().clone()).or_default();
        target_degree.in_degree = target_degree.in_degree.saturating_add(1);
    }

    degrees
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    In,
    Out,
    Both,
}

/// Distinct nodes one edge away from `node_id` in the given direction, in id order.
/// An unknown id has no neighbors; a self-loop reports the node itself.
pub fn neighbors<'a>(
    model: &'a GraphModel,
    node_id: &NodeId,
    direction: Direction,
) -> Vec<&'a Node> {
    let follow_out = matches!(direction, Direction::Out | Direction::Both);
    let follow_in = matches!(direction, Direction::In | Direction::Both);

    let mut ids: BTreeSet<&NodeId> = BTreeSet::new();
    for edge in model.edges() {
        if follow_out && edge.source() == node_id {
            ids.insert(edge.target());
        }
        if follow_in && edge.target() == node_id {
            ids.insert(edge.source());
        }
    }

    ids.into_iter().filter_map(|id| model.node(id)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Substring,
    Regex,
}

/// Nodes whose label matches `needle`, in id order.
///
/// `Substring` cannot fail; `Regex` surfaces the pattern's compile error.
pub fn label_search<'a>(
    model: &'a GraphModel,
    needle: &str,
    mode: SearchMode,
    case_insensitive: bool,
) -> Result<Vec<&'a Node>, regex::Error> {
    match mode {
        SearchMode::Substring => {
            let needle = if case_insensitive {
                needle.to_lowercase()
            } else {
                needle.to_owned()
            };
            Ok(model
                .nodes()
                .values()
                .filter(|node| {
                    if case_insensitive {
                        node.label().to_lowercase().contains(&needle)
                    } else {
                        node.label().contains(&needle)
                    }
                })
                .collect())
        }
        SearchMode::Regex => {
            let pattern = RegexBuilder::new(needle)
                .case_insensitive(case_insensitive)
                .build()?;
            Ok(model
                .nodes()
                .values()
                .filter(|node| pattern.is_match(node.label()))
                .collect())
        }
    }
}

/// Labels ranked by fuzzy similarity to `needle`, best first, at most `limit` entries.
///
/// A node ranks only when every needle character appears in order within its label
/// (case-folded). The rank blends the rapidfuzz ratio with subsequence tightness, so a
/// compact match near the start of a label beats the same characters scattered across a
/// longer one. Ties break on label, then id.
pub fn fuzzy_find<'a>(model: &'a GraphModel, needle: &str, limit: usize) -> Vec<&'a Node> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(i64, &Node)> = model
        .nodes()
        .values()
        .filter_map(|node| {
            let haystack = node.label().to_lowercase();
            fuzzy_score(&needle, &haystack).map(|score| (score, node))
        })
        .collect();

    scored.sort_by(|(score_a, node_a), (score_b, node_b)| {
        score_b
            .cmp(score_a)
            .then_with(|| node_a.label().cmp(node_b.label()))
            .then_with(|| node_a.id().cmp(node_b.id()))
    });

    scored
        .into_iter()
        .take(limit)
        .map(|(_, node)| node)
        .collect()
}

fn fuzzy_score(needle: &str, haystack: &str) -> Option<i64> {
    let subseq = subsequence_stats(needle, haystack)?;
    let ratio = rapidfuzz::fuzz::ratio(needle.chars(), haystack.chars());

    let mut score = (ratio * 1000.0).round() as i64;
    score -= subseq.span as i64;
    score -= (subseq.first as i64) / 4;
    score += (subseq.consecutive as i64) * 40;
    if subseq.start_boundary {
        score += 150;
    }
    if haystack.contains(needle) {
        score += 2000;
    } else {
        score += 500;
    }

    Some(score)
}

struct SubsequenceStats {
    first: usize,
    span: usize,
    consecutive: usize,
    start_boundary: bool,
}

// Walks the haystack once, consuming needle characters in order. None means the needle is
// not a subsequence at all.
fn subsequence_stats(needle: &str, haystack: &str) -> Option<SubsequenceStats> {
    let mut wanted = needle.chars().peekable();
    let mut first: Option<usize> = None;
    let mut last: usize = 0;
    let mut prev_match: Option<usize> = None;
    let mut consecutive: usize = 0;
    let mut start_boundary = false;
    let mut prev_char: Option<char> = None;

    for (idx, ch) in haystack.chars().enumerate() {
        let Some(&want) = wanted.peek() else {
            break;
        };

        if ch == want {
            wanted.next();

            if first.is_none() {
                first = Some(idx);
                start_boundary = prev_char.map_or(true, is_boundary_char);
            }

            if let Some(prev) = prev_match {
                if idx == prev + 1 {
                    consecutive += 1;
                }
            }
            prev_match = Some(idx);
            last = idx;
        }

        prev_char = Some(ch);
    }

    if wanted.peek().is_some() {
        return None;
    }

    let first = first?;
    Some(SubsequenceStats {
        first,
        span: last.saturating_sub(first).saturating_add(1),
        consecutive,
        start_boundary,
    })
}

fn is_boundary_char(ch: char) -> bool {
    matches!(ch, '/' | ':' | '-' | '_' | ' ')
}
