//! Greedy conflict resolution over the intent graph.
//!
//! Sources are visited by ascending out-degree (fewest options first), ties
//! broken by position.  Each source scans its own edges from priority 4
//! down to 1, equal priorities in target order, and commits the first edge
//! whose target nobody has claimed yet.  A source whose every target is
//! taken stays put.
//!
//! The result is a matching: each source commits at most once and each
//! target is claimed at most once.  2-cycles and longer cycles can survive;
//! applying them is [`MovePlan`][crate::MovePlan]'s job.

use std::cmp::Reverse;
use std::collections::BTreeSet;

use cs_core::Position;

use crate::{Assignment, IntentGraph};

/// Reduce `graph` to an [`Assignment`].  Never fails; an empty graph
/// yields an empty assignment.
pub fn resolve(graph: &IntentGraph) -> Assignment {
    let mut order: Vec<(usize, Position)> = graph
        .sources()
        .map(|(source, edges)| (edges.len(), source))
        .collect();
    order.sort_unstable();

    let mut assignment = Assignment::new();
    let mut claimed: BTreeSet<Position> = BTreeSet::new();

    for (_, source) in order {
        let mut edges = graph.edges(source).to_vec();
        edges.sort_unstable_by_key(|e| (Reverse(e.priority), e.target));

        if let Some(edge) = edges.into_iter().find(|e| !claimed.contains(&e.target)) {
            claimed.insert(edge.target);
            assignment.insert(source, edge.target, edge.priority);
        }
    }

    tracing::debug!(
        intents = graph.len(),
        sources = graph.source_count(),
        committed = assignment.len(),
        swaps = assignment.swaps().len(),
        "intent graph resolved"
    );
    assignment
}
