//! The per-tick intent graph.
//!
//! Vertices are grid positions, created the first time an intent names
//! them.  Each source vertex keeps its outgoing edges; a repeated
//! `(source, target)` pair keeps the higher priority and counts once.

use cs_behavior::{MoveIntent, Priority};
use cs_core::Position;

use crate::{MovementError, MovementResult};

#[cfg(feature = "fx-hash")]
type VertexMap<V> = rustc_hash::FxHashMap<Position, V>;
#[cfg(not(feature = "fx-hash"))]
type VertexMap<V> = std::collections::HashMap<Position, V>;

/// One outgoing intent edge.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Edge {
    pub target:   Position,
    pub priority: Priority,
}

/// Directed, priority-weighted graph of every move intent in one tick.
///
/// Rebuilt from scratch each tick and dropped once resolved.
#[derive(Clone, Debug, Default)]
pub struct IntentGraph {
    out:   VertexMap<Vec<Edge>>,
    edges: usize,
}

impl IntentGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-size for roughly `sources` proposing cells.
    pub fn with_capacity(sources: usize) -> Self {
        let mut out = VertexMap::default();
        out.reserve(sources);
        Self { out, edges: 0 }
    }

    /// Insert `intent` as an edge `source → target`.
    ///
    /// # Errors
    ///
    /// [`MovementError::NonAdjacent`] if the endpoints are not one
    /// orthogonal step apart.  The graph is left unchanged.
    pub fn add_intent(&mut self, intent: MoveIntent) -> MovementResult<()> {
        if !intent.is_adjacent() {
            return Err(MovementError::NonAdjacent { from: intent.source, to: intent.target });
        }
        let edges = self.out.entry(intent.source).or_default();
        match edges.iter_mut().find(|e| e.target == intent.target) {
            Some(existing) => existing.priority = existing.priority.max(intent.priority),
            None => {
                edges.push(Edge { target: intent.target, priority: intent.priority });
                self.edges += 1;
            }
        }
        Ok(())
    }

    /// Insert every intent, stopping at the first invalid one.
    pub fn extend<I>(&mut self, intents: I) -> MovementResult<()>
    where
        I: IntoIterator<Item = MoveIntent>,
    {
        intents.into_iter().try_for_each(|i| self.add_intent(i))
    }

    /// Number of distinct edges.
    #[inline]
    pub fn len(&self) -> usize {
        self.edges
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges == 0
    }

    /// Number of positions with at least one outgoing edge.
    #[inline]
    pub fn source_count(&self) -> usize {
        self.out.len()
    }

    /// Outgoing edges of `source` in insertion order (empty if none).
    pub fn edges(&self, source: Position) -> &[Edge] {
        self.out.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    #[inline]
    pub fn out_degree(&self, source: Position) -> usize {
        self.edges(source).len()
    }

    /// Priority of the edge `source → target`, if present.
    pub fn priority_of(&self, source: Position, target: Position) -> Option<Priority> {
        self.edges(source).iter().find(|e| e.target == target).map(|e| e.priority)
    }

    /// Every source with its outgoing edges, in unspecified order.
    pub fn sources(&self) -> impl Iterator<Item = (Position, &[Edge])> + '_ {
        self.out.iter().map(|(&p, e)| (p, e.as_slice()))
    }
}
