// Edge aggregation — directed connection events to a weighted edge list.
//
// Domain-agnostic: endpoints are any hashable, orderable type (author ids
// for the repost network, tag strings for the hashtag network). Each event
// canonicalizes to an unordered pair, occurrences are counted in a single
// pass, and self-loops are tallied separately and excluded from the
// emitted edges.

use std::collections::HashMap;
use std::hash::Hash;

/// Canonical form of one directed event. `Link` endpoints are stored in
/// sorted order, so `(a, b)` and `(b, a)` collapse to the same key. Built
/// from exactly two endpoints, the type admits no third cardinality.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CanonicalPair<T> {
    /// Both endpoints equal — an author referencing their own post, or a
    /// tag used twice in the same post.
    SelfLoop(T),
    /// Two distinct endpoints, first <= second.
    Link(T, T),
}

impl<T: Ord> CanonicalPair<T> {
    pub fn new(source: T, target: T) -> Self {
        match source.cmp(&target) {
            std::cmp::Ordering::Equal => CanonicalPair::SelfLoop(source),
            std::cmp::Ordering::Less => CanonicalPair::Link(source, target),
            std::cmp::Ordering::Greater => CanonicalPair::Link(target, source),
        }
    }
}

/// Occurrence counts keyed by canonical pair.
///
/// Forms a monoid under `merge` (key-wise addition), so per-shard maps
/// from a parallel run combine in any order without changing the final
/// weights.
#[derive(Debug, Clone, Default)]
pub struct WeightMap<T: Eq + Hash> {
    counts: HashMap<CanonicalPair<T>, u64>,
}

impl<T: Eq + Hash + Ord> WeightMap<T> {
    pub fn new() -> Self {
        Self {
            counts: HashMap::new(),
        }
    }

    /// Record one directed event.
    pub fn record(&mut self, source: T, target: T) {
        *self.counts.entry(CanonicalPair::new(source, target)).or_insert(0) += 1;
    }

    /// Key-wise addition of another map into this one.
    pub fn merge(&mut self, other: WeightMap<T>) {
        for (pair, count) in other.counts {
            *self.counts.entry(pair).or_insert(0) += count;
        }
    }

    /// Total events recorded (sum over all counts).
    pub fn total_events(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct canonical pairs observed, self-loops included.
    pub fn distinct_pairs(&self) -> usize {
        self.counts.len()
    }

    /// Partition into the weighted edge list and self-loop tallies.
    pub fn into_edge_list(self) -> EdgeList<T> {
        let mut edges = Vec::new();
        let mut self_loop_events = 0u64;
        let mut self_loop_pairs = 0usize;

        for (pair, weight) in self.counts {
            match pair {
                CanonicalPair::SelfLoop(_) => {
                    self_loop_events += weight;
                    self_loop_pairs += 1;
                }
                CanonicalPair::Link(a, b) => {
                    edges.push(Edge { a, b, weight });
                }
            }
        }

        // Heaviest first; endpoint order tiebreak. Consumers must treat
        // the sequence as a set, but a stable order keeps runs comparable.
        edges.sort_by(|x, y| {
            y.weight
                .cmp(&x.weight)
                .then_with(|| x.a.cmp(&y.a))
                .then_with(|| x.b.cmp(&y.b))
        });

        EdgeList {
            edges,
            self_loop_events,
            self_loop_pairs,
        }
    }
}

/// One undirected weighted edge. Endpoint order within the edge carries
/// no meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edge<T> {
    pub a: T,
    pub b: T,
    pub weight: u64,
}

/// Aggregation output: deduplicated weighted edges plus self-loop tallies.
///
/// Invariants: every edge has distinct endpoints and weight >= 1;
/// `edges.len() + self_loop_pairs` equals the distinct canonical pairs
/// observed; sum of edge weights plus `self_loop_events` equals the total
/// input events.
#[derive(Debug, Clone)]
pub struct EdgeList<T> {
    pub edges: Vec<Edge<T>>,
    /// Occurrence count of self-referencing events (excluded from edges).
    pub self_loop_events: u64,
    /// Distinct endpoints that self-looped.
    pub self_loop_pairs: usize,
}

impl<T> EdgeList<T> {
    /// Sum of emitted edge weights.
    pub fn total_weight(&self) -> u64 {
        self.edges.iter().map(|e| e.weight).sum()
    }
}

/// Aggregate a stream of directed events into a weighted edge list.
pub fn aggregate<T, I>(events: I) -> EdgeList<T>
where
    T: Eq + Hash + Ord,
    I: IntoIterator<Item = (T, T)>,
{
    let mut weights = WeightMap::new();
    for (source, target) in events {
        weights.record(source, target);
    }
    weights.into_edge_list()
}
