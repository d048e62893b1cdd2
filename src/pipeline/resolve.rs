// Reference resolution — join repost references back to original authors.
//
// For every reference a repost carries, look its target id up in a hash
// index of the original posts. Exactly one match emits a directed
// connection event (original author -> reposting author). Zero matches is
// an expected outcome (repost of a repost, or a post outside the ingested
// window) and is tallied, not raised. More than one match is a
// data-integrity anomaly in the feed and is recorded with full context.
//
// This join dominates the cost on large archives, so the index must be a
// hash map lookup per reference, never a scan over the original set.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::classify::{OriginalPost, RepostRecord};

/// Hash index from post id to the author(s) claiming that id.
///
/// Post ids should be unique, so the author list is almost always length
/// one. Length > 1 means the feed reissued an identifier; the resolver
/// reports those references as ambiguous instead of picking a side.
#[derive(Debug, Default)]
pub struct OriginalIndex {
    by_id: HashMap<String, Vec<String>>,
}

impl OriginalIndex {
    /// Build the index from the original-post bucket.
    pub fn build(originals: &[OriginalPost]) -> Self {
        let mut by_id: HashMap<String, Vec<String>> = HashMap::with_capacity(originals.len());
        for post in originals {
            by_id
                .entry(post.post_id.clone())
                .or_default()
                .push(post.author_id.clone());
        }
        Self { by_id }
    }

    /// Authors recorded for a post id. Empty slice when unknown.
    pub fn authors_for(&self, post_id: &str) -> &[String] {
        self.by_id.get(post_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct post ids in the index.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

/// One observed directed interaction: `source` authored the referenced
/// post, `target` reposted/replied/quoted it. Multiset semantics — the
/// same pair appearing many times is counted every time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionEvent {
    pub source: String,
    pub target: String,
}

/// A reference whose target id matched more than one original post.
/// Recorded for offline inspection; never becomes a connection event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmbiguousReference {
    pub repost_id: String,
    pub repost_author: String,
    pub target_id: String,
    pub matched_authors: Vec<String>,
}

/// Resolver output: connection events plus the diagnostics that are
/// always produced alongside, even when empty.
///
/// Invariant: `references_seen == connections.len() + unresolved +
/// ambiguous.len()`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resolution {
    pub connections: Vec<ConnectionEvent>,
    pub unresolved: usize,
    pub ambiguous: Vec<AmbiguousReference>,
    /// Total reference entries processed across all reposts.
    pub references_seen: usize,
}

/// Resolve every reference of every repost against the original index.
///
/// Multi-referencing reposts are resolved entry by entry: one repost with
/// two references produces up to two connection events.
pub fn resolve_references(index: &OriginalIndex, reposts: &[RepostRecord]) -> Resolution {
    let mut resolution = Resolution::default();

    for repost in reposts {
        for reference in &repost.references {
            resolution.references_seen += 1;
            let matches = index.authors_for(&reference.target_id);

            match matches {
                [author] => {
                    resolution.connections.push(ConnectionEvent {
                        source: author.clone(),
                        target: repost.author_id.clone(),
                    });
                }
                [] => {
                    resolution.unresolved += 1;
                }
                many => {
                    debug!(
                        repost_id = repost.post_id,
                        target_id = reference.target_id,
                        matches = many.len(),
                        "Reference matched more than one original post"
                    );
                    resolution.ambiguous.push(AmbiguousReference {
                        repost_id: repost.post_id.clone(),
                        repost_author: repost.author_id.clone(),
                        target_id: reference.target_id.clone(),
                        matched_authors: many.to_vec(),
                    });
                }
            }
        }
    }

    resolution
}
