// Core transformation pipeline: classify -> resolve -> aggregate.
//
// Each stage is a pure transform over immutable inputs. The composition
// functions here wire the stages together for the two networks; all I/O
// stays in `ingest` and `output`.

pub mod aggregate;
pub mod classify;
pub mod hashtags;
pub mod resolve;

use aggregate::EdgeList;
use classify::ClassifiedBatch;
use resolve::{OriginalIndex, Resolution};
use tracing::info;

/// Build the who-reposts-whom network from a classified batch.
///
/// Returns the weighted edge list together with the full resolution
/// diagnostics (unresolved count, ambiguous references).
pub fn repost_edges(batch: &ClassifiedBatch) -> (EdgeList<String>, Resolution) {
    let index = OriginalIndex::build(&batch.originals);
    info!(
        indexed_posts = index.len(),
        reposts = batch.reposts.len(),
        "Resolving references against original-post index"
    );

    let resolution = resolve::resolve_references(&index, &batch.reposts);
    let edges = aggregate::aggregate(
        resolution
            .connections
            .iter()
            .map(|c| (c.source.clone(), c.target.clone())),
    );
    (edges, resolution)
}

/// Build the co-occurring-hashtag network from a classified batch.
pub fn hashtag_edges(batch: &ClassifiedBatch) -> EdgeList<String> {
    let events = hashtags::tag_pair_events(&batch.originals);
    info!(pair_events = events.len(), "Expanded tag co-occurrence pairs");
    aggregate::aggregate(events)
}
