// Filament: repost and hashtag interaction networks from social post archives.
//
// This is the library root. The `pipeline` module holds the core transforms
// (classification, reference resolution, edge aggregation, tag-pair
// expansion); `ingest` and `output` are the thin I/O boundary around them.

pub mod config;
pub mod ingest;
pub mod output;
pub mod pipeline;
