// Output boundary — bucket persistence, edge-list files, terminal display.

pub mod edgelist;
pub mod terminal;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::pipeline::classify::ClassifiedBatch;

/// Write the three classification buckets as JSON files into `dir`
/// (created if absent): `originals.json`, `reposts.json`,
/// `malformed.json`.
pub fn write_buckets(dir: &Path, batch: &ClassifiedBatch) -> Result<()> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory {}", dir.display()))?;

    write_json(&dir.join("originals.json"), &batch.originals)?;
    write_json(&dir.join("reposts.json"), &batch.reposts)?;
    write_json(&dir.join("malformed.json"), &batch.malformed)?;

    info!(
        dir = %dir.display(),
        originals = batch.originals.len(),
        reposts = batch.reposts.len(),
        malformed = batch.malformed.len(),
        "Wrote classification buckets"
    );
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string(data).context("Failed to serialize bucket")?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}
