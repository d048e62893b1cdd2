// Weighted edge-list writer.
//
// One edge per line, `<endpoint_A> <endpoint_B> <weight>\n`, no header,
// no escaping — byte-compatible with standard whitespace-delimited
// weighted-edge-list readers. Endpoint order within a line carries no
// meaning. Endpoints must not contain whitespace; rather than emit a
// line no reader can parse back, the writer rejects them.

use std::fmt::Display;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::pipeline::aggregate::Edge;

/// Write edges to any `Write` sink in edge-list text format.
pub fn write_edgelist<T, W>(edges: &[Edge<T>], mut sink: W) -> Result<()>
where
    T: Display,
    W: Write,
{
    for edge in edges {
        let a = edge.a.to_string();
        let b = edge.b.to_string();
        if has_whitespace(&a) || has_whitespace(&b) {
            anyhow::bail!(
                "Endpoint contains whitespace and would corrupt the edge list: {:?} {:?}",
                a,
                b
            );
        }
        writeln!(sink, "{} {} {}", a, b, edge.weight).context("Failed to write edge")?;
    }
    Ok(())
}

/// Write edges to a file, creating parent directories as needed.
pub fn write_edgelist_file<T: Display>(path: &Path, edges: &[Edge<T>]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    let file = File::create(path)
        .with_context(|| format!("Failed to create edge-list file {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_edgelist(edges, &mut writer)?;
    writer.flush().context("Failed to flush edge list")?;

    info!(path = %path.display(), edges = edges.len(), "Wrote edge list");
    Ok(())
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}
