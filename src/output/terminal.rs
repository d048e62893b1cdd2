// Colored terminal summaries for pipeline diagnostics.
//
// Display-only: everything shown here comes from the diagnostics structs
// the transforms return. The transforms themselves never print.

use colored::Colorize;

use crate::pipeline::aggregate::EdgeList;
use crate::pipeline::classify::ClassifiedBatch;
use crate::pipeline::hashtags::TagUsage;
use crate::pipeline::resolve::Resolution;

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Display classification bucket counts.
pub fn display_classification(batch: &ClassifiedBatch) {
    let total = batch.len();
    println!(
        "\n{}",
        format!("=== Classification ({total} records) ===").bold()
    );
    println!(
        "  Original posts:  {:>8}  ({:.2}%)",
        batch.originals.len(),
        percent(batch.originals.len(), total)
    );
    println!(
        "  Repost-like:     {:>8}  ({:.2}%)",
        batch.reposts.len(),
        percent(batch.reposts.len(), total)
    );
    let malformed = batch.malformed.len();
    let malformed_line = format!(
        "  Malformed:       {:>8}  ({:.2}%)",
        malformed,
        percent(malformed, total)
    );
    if malformed > 0 {
        println!("{}", malformed_line.yellow());
    } else {
        println!("{malformed_line}");
    }

    let multi = batch.multi_reference_count();
    if multi > 0 {
        println!(
            "  {}",
            format!("{multi} reposts carry more than one reference").dimmed()
        );
    }
}

/// Display reference-resolution diagnostics.
pub fn display_resolution(resolution: &Resolution) {
    println!(
        "\n{}",
        format!(
            "=== Resolution ({} references) ===",
            resolution.references_seen
        )
        .bold()
    );
    println!(
        "  Connections:  {:>8}  ({:.2}%)",
        resolution.connections.len(),
        percent(resolution.connections.len(), resolution.references_seen)
    );
    println!(
        "  Unresolved:   {:>8}  ({:.2}%)  {}",
        resolution.unresolved,
        percent(resolution.unresolved, resolution.references_seen),
        "(outside window or repost-of-repost)".dimmed()
    );

    if resolution.ambiguous.is_empty() {
        println!("  Ambiguous:    {:>8}", 0);
    } else {
        println!(
            "  {} {} references matched more than one original post:",
            "!".red().bold(),
            resolution.ambiguous.len()
        );
        for anomaly in &resolution.ambiguous {
            println!(
                "    repost {} by {} -> target {} matched {:?}",
                anomaly.repost_id, anomaly.repost_author, anomaly.target_id, anomaly.matched_authors
            );
        }
    }
}

/// Display an edge-list summary for either network.
pub fn display_edge_summary(label: &str, edges: &EdgeList<String>) {
    println!("\n{}", format!("=== {label} network ===").bold());
    println!("  Edges:            {:>8}", edges.edges.len());
    println!("  Total weight:     {:>8}", edges.total_weight());
    println!(
        "  Self-loops:       {:>8} events across {} endpoints {}",
        edges.self_loop_events,
        edges.self_loop_pairs,
        "(suppressed)".dimmed()
    );

    if let Some(heaviest) = edges.edges.first() {
        println!(
            "  Heaviest edge:    {} -- {}  (weight {})",
            heaviest.a, heaviest.b, heaviest.weight
        );
    }
}

/// How many top tags to list in the usage summary.
const TOP_TAGS: usize = 20;

/// Display tag usage statistics.
pub fn display_tag_usage(usage: &TagUsage) {
    let posts = usage.posts_without_tags + usage.posts_with_one_tag + usage.posts_with_multiple_tags;
    println!("\n{}", format!("=== Tag usage ({posts} posts) ===").bold());
    println!(
        "  No tags:        {:>8}  ({:.2}%)",
        usage.posts_without_tags,
        percent(usage.posts_without_tags, posts)
    );
    println!(
        "  One tag:        {:>8}  ({:.2}%)  {}",
        usage.posts_with_one_tag,
        percent(usage.posts_with_one_tag, posts),
        "(excluded from network)".dimmed()
    );
    println!(
        "  Multiple tags:  {:>8}  ({:.2}%)",
        usage.posts_with_multiple_tags,
        percent(usage.posts_with_multiple_tags, posts)
    );
    println!(
        "  Unique tags: {} ({} used only once, {:.2}%)",
        usage.unique_tags(),
        usage.used_once,
        percent(usage.used_once, usage.unique_tags())
    );

    if !usage.tag_counts.is_empty() {
        println!("\n  Top tags:");
        for (tag, count) in usage.tag_counts.iter().take(TOP_TAGS) {
            println!("    {:>8}  #{}", count, tag);
        }
    }
}
