use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use filament::config::Config;
use filament::output::terminal;
use filament::pipeline::classify::ClassifiedBatch;
use filament::{ingest, output, pipeline};

/// Filament: repost and hashtag interaction networks from social post
/// archives.
///
/// Ingests post/repost event logs, resolves repost references back to
/// their original authors, and emits weighted undirected edge lists for
/// downstream graph analysis.
#[derive(Parser)]
#[command(name = "filament", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify raw archive files and write the three buckets as JSON
    Parse {
        /// Directory containing the raw archive files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Glob-style archive file pattern (default: *_data_*.json)
        #[arg(long)]
        pattern: Option<String>,

        /// Output directory for the bucket files
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Build the who-reposts-whom network and write its edge list
    RepostNet {
        /// Directory containing the raw archive files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Glob-style archive file pattern (default: *_data_*.json)
        #[arg(long)]
        pattern: Option<String>,

        /// Reuse buckets previously written by `parse` instead of raw files
        #[arg(long, value_name = "DIR")]
        from_parsed: Option<PathBuf>,

        /// Edge-list output path (default: <out_dir>/repost.edgelist)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Build the co-occurring-hashtag network and write its edge list
    HashtagNet {
        /// Directory containing the raw archive files
        #[arg(long)]
        data_dir: Option<PathBuf>,

        /// Glob-style archive file pattern (default: *_data_*.json)
        #[arg(long)]
        pattern: Option<String>,

        /// Reuse buckets previously written by `parse` instead of raw files
        #[arg(long, value_name = "DIR")]
        from_parsed: Option<PathBuf>,

        /// Edge-list output path (default: <out_dir>/hashtag.edgelist)
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("filament=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Parse {
            data_dir,
            pattern,
            out_dir,
        } => {
            let batch = classify_raw(&config, data_dir, pattern)?;
            terminal::display_classification(&batch);

            let out_dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
            output::write_buckets(&out_dir, &batch)?;
            println!("\nBuckets written to {}", out_dir.display());
        }

        Commands::RepostNet {
            data_dir,
            pattern,
            from_parsed,
            out,
        } => {
            let batch = load_classified(&config, data_dir, pattern, from_parsed)?;
            terminal::display_classification(&batch);

            let (edges, resolution) = pipeline::repost_edges(&batch);
            terminal::display_resolution(&resolution);
            terminal::display_edge_summary("Repost", &edges);

            let out = out.unwrap_or_else(|| config.output_dir.join("repost.edgelist"));
            output::edgelist::write_edgelist_file(&out, &edges.edges)?;
            println!("\nEdge list written to {}", out.display());
        }

        Commands::HashtagNet {
            data_dir,
            pattern,
            from_parsed,
            out,
        } => {
            let batch = load_classified(&config, data_dir, pattern, from_parsed)?;
            terminal::display_tag_usage(&pipeline::hashtags::tag_usage(&batch.originals));

            let edges = pipeline::hashtag_edges(&batch);
            terminal::display_edge_summary("Hashtag", &edges);

            let out = out.unwrap_or_else(|| config.output_dir.join("hashtag.edgelist"));
            output::edgelist::write_edgelist_file(&out, &edges.edges)?;
            println!("\nEdge list written to {}", out.display());
        }
    }

    info!(
        finished_at = %chrono::Utc::now().format("%Y-%m-%d %H:%M:%S"),
        "Run complete"
    );

    Ok(())
}

/// Get a classified batch either from previously written buckets or by
/// ingesting and classifying the raw archive.
fn load_classified(
    config: &Config,
    data_dir: Option<PathBuf>,
    pattern: Option<String>,
    from_parsed: Option<PathBuf>,
) -> Result<ClassifiedBatch> {
    if let Some(parsed_dir) = from_parsed {
        info!(dir = %parsed_dir.display(), "Loading previously classified buckets");
        return ingest::load_buckets(&parsed_dir);
    }
    classify_raw(config, data_dir, pattern)
}

/// Ingest raw archive files and classify their records.
fn classify_raw(
    config: &Config,
    data_dir: Option<PathBuf>,
    pattern: Option<String>,
) -> Result<ClassifiedBatch> {
    let data_dir = config.require_data_dir(data_dir)?;
    let pattern = pattern.unwrap_or_else(|| config.file_pattern.clone());

    let files = ingest::discover_files(&data_dir, &pattern)?;
    if files.is_empty() {
        anyhow::bail!(
            "No files matching {:?} found in {}",
            pattern,
            data_dir.display()
        );
    }
    println!("Parsing {} archive files...", files.len());

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Parsing [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut records = Vec::new();
    for path in &files {
        records.extend(ingest::load_file(path)?);
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        files = files.len(),
        records = records.len(),
        "Archive loaded"
    );

    Ok(filament::pipeline::classify::classify_records(records))
}
