//! Hydrate subcommand - run the pipeline against the lookup service

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use postline_core::SharedProgress;
use postline_hydrate::{HttpHydrator, RunSummary};

use crate::config::Config;

#[derive(Args, Debug)]
pub struct HydrateArgs {
    /// Directory of identifier CSV files
    #[arg(short, long)]
    pub ids: Option<PathBuf>,

    /// Output directory for batch artifacts
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Identifiers per batch
    #[arg(short, long)]
    pub batch_size: Option<usize>,

    /// Maximum rounds over the file set (default: enough to cover every file)
    #[arg(long)]
    pub round_limit: Option<u32>,

    /// Lookup service base URL
    #[arg(long)]
    pub lookup_url: Option<String>,

    /// Concurrent lookup calls per batch
    #[arg(long)]
    pub concurrency: Option<usize>,
}

pub fn run(args: HydrateArgs, config: &Config, progress: &SharedProgress) -> Result<RunSummary> {
    let ids_dir = args.ids.unwrap_or_else(|| config.input.ids_dir.clone());
    let output_dir = args.output.unwrap_or_else(|| config.output.dir.clone());
    let lookup_url = args
        .lookup_url
        .unwrap_or_else(|| config.lookup.base_url.clone());

    let mut pipeline = postline_hydrate::Config::new(ids_dir, output_dir);
    if let Some(size) = args.batch_size {
        pipeline.batch_size = size;
    } else {
        pipeline.batch_size = config.batch.size;
    }
    pipeline.round_limit = args.round_limit.or(config.batch.round_limit);
    pipeline.chunk_concurrency = args.concurrency.unwrap_or(config.lookup.chunk_concurrency);

    log::info!("Hydrating posts");
    log::info!("  Ids: {}", pipeline.ids_dir.display());
    log::info!("  Output: {}", pipeline.output_dir.display());
    log::info!("  Lookup: {lookup_url}");

    let hydrator = HttpHydrator::new(
        lookup_url,
        config.lookup.token.clone(),
        pipeline.chunk_concurrency,
    );
    let summary = postline_hydrate::run(&pipeline, &hydrator, progress)?;

    if progress.is_tty() {
        summary.print();
    } else {
        summary.log();
    }
    Ok(summary)
}
