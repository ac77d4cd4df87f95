//! Status subcommand - show checkpoint coverage without running anything

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use postline_hydrate::{CHECKPOINT_FILE, ProgressStore, coverage_table};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Output directory of a previous or in-flight run
    #[arg(default_value = "./corpus")]
    pub dir: PathBuf,
}

pub fn run(args: StatusArgs) -> Result<()> {
    let path = args.dir.join(CHECKPOINT_FILE);
    let store = ProgressStore::new(&path);
    let state = store
        .load()
        .with_context(|| format!("no readable checkpoint at {}", path.display()))?;

    eprintln!("\n{}", coverage_table(&state));
    eprintln!(
        "round {}, {} completed units logged",
        state.round_index,
        state.completion_log.len()
    );
    if let Some(last) = state.last_durable_unit() {
        eprintln!("last completed: {last}");
    }
    Ok(())
}
