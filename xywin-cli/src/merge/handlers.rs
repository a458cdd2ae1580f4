use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use xywin_tools::{SystemRunner, ToolPaths, sambamba_merge};

pub fn run_merge(matches: &ArgMatches) -> Result<()> {
    let bams: Vec<&String> = matches
        .get_many::<String>("bam")
        .context("at least one --bam is required")?
        .collect();
    let prefix = matches
        .get_one::<String>("prefix")
        .context("--prefix is required")?;

    let mut tools = ToolPaths::load(matches.get_one::<String>("tools-config").map(Path::new))?;
    if let Some(threads) = matches.get_one::<u64>("threads") {
        tools = tools.with_threads(*threads as usize)?;
    }

    let merged = sambamba_merge(&SystemRunner, &tools, &bams, prefix)?;
    println!("{}", merged.display());

    Ok(())
}
