use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;

use xywin_tools::{
    AlignmentFormat, Extractor, PgLine, SwapRequest, SystemRunner, ToolPaths,
    switch_sex_chromosomes,
};

use crate::consts::{PKG_NAME, VERSION};

pub fn run_swap(matches: &ArgMatches) -> Result<()> {
    let original = matches
        .get_one::<String>("original")
        .context("--original is required")?;
    let remapped = matches
        .get_one::<String>("remapped")
        .context("--remapped is required")?;
    let sex_chromosomes: Vec<String> = matches
        .get_many::<String>("sex-chrom")
        .context("at least one --sex-chrom is required")?
        .cloned()
        .collect();
    let output_dir = matches
        .get_one::<String>("output-dir")
        .context("--output-dir is required")?;
    let prefix = matches
        .get_one::<String>("prefix")
        .context("--prefix is required")?;

    let mut tools = ToolPaths::load(matches.get_one::<String>("tools-config").map(Path::new))?;
    if let Some(threads) = matches.get_one::<u64>("threads") {
        tools = tools.with_threads(*threads as usize)?;
    }

    let request = SwapRequest {
        original: PathBuf::from(original),
        remapped: PathBuf::from(remapped),
        sex_chromosomes,
        output_dir: PathBuf::from(output_dir),
        output_prefix: prefix.to_string(),
        pg_line: Some(PgLine::new(
            PKG_NAME,
            Some(VERSION.to_string()),
            env::args().collect(),
        )),
        format: if matches.get_flag("cram") {
            AlignmentFormat::Cram
        } else {
            AlignmentFormat::Bam
        },
        extractor: if matches.get_flag("sambamba") {
            Extractor::Sambamba
        } else {
            Extractor::Samtools
        },
        keep_temps: matches.get_flag("keep-temps"),
    };

    let merged = switch_sex_chromosomes(&SystemRunner, &tools, &request)?;
    println!("{}", merged.display());

    Ok(())
}
