use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use xywin_tools::{FastqRequest, ReadLayout, SystemRunner, ToolPaths, bam_to_fastq};

pub fn run_bam2fq(matches: &ArgMatches) -> Result<()> {
    let bam = matches
        .get_one::<String>("bam")
        .context("--bam is required")?;
    let output_dir = matches
        .get_one::<String>("output-dir")
        .context("--output-dir is required")?;
    let prefix = matches
        .get_one::<String>("prefix")
        .context("--prefix is required")?;

    let regions: Vec<String> = matches
        .get_many::<String>("region")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let layout = if matches.get_flag("single") {
        ReadLayout::Single
    } else {
        ReadLayout::Paired
    };

    let tools = ToolPaths::load(matches.get_one::<String>("tools-config").map(Path::new))?;

    let request = FastqRequest {
        input: PathBuf::from(bam),
        layout,
        output_dir: PathBuf::from(output_dir),
        output_prefix: prefix.to_string(),
        regions,
    };

    let outputs = bam_to_fastq(&SystemRunner, &tools, &request)?;
    info!(
        "Stripped {} read group(s); key written to {}",
        outputs.read_groups.len(),
        outputs.rg_fastq_key.display()
    );

    Ok(())
}
