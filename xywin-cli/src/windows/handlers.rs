use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use xywin_core::consts::DEFAULT_WINDOW_SIZE;
use xywin_scan::{
    IndexedBamSource, LastWindowRule, MissingLengthPolicy, ScanOptions, Silent, scan_chromosomes,
};

pub fn run_windows(matches: &ArgMatches) -> Result<()> {
    let bam = matches
        .get_one::<String>("bam")
        .context("--bam is required")?;
    let chroms: Vec<&String> = matches
        .get_many::<String>("chrom")
        .context("at least one --chrom is required")?
        .collect();

    let window_size = matches
        .get_one::<u64>("window-size")
        .copied()
        .unwrap_or(DEFAULT_WINDOW_SIZE);
    let last_window: LastWindowRule = parse_choice(matches, "last-window")?;
    let missing_length: MissingLengthPolicy = parse_choice(matches, "missing-length")?;

    let options = ScanOptions::new(window_size)
        .with_last_window(last_window)
        .with_missing_length(missing_length);

    let mut source = IndexedBamSource::open(bam)?;

    let table = if matches.get_flag("quiet") {
        scan_chromosomes(&mut source, &chroms, &options, &mut Silent)?
    } else {
        let mut bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(
                "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}",
            )?
            .progress_chars("##-"),
        );
        let table = scan_chromosomes(&mut source, &chroms, &options, &mut bar)?;
        bar.finish_and_clear();
        table
    };

    match matches.get_one::<String>("output") {
        Some(path) => {
            table
                .to_tsv(Path::new(path))
                .with_context(|| format!("Failed to write {}", path))?;
            info!("Wrote {} windows to {}", table.len(), path);
        }
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            table.write_tsv(&mut writer, true)?;
        }
    }

    Ok(())
}

fn parse_choice<T>(matches: &ArgMatches, name: &str) -> Result<T>
where
    T: std::str::FromStr<Err = String>,
{
    let raw = matches
        .get_one::<String>(name)
        .with_context(|| format!("--{} has a default", name))?;
    raw.parse::<T>().map_err(|e| anyhow!(e))
}
