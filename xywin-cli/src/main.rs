mod bam2fq;
mod merge;
mod swap;
mod windows;

use anyhow::Result;
use clap::Command;
use env_logger::Env;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "xywin";
    pub const BIN_NAME: &str = "xywin";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Databio")
        .about("Windowed depth and mapping quality over BAM files, plus samtools/sambamba glue for remapping sex chromosomes.")
        .subcommand_required(true)
        .subcommand(windows::cli::create_windows_cli())
        .subcommand(bam2fq::cli::create_bam2fq_cli())
        .subcommand(swap::cli::create_swap_cli())
        .subcommand(merge::cli::create_merge_cli())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // WINDOW METRICS
        //
        Some((windows::cli::WINDOWS_CMD, matches)) => {
            windows::handlers::run_windows(matches)?;
        }

        //
        // STRIP TO FASTQ
        //
        Some((bam2fq::cli::BAM2FQ_CMD, matches)) => {
            bam2fq::handlers::run_bam2fq(matches)?;
        }

        //
        // SEX CHROMOSOME SWAP
        //
        Some((swap::cli::SWAP_CMD, matches)) => {
            swap::handlers::run_swap(matches)?;
        }

        //
        // MERGE
        //
        Some((merge::cli::MERGE_CMD, matches)) => {
            merge::handlers::run_merge(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
