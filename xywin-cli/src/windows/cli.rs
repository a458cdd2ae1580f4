use clap::{Arg, ArgAction, Command, arg, value_parser};

use xywin_core::consts::DEFAULT_WINDOW_SIZE;

pub const WINDOWS_CMD: &str = "windows";

pub fn create_windows_cli() -> Command {
    Command::new(WINDOWS_CMD)
        .author("Databio")
        .about("Mean depth and mapping quality in fixed-size windows over chromosomes of an indexed BAM file.")
        .arg(arg!(--bam <BAM> "Coordinate sorted, indexed BAM file").required(true))
        .arg(
            Arg::new("chrom")
                .long("chrom")
                .required(true)
                .action(ArgAction::Append)
                .help("Chromosome to scan; repeat for several"),
        )
        .arg(
            Arg::new("window-size")
                .long("window-size")
                .value_parser(value_parser!(u64))
                .help(format!("Window size in bases [default: {}]", DEFAULT_WINDOW_SIZE)),
        )
        .arg(
            Arg::new("last-window")
                .long("last-window")
                .value_parser(["legacy", "tiled"])
                .default_value("legacy")
                .help("How the final window of each chromosome is sized"),
        )
        .arg(
            Arg::new("missing-length")
                .long("missing-length")
                .value_parser(["zero", "fail"])
                .default_value("zero")
                .help("What to do with primary reads that have no CIGAR"),
        )
        .arg(arg!(--output <OUTPUT> "Output TSV file (default: stdout)").required(false))
        .arg(arg!(--quiet "Hide the progress bar"))
}
