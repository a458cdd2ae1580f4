use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const MERGE_CMD: &str = "merge";

pub fn create_merge_cli() -> Command {
    Command::new(MERGE_CMD)
        .author("Databio")
        .about("Merge and index BAM files with sambamba.")
        .arg(
            Arg::new("bam")
                .long("bam")
                .required(true)
                .action(ArgAction::Append)
                .help("BAM file to merge; repeat for several"),
        )
        .arg(arg!(--prefix <PREFIX> "Output prefix; writes <PREFIX>.merged.bam").required(true))
        .arg(
            arg!(--threads <THREADS> "Threads for sambamba")
                .required(false)
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(arg!(--"tools-config" <TOML> "Paths to samtools, sambamba and repair.sh").required(false))
}
