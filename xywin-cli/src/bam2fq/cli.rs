use clap::{Arg, ArgAction, Command, arg};

pub const BAM2FQ_CMD: &str = "bam2fq";

pub fn create_bam2fq_cli() -> Command {
    Command::new(BAM2FQ_CMD)
        .author("Databio")
        .about("Strip reads to FASTQ, one set per read group, with samtools and repair.sh.")
        .arg(arg!(--bam <BAM> "Input BAM file").required(true))
        .arg(arg!(--"output-dir" <DIR> "Directory for FASTQ and temporary files").required(true))
        .arg(arg!(--prefix <PREFIX> "Prefix of the FASTQ file names").required(true))
        .arg(arg!(--single "Reads are single end"))
        .arg(
            Arg::new("region")
                .long("region")
                .action(ArgAction::Append)
                .help("samtools region to strip; repeat for several (default: whole file)"),
        )
        .arg(arg!(--"tools-config" <TOML> "Paths to samtools, sambamba and repair.sh").required(false))
}
