use clap::{Arg, ArgAction, Command, arg, value_parser};

pub const SWAP_CMD: &str = "swap";

pub fn create_swap_cli() -> Command {
    Command::new(SWAP_CMD)
        .author("Databio")
        .about("Replace the sex chromosome reads of an alignment file with remapped reads.")
        .arg(arg!(--original <BAM> "Original alignment file").required(true))
        .arg(arg!(--remapped <BAM> "Remapped sex chromosome reads").required(true))
        .arg(
            Arg::new("sex-chrom")
                .long("sex-chrom")
                .required(true)
                .action(ArgAction::Append)
                .help("Chromosome taken from the remapped file; repeat for several"),
        )
        .arg(arg!(--"output-dir" <DIR> "Directory for the merged and temporary files").required(true))
        .arg(arg!(--prefix <PREFIX> "Prefix of the merged file name").required(true))
        .arg(
            arg!(--threads <THREADS> "Threads for samtools/sambamba")
                .required(false)
                .value_parser(value_parser!(u64).range(1..)),
        )
        .arg(arg!(--cram "Inputs and output are CRAM"))
        .arg(arg!(--sambamba "Extract the retained chromosomes with sambamba (BAM only)"))
        .arg(arg!(--"keep-temps" "Keep header.sam and the intermediate alignment files"))
        .arg(arg!(--"tools-config" <TOML> "Paths to samtools, sambamba and repair.sh").required(false))
}
