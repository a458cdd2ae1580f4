pub const DEFAULT_SAMTOOLS: &str = "samtools";
pub const DEFAULT_SAMBAMBA: &str = "sambamba";
pub const DEFAULT_REPAIR_SH: &str = "repair.sh";
pub const DEFAULT_THREADS: usize = 1;

// files written by bam_to_fastq
pub const FULL_RG_LIST: &str = "full_rg.list";
pub const RG_HEADER_LINES: &str = "header_lines_rg.list";
pub const RG_FASTQ_KEY: &str = "rg_fastq_key.list";

// files written by switch_sex_chromosomes
pub const HEADER_SAM: &str = "header.sam";
