//! # xywin-tools
//!
//! Glue around samtools, sambamba and BBMap's `repair.sh` for moving reads
//! in and out of alignment files: stripping regions to FASTQ per read group,
//! swapping remapped sex chromosomes back into the original file, and merging.
//!
//! Every external call is an [`Invocation`] with a structured argument list
//! run through a [`ProcessRunner`]; non-zero exits surface as
//! [`ToolError::InvocationFailed`].
pub mod commands;
pub mod config;
pub mod consts;
pub mod errors;
pub mod fastq;
pub mod header;
pub mod merge;
pub mod runner;
pub mod swap;

// re-exports
pub use commands::AlignmentFormat;
pub use config::ToolPaths;
pub use errors::ToolError;
pub use fastq::{FastqOutputs, FastqRequest, ReadGroupFastq, ReadLayout, bam_to_fastq};
pub use header::{PgLine, read_group_ids, read_group_lines, read_header_text, reference_names};
pub use merge::sambamba_merge;
pub use runner::{Invocation, ProcessRunner, SystemRunner, ToolOutput};
pub use swap::{Extractor, SwapRequest, switch_sex_chromosomes};
