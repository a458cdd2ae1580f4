//! # xywin-scan
//!
//! Windowed read depth and mapping quality for one chromosome at a time.
//!
//! A scan resolves the chromosome length from the source's reference
//! dictionary, partitions it into windows, and for every window runs one
//! region query, skipping secondary and supplementary alignments:
//!
//! ```no_run
//! use xywin_scan::{IndexedBamSource, LogProgress, ScanOptions, scan_chromosome};
//!
//! let mut source = IndexedBamSource::open("sample.bam")?;
//! let table = scan_chromosome(&mut source, "chrX", &ScanOptions::new(50_000), &mut LogProgress)?;
//! table.to_tsv(std::path::Path::new("chrX.windows.tsv"))?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod aggregate;
pub mod indexed_bam;
pub mod memory;
pub mod progress;
pub mod scanner;
pub mod source;

// re-exports
pub use aggregate::{MissingLengthPolicy, WindowAccumulator, aggregate_window};
pub use indexed_bam::IndexedBamSource;
pub use memory::InMemorySource;
pub use progress::{LogProgress, ScanProgress, Silent};
pub use scanner::{ScanOptions, scan_chromosome, scan_chromosomes};
pub use source::{AlignmentRecord, AlignmentSource, RecordIter, Reference, chromosome_length};

pub use xywin_core::{LastWindowRule, MetricsTable, ScanError, Window, WindowMetrics};
