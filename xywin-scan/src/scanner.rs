use log::{info, warn};

use xywin_core::consts::DEFAULT_WINDOW_SIZE;
use xywin_core::{
    DEFAULT_LAST_WINDOW_RULE, LastWindowRule, MetricsTable, ScanError, partition_windows,
};

use crate::aggregate::{MissingLengthPolicy, aggregate_window};
use crate::progress::ScanProgress;
use crate::source::{AlignmentSource, chromosome_length};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    pub window_size: u64,
    pub last_window: LastWindowRule,
    pub missing_length: MissingLengthPolicy,
}

impl Default for ScanOptions {
    fn default() -> Self {
        ScanOptions {
            window_size: DEFAULT_WINDOW_SIZE,
            last_window: DEFAULT_LAST_WINDOW_RULE,
            missing_length: MissingLengthPolicy::default(),
        }
    }
}

impl ScanOptions {
    pub fn new(window_size: u64) -> Self {
        ScanOptions {
            window_size,
            ..Default::default()
        }
    }

    pub fn with_last_window(mut self, rule: LastWindowRule) -> Self {
        self.last_window = rule;
        self
    }

    pub fn with_missing_length(mut self, policy: MissingLengthPolicy) -> Self {
        self.missing_length = policy;
        self
    }
}

///
/// Per-window depth and mean mapping quality for one chromosome
///
/// Resolves the chromosome length from the source's references, partitions it
/// and aggregates the windows in ascending order, one region query each.
/// Any error aborts the scan; no partial table is returned.
///
pub fn scan_chromosome<S, P>(
    source: &mut S,
    chrom: &str,
    options: &ScanOptions,
    progress: &mut P,
) -> Result<MetricsTable, ScanError>
where
    S: AlignmentSource + ?Sized,
    P: ScanProgress + ?Sized,
{
    let length = chromosome_length(source, chrom)?;
    let windows = partition_windows(chrom, length, options.window_size, options.last_window)?;

    if let Some(last) = windows.last() {
        if last.stop != length {
            warn!(
                "Last window on {} ends at {} but the chromosome is {} bp ({} rule)",
                chrom, last.stop, length, options.last_window
            );
        }
    }

    info!(
        "Scanning {} ({} bp) in {} windows of {} bp",
        chrom,
        length,
        windows.len(),
        options.window_size
    );

    let total = windows.len();
    let mut table = MetricsTable::with_capacity(total);

    for (i, window) in windows.iter().enumerate() {
        let metrics = aggregate_window(source, window, options.window_size, options.missing_length)?;
        table.push(metrics);
        progress.window_processed(chrom, i + 1, total);
    }

    Ok(table)
}

/// [`scan_chromosome`] for each name in turn, rows concatenated in the given order.
pub fn scan_chromosomes<S, P, I>(
    source: &mut S,
    chroms: I,
    options: &ScanOptions,
    progress: &mut P,
) -> Result<MetricsTable, ScanError>
where
    S: AlignmentSource + ?Sized,
    P: ScanProgress + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut table = MetricsTable::new();
    for chrom in chroms {
        table.append(scan_chromosome(source, chrom.as_ref(), options, progress)?);
    }
    Ok(table)
}
