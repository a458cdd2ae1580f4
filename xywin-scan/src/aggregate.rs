use std::fmt::{self, Display};
use std::str::FromStr;

use log::debug;

use xywin_core::{ScanError, Window, WindowMetrics};

use crate::source::AlignmentSource;

///
/// What to do with a primary alignment that has no inferred query length
///
/// `Zero` counts the record with a length of 0 (its mapping quality still
/// enters the mean). `Fail` aborts the scan with
/// [`ScanError::MalformedRecord`].
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingLengthPolicy {
    #[default]
    Zero,
    Fail,
}

impl FromStr for MissingLengthPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zero" => Ok(MissingLengthPolicy::Zero),
            "fail" => Ok(MissingLengthPolicy::Fail),
            _ => Err(format!("Invalid missing length policy: {}", s)),
        }
    }
}

impl Display for MissingLengthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingLengthPolicy::Zero => write!(f, "zero"),
            MissingLengthPolicy::Fail => write!(f, "fail"),
        }
    }
}

/// Running totals for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowAccumulator {
    total_read_length: u64,
    mapq_sum: u64,
    reads: u64,
}

impl WindowAccumulator {
    pub fn add(&mut self, read_length: u64, mapping_quality: u8) {
        self.total_read_length += read_length;
        self.mapq_sum += mapping_quality as u64;
        self.reads += 1;
    }

    pub fn reads(&self) -> u64 {
        self.reads
    }

    pub fn total_read_length(&self) -> u64 {
        self.total_read_length
    }

    /// Summed read length over the nominal window size.
    pub fn depth(&self, window_size: u64) -> f64 {
        self.total_read_length as f64 / window_size as f64
    }

    /// Mean mapping quality, NaN when nothing was counted.
    pub fn mean_mapq(&self) -> f64 {
        if self.reads == 0 {
            return f64::NAN;
        }
        self.mapq_sum as f64 / self.reads as f64
    }
}

///
/// Depth and mean mapping quality of the primary alignments overlapping `window`
///
/// # Arguments
/// * `source` - queried once for `window`
/// * `window` - region to summarise
/// * `window_size` - nominal window size; depth is divided by this even when
///   the window's own span differs
/// * `missing_length` - handling of records without an inferred query length
///
pub fn aggregate_window<S: AlignmentSource + ?Sized>(
    source: &mut S,
    window: &Window,
    window_size: u64,
    missing_length: MissingLengthPolicy,
) -> Result<WindowMetrics, ScanError> {
    let mut accumulator = WindowAccumulator::default();

    for result in source.fetch(&window.chrom, window.start, window.stop)? {
        let record = result.map_err(|err| ScanError::Record {
            region: window.region_string(),
            source: err,
        })?;

        if !record.is_primary() {
            continue;
        }

        let read_length = match (record.inferred_query_length, missing_length) {
            (Some(length), _) => length,
            (None, MissingLengthPolicy::Zero) => {
                debug!(
                    "Counting record without query length as 0 in {}",
                    window.region_string()
                );
                0
            }
            (None, MissingLengthPolicy::Fail) => {
                return Err(ScanError::MalformedRecord {
                    chrom: window.chrom.clone(),
                    start: window.start,
                    stop: window.stop,
                });
            }
        };

        accumulator.add(read_length, record.mapping_quality);
    }

    Ok(WindowMetrics::new(
        window,
        accumulator.depth(window_size),
        accumulator.mean_mapq(),
    ))
}
