/// Window size used when none is given, in bases.
pub const DEFAULT_WINDOW_SIZE: u64 = 50_000;

/// Mapping quality reported for records that do not carry one.
pub const MISSING_MAPPING_QUALITY: u8 = 255;

pub const METRICS_COLUMNS: [&str; 5] = ["chrom", "start", "stop", "depth", "mapq"];
