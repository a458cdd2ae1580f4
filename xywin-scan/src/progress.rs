use indicatif::ProgressBar;
use log::debug;

///
/// Receives one observation per processed window
///
/// Observations never feed back into the scan; a sink that ignores them
/// yields the same table.
///
pub trait ScanProgress {
    fn window_processed(&mut self, chrom: &str, processed: usize, total: usize);
}

/// Discards every observation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ScanProgress for Silent {
    fn window_processed(&mut self, _chrom: &str, _processed: usize, _total: usize) {}
}

/// Writes one debug log line per window.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ScanProgress for LogProgress {
    fn window_processed(&mut self, chrom: &str, processed: usize, total: usize) {
        debug!("{} out of {} windows processed on {}", processed, total, chrom);
    }
}

impl ScanProgress for ProgressBar {
    fn window_processed(&mut self, chrom: &str, processed: usize, total: usize) {
        if processed == 1 {
            self.reset();
            self.set_length(total as u64);
            self.set_message(chrom.to_string());
        }
        self.set_position(processed as u64);
    }
}
