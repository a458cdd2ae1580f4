use std::fmt::{self, Display};

///
/// Half-open interval `[start, stop)` on one chromosome
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Window {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
}

impl Window {
    pub fn new(chrom: impl Into<String>, start: u64, stop: u64) -> Self {
        Window {
            chrom: chrom.into(),
            start,
            stop,
        }
    }

    ///
    /// Number of bases covered by the window
    ///
    pub fn span(&self) -> u64 {
        self.stop.saturating_sub(self.start)
    }

    /// `chrom:start-stop`, the form used in log lines and error messages.
    pub fn region_string(&self) -> String {
        format!("{}:{}-{}", self.chrom, self.start, self.stop)
    }
}

impl Display for Window {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\t{}\t{}", self.chrom, self.start, self.stop)
    }
}
