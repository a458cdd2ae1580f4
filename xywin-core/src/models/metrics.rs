use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::consts::METRICS_COLUMNS;
use crate::models::window::Window;

///
/// Read depth and mean mapping quality of one window
///
/// `mapq` is NaN when no primary alignment fell in the window.
///
#[derive(PartialEq, Debug, Clone)]
pub struct WindowMetrics {
    pub chrom: String,
    pub start: u64,
    pub stop: u64,
    pub depth: f64,
    pub mapq: f64,
}

impl WindowMetrics {
    pub fn new(window: &Window, depth: f64, mapq: f64) -> Self {
        WindowMetrics {
            chrom: window.chrom.clone(),
            start: window.start,
            stop: window.stop,
            depth,
            mapq,
        }
    }

    pub fn window(&self) -> Window {
        Window::new(self.chrom.clone(), self.start, self.stop)
    }

    /// Whether any primary alignment was counted for this window.
    pub fn has_reads(&self) -> bool {
        !self.mapq.is_nan()
    }
}

impl Display for WindowMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}",
            self.chrom, self.start, self.stop, self.depth, self.mapq
        )
    }
}

///
/// Ordered per-window metrics, ascending by window start within a chromosome
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsTable {
    rows: Vec<WindowMetrics>,
}

impl MetricsTable {
    pub fn new() -> Self {
        MetricsTable { rows: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        MetricsTable {
            rows: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, row: WindowMetrics) {
        self.rows.push(row);
    }

    /// Append every row of `other`, e.g. to collect several chromosomes in one table.
    pub fn append(&mut self, other: MetricsTable) {
        self.rows.extend(other.rows);
    }

    pub fn rows(&self) -> &[WindowMetrics] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WindowMetrics> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn windows(&self) -> Vec<Window> {
        self.rows.iter().map(WindowMetrics::window).collect()
    }

    ///
    /// Write the table as tab separated text
    ///
    /// # Arguments
    /// * `writer` - destination
    /// * `header` - emit a `chrom start stop depth mapq` header row first
    ///
    pub fn write_tsv<W: Write>(&self, writer: &mut W, header: bool) -> std::io::Result<()> {
        if header {
            writeln!(writer, "{}", METRICS_COLUMNS.join("\t"))?;
        }
        for row in self.rows.iter() {
            writeln!(writer, "{}", row)?;
        }
        writer.flush()
    }

    pub fn to_tsv(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_tsv(&mut writer, true)
    }
}

impl FromIterator<WindowMetrics> for MetricsTable {
    fn from_iter<I: IntoIterator<Item = WindowMetrics>>(iter: I) -> Self {
        MetricsTable {
            rows: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for MetricsTable {
    type Item = WindowMetrics;
    type IntoIter = std::vec::IntoIter<WindowMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

impl<'a> IntoIterator for &'a MetricsTable {
    type Item = &'a WindowMetrics;
    type IntoIter = std::slice::Iter<'a, WindowMetrics>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl Display for MetricsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MetricsTable with {} windows.", self.len())
    }
}
