use std::collections::HashMap;
use std::io;

use xywin_core::ScanError;

use crate::source::{AlignmentRecord, AlignmentSource, RecordIter, Reference};

#[derive(Debug, Clone)]
struct PlacedRecord {
    start: u64,
    end: u64,
    record: AlignmentRecord,
}

///
/// Alignment source held entirely in memory
///
/// Records are placed on `[start, end)` and returned by [`AlignmentSource::fetch`]
/// when they overlap the queried interval, ordered by start. Every query is
/// remembered so callers can inspect how a scan walked the source.
///
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    references: Vec<Reference>,
    records: HashMap<String, Vec<PlacedRecord>>,
    queries: Vec<(String, u64, u64)>,
}

impl InMemorySource {
    pub fn new(references: Vec<Reference>) -> Self {
        InMemorySource {
            references,
            records: HashMap::new(),
            queries: Vec::new(),
        }
    }

    pub fn add_record(&mut self, chrom: &str, start: u64, end: u64, record: AlignmentRecord) {
        let placed = self.records.entry(chrom.to_string()).or_default();
        placed.push(PlacedRecord { start, end, record });
        placed.sort_by_key(|p| p.start);
    }

    pub fn with_record(mut self, chrom: &str, start: u64, end: u64, record: AlignmentRecord) -> Self {
        self.add_record(chrom, start, end, record);
        self
    }

    pub fn queries(&self) -> &[(String, u64, u64)] {
        &self.queries
    }
}

impl AlignmentSource for InMemorySource {
    fn references(&self) -> &[Reference] {
        &self.references
    }

    fn fetch(&mut self, chrom: &str, start: u64, stop: u64) -> Result<RecordIter<'_>, ScanError> {
        if !self.references.iter().any(|r| r.name == chrom) {
            return Err(ScanError::UnknownReference(chrom.to_string()));
        }
        self.queries.push((chrom.to_string(), start, stop));

        let overlapping = self
            .records
            .get(chrom)
            .into_iter()
            .flatten()
            .filter(move |p| p.start < stop && p.end > start)
            .map(|p| Ok::<_, io::Error>(p.record.clone()));

        Ok(Box::new(overlapping))
    }
}
