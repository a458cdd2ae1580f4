use std::io;

use xywin_core::ScanError;

///
/// The parts of an alignment the window metrics depend on
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    pub is_secondary: bool,
    pub is_supplementary: bool,
    /// Number of query bases consumed by the alignment; `None` without a CIGAR.
    pub inferred_query_length: Option<u64>,
    pub mapping_quality: u8,
}

impl AlignmentRecord {
    pub fn primary(inferred_query_length: u64, mapping_quality: u8) -> Self {
        AlignmentRecord {
            is_secondary: false,
            is_supplementary: false,
            inferred_query_length: Some(inferred_query_length),
            mapping_quality,
        }
    }

    pub fn secondary(mut self) -> Self {
        self.is_secondary = true;
        self
    }

    pub fn supplementary(mut self) -> Self {
        self.is_supplementary = true;
        self
    }

    pub fn without_length(mut self) -> Self {
        self.inferred_query_length = None;
        self
    }

    /// Neither secondary nor supplementary.
    pub fn is_primary(&self) -> bool {
        !self.is_secondary && !self.is_supplementary
    }
}

/// A reference sequence as declared in an alignment file header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub length: u64,
}

impl Reference {
    pub fn new(name: impl Into<String>, length: u64) -> Self {
        Reference {
            name: name.into(),
            length,
        }
    }
}

pub type RecordIter<'a> = Box<dyn Iterator<Item = io::Result<AlignmentRecord>> + 'a>;

///
/// Anything that can list its references and return the records overlapping
/// a region
///
/// Queries take `&mut self` because file backed sources move a read cursor;
/// a source must not be queried again while a previous [`RecordIter`] is alive.
///
pub trait AlignmentSource {
    fn references(&self) -> &[Reference];

    /// Records overlapping the half-open, 0-based interval `[start, stop)` on `chrom`.
    fn fetch(&mut self, chrom: &str, start: u64, stop: u64) -> Result<RecordIter<'_>, ScanError>;
}

///
/// Length of `chrom` as recorded in the source's reference dictionary
///
pub fn chromosome_length<S: AlignmentSource + ?Sized>(
    source: &S,
    chrom: &str,
) -> Result<u64, ScanError> {
    source
        .references()
        .iter()
        .find(|reference| reference.name == chrom)
        .map(|reference| reference.length)
        .ok_or_else(|| ScanError::UnknownReference(chrom.to_string()))
}
