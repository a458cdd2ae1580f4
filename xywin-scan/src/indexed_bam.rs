use std::fs::File;
use std::io;
use std::path::Path;

use log::info;
use noodles::bam;
use noodles::bgzf;
use noodles::core::{self, Position, Region};
use noodles::sam;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;

use xywin_core::ScanError;
use xywin_core::consts::MISSING_MAPPING_QUALITY;

use crate::source::{AlignmentRecord, AlignmentSource, RecordIter, Reference};

type IndexedBamReader = bam::io::IndexedReader<bgzf::Reader<File>>;

///
/// Indexed BAM file read with noodles
///
/// The index is expected next to the file (`sample.bam.bai`). Create one
/// with `samtools index sample.bam`.
///
pub struct IndexedBamSource {
    reader: IndexedBamReader,
    header: sam::Header,
    references: Vec<Reference>,
}

impl IndexedBamSource {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();
        let open_error = |source: io::Error| ScanError::Open {
            path: path.display().to_string(),
            source,
        };

        let mut reader = bam::io::indexed_reader::Builder::default()
            .build_from_path(path)
            .map_err(open_error)?;
        let header: sam::Header = reader.read_header().map_err(open_error)?;

        let references: Vec<Reference> = header
            .reference_sequences()
            .iter()
            .map(|(name, sequence)| Reference::new(name.to_string(), sequence.length().get() as u64))
            .collect();

        info!(
            "Opened {} with {} reference sequences",
            path.display(),
            references.len()
        );

        Ok(IndexedBamSource {
            reader,
            header,
            references,
        })
    }

    pub fn header(&self) -> &sam::Header {
        &self.header
    }
}

impl AlignmentSource for IndexedBamSource {
    fn references(&self) -> &[Reference] {
        &self.references
    }

    fn fetch(&mut self, chrom: &str, start: u64, stop: u64) -> Result<RecordIter<'_>, ScanError> {
        let region = query_region(chrom, start, stop)?;

        let query = self
            .reader
            .query(&self.header, &region)
            .map_err(|source| ScanError::Query {
                region: format!("{}:{}-{}", chrom, start, stop),
                source,
            })?;

        Ok(Box::new(
            query.map(|result| result.and_then(|record| decode_record(&record))),
        ))
    }
}

/// 0-based half-open `[start, stop)` as a 1-based inclusive noodles region.
pub(crate) fn query_region(chrom: &str, start: u64, stop: u64) -> Result<Region, ScanError> {
    let invalid = || ScanError::InvalidRegion(format!("{}:{}-{}", chrom, start, stop));

    if stop <= start {
        return Err(invalid());
    }

    let start_pos = Position::try_from(start as usize + 1).map_err(|_| invalid())?;
    let end_pos = Position::try_from(stop as usize).map_err(|_| invalid())?;
    let interval = core::region::Interval::from(start_pos..=end_pos);

    Ok(Region::new(chrom.to_string(), interval))
}

fn decode_record(record: &bam::Record) -> io::Result<AlignmentRecord> {
    let flags = record.flags();
    let mapping_quality = record
        .mapping_quality()
        .map(u8::from)
        .unwrap_or(MISSING_MAPPING_QUALITY);
    let inferred_query_length = inferred_query_length(record.cigar().iter())?;

    Ok(AlignmentRecord {
        is_secondary: flags.is_secondary(),
        is_supplementary: flags.is_supplementary(),
        inferred_query_length,
        mapping_quality,
    })
}

///
/// Query length implied by a CIGAR: the sum of M, I, S, = and X operations
///
/// Hard clips are not counted. An empty CIGAR gives `None`.
///
pub fn inferred_query_length<I>(ops: I) -> io::Result<Option<u64>>
where
    I: IntoIterator<Item = io::Result<Op>>,
{
    let mut length = 0;
    let mut seen_op = false;

    for op in ops {
        let op = op?;
        seen_op = true;
        if consumes_query(op.kind()) {
            length += op.len() as u64;
        }
    }

    Ok(seen_op.then_some(length))
}

fn consumes_query(kind: Kind) -> bool {
    matches!(
        kind,
        Kind::Match
            | Kind::Insertion
            | Kind::SoftClip
            | Kind::SequenceMatch
            | Kind::SequenceMismatch
    )
}
