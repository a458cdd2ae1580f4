//! Window scans over a small indexed BAM written with noodles.

use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use noodles::bam;
use noodles::core::Position;
use noodles::csi::binning_index::Indexer;
use noodles::csi::binning_index::index::reference_sequence::bin::Chunk;
use noodles::sam;
use noodles::sam::alignment::Record as _;
use noodles::sam::alignment::RecordBuf;
use noodles::sam::alignment::io::Write as _;
use noodles::sam::alignment::record::cigar::Op;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::record::{Flags, MappingQuality};
use noodles::sam::header::record::value::Map;
use noodles::sam::header::record::value::map::ReferenceSequence;
use pretty_assertions::assert_eq;
use rstest::*;
use tempfile::{TempDir, tempdir};

use xywin_scan::{
    AlignmentSource, IndexedBamSource, MetricsTable, Reference, ScanError, ScanOptions, Silent,
    scan_chromosome,
};

fn header() -> sam::Header {
    let reference = |length: usize| {
        Map::<ReferenceSequence>::new(NonZeroUsize::new(length).expect("non-zero length"))
    };
    sam::Header::builder()
        .add_reference_sequence("chrX", reference(1000))
        .add_reference_sequence("chrY", reference(700))
        .build()
}

fn read(start: usize, cigar: &[(Kind, usize)], flags: Flags, mapq: Option<u8>) -> RecordBuf {
    let mut builder = RecordBuf::builder()
        .set_reference_sequence_id(0)
        .set_flags(flags)
        .set_alignment_start(Position::new(start).expect("1-based start"))
        .set_cigar(cigar.iter().map(|&(kind, len)| Op::new(kind, len)).collect());
    if let Some(mapq) = mapq {
        builder = builder.set_mapping_quality(MappingQuality::new(mapq).expect("valid MAPQ"));
    }
    builder.build()
}

fn write_bam(header: &sam::Header, records: &[RecordBuf]) -> io::Result<Vec<u8>> {
    let mut writer = bam::io::Writer::new(Vec::new());
    writer.write_header(header)?;
    for record in records {
        writer.write_alignment_record(header, record)?;
    }
    writer.into_inner().finish()
}

fn build_index(src: &[u8]) -> io::Result<bam::bai::Index> {
    let mut reader = bam::io::Reader::new(src);
    let header = reader.read_header()?;

    let mut indexer = Indexer::default();
    let mut chunk_start = reader.get_ref().virtual_position();
    let mut record = bam::Record::default();

    while reader.read_record(&mut record)? != 0 {
        let chunk_end = reader.get_ref().virtual_position();

        let context = match (
            record.reference_sequence_id().transpose()?,
            record.alignment_start().transpose()?,
            record.alignment_end().transpose()?,
        ) {
            (Some(id), Some(start), Some(end)) => {
                Some((id, start, end, !record.flags().is_unmapped()))
            }
            _ => None,
        };

        indexer.add_record(context, Chunk::new(chunk_start, chunk_end))?;
        chunk_start = chunk_end;
    }

    Ok(indexer.build(header.reference_sequences().len()))
}

/// `sample.bam` plus `sample.bam.bai` in a fresh directory.
struct IndexedBam {
    _dir: TempDir,
    path: PathBuf,
}

fn indexed_bam(records: &[RecordBuf]) -> IndexedBam {
    let dir = tempdir().unwrap();
    let path = dir.path().join("sample.bam");

    let header = header();
    let src = write_bam(&header, records).unwrap();
    let index = build_index(&src).unwrap();

    std::fs::write(&path, &src).unwrap();
    bam::bai::write(dir.path().join("sample.bam.bai"), &index).unwrap();

    IndexedBam { _dir: dir, path }
}

#[fixture]
fn sample() -> IndexedBam {
    let primary = Flags::default();
    indexed_bam(&[
        read(11, &[(Kind::Match, 100)], primary, Some(60)),
        read(21, &[(Kind::Match, 100)], Flags::SECONDARY, Some(5)),
        read(31, &[(Kind::Match, 100)], Flags::SUPPLEMENTARY, Some(5)),
        // [290, 300) in 0-based coordinates: touches the first window only
        read(291, &[(Kind::Match, 10)], primary, Some(40)),
        read(401, &[(Kind::Match, 30)], primary, None),
        read(701, &[(Kind::SoftClip, 10), (Kind::Match, 90)], primary, Some(30)),
        read(951, &[(Kind::Match, 50)], primary, Some(20)),
    ])
}

fn scan(path: &Path, chrom: &str) -> Result<MetricsTable, ScanError> {
    let mut source = IndexedBamSource::open(path)?;
    scan_chromosome(&mut source, chrom, &ScanOptions::new(300), &mut Silent)
}

#[rstest]
fn test_references_come_from_the_header(sample: IndexedBam) {
    let source = IndexedBamSource::open(&sample.path).unwrap();
    assert_eq!(
        source.references(),
        &[Reference::new("chrX", 1000), Reference::new("chrY", 700)]
    );
}

#[rstest]
fn test_scan_indexed_bam(sample: IndexedBam) {
    let table = scan(&sample.path, "chrX").unwrap();

    let rows: Vec<(u64, u64, f64)> = table
        .iter()
        .map(|row| (row.start, row.stop, row.depth))
        .collect();
    assert_eq!(
        rows,
        vec![
            (0, 300, 110.0 / 300.0),
            (300, 600, 30.0 / 300.0),
            (600, 900, 100.0 / 300.0),
            (900, 1200, 50.0 / 300.0),
        ]
    );

    let mapq: Vec<f64> = table.iter().map(|row| row.mapq).collect();
    // secondary and supplementary reads never enter the mean; a missing MAPQ reads as 255
    assert_eq!(mapq, vec![50.0, 255.0, 30.0, 20.0]);
}

#[rstest]
fn test_scan_reference_without_reads(sample: IndexedBam) {
    let table = scan(&sample.path, "chrY").unwrap();

    assert_eq!(table.len(), 3);
    for row in table.iter() {
        assert_eq!(row.depth, 0.0);
        assert!(row.mapq.is_nan());
    }
}

#[rstest]
fn test_scan_unknown_reference(sample: IndexedBam) {
    let result = scan(&sample.path, "chrM");
    assert!(matches!(result, Err(ScanError::UnknownReference(name)) if name == "chrM"));
}

#[rstest]
fn test_fetch_decodes_flags(sample: IndexedBam) {
    let mut source = IndexedBamSource::open(&sample.path).unwrap();

    let records: Vec<_> = source
        .fetch("chrX", 0, 300)
        .unwrap()
        .collect::<io::Result<_>>()
        .unwrap();

    let flags: Vec<(bool, bool, Option<u64>)> = records
        .iter()
        .map(|r| (r.is_secondary, r.is_supplementary, r.inferred_query_length))
        .collect();
    assert_eq!(
        flags,
        vec![
            (false, false, Some(100)),
            (true, false, Some(100)),
            (false, true, Some(100)),
            (false, false, Some(10)),
        ]
    );
}

#[rstest]
fn test_open_without_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("unindexed.bam");
    std::fs::write(&path, write_bam(&header(), &[]).unwrap()).unwrap();

    let result = IndexedBamSource::open(&path);
    assert!(matches!(result, Err(ScanError::Open { .. })));
}
