use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Unknown reference sequence: {0}")]
    UnknownReference(String),

    #[error("Window size must be positive and every window stop must fit in a u64")]
    InvalidWindowSize,

    #[error("Record without an inferred query length in window {chrom}:{start}-{stop}")]
    MalformedRecord { chrom: String, start: u64, stop: u64 },

    #[error("Can't open alignment file {path}: {source}")]
    Open {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid region {0}")]
    InvalidRegion(String),

    #[error("Can't query region {region}: {source}")]
    Query {
        region: String,
        source: std::io::Error,
    },

    #[error("Can't decode record in region {region}: {source}")]
    Record {
        region: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
