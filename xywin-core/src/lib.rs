//! # xywin-core
//!
//! Shared models for windowed alignment QC: genomic windows, the per-window
//! metrics they produce, the table those metrics are collected in, and the
//! partitioner that splits a chromosome into windows.
//!
//! The scanner that fills the table lives in `xywin-scan`; nothing in this
//! crate touches alignment files.
pub mod consts;
pub mod errors;
pub mod models;
pub mod partition;

// re-exports
pub use errors::ScanError;
pub use models::{MetricsTable, Window, WindowMetrics};
pub use partition::{DEFAULT_LAST_WINDOW_RULE, LastWindowRule, partition_windows};
