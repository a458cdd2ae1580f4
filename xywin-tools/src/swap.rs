use std::fmt::{self, Display};
use std::fs::{remove_file, write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, info, warn};

use crate::commands::{
    AlignmentFormat, sambamba_index, sambamba_view, samtools_index, samtools_merge,
    samtools_reheader, samtools_view_regions,
};
use crate::config::ToolPaths;
use crate::consts::HEADER_SAM;
use crate::errors::ToolError;
use crate::header::{PgLine, read_header_text, reference_names};
use crate::runner::ProcessRunner;

/// Tool that pulls the non-sex chromosomes out of the original file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extractor {
    #[default]
    Samtools,
    Sambamba,
}

impl FromStr for Extractor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "samtools" => Ok(Extractor::Samtools),
            "sambamba" => Ok(Extractor::Sambamba),
            _ => Err(format!("Invalid extractor: {}", s)),
        }
    }
}

impl Display for Extractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Extractor::Samtools => write!(f, "samtools"),
            Extractor::Sambamba => write!(f, "sambamba"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SwapRequest {
    /// Full alignment file whose header and non-sex chromosomes are kept.
    pub original: PathBuf,
    /// Sex chromosome reads remapped against the new reference.
    pub remapped: PathBuf,
    pub sex_chromosomes: Vec<String>,
    pub output_dir: PathBuf,
    pub output_prefix: String,
    pub pg_line: Option<PgLine>,
    pub format: AlignmentFormat,
    pub extractor: Extractor,
    pub keep_temps: bool,
}

impl SwapRequest {
    pub fn merged_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}.merged.{}",
            self.output_prefix,
            self.format.extension()
        ))
    }
}

///
/// Replace the sex chromosome reads of `request.original` with the reads in
/// `request.remapped`
///
/// The original's header (plus an optional `@PG` line) becomes the header of
/// both the reheadered remapped file and the merged result. Returns the path
/// of the indexed `<prefix>.merged.<ext>` file.
///
pub fn switch_sex_chromosomes<R: ProcessRunner + ?Sized>(
    runner: &R,
    tools: &ToolPaths,
    request: &SwapRequest,
) -> Result<PathBuf, ToolError> {
    if request.extractor == Extractor::Sambamba && request.format == AlignmentFormat::Cram {
        return Err(ToolError::Unsupported(
            "sambamba can only extract from BAM files".to_string(),
        ));
    }

    let out_dir = request.output_dir.as_path();
    let ext = request.format.extension();

    let header = read_header_text(runner, tools, &request.original)?;
    let header_path = out_dir.join(HEADER_SAM);
    write(&header_path, &header)?;
    if let Some(pg) = &request.pg_line {
        pg.append_to(&header_path)?;
    }

    let retained: Vec<String> = reference_names(&header)
        .into_iter()
        .filter(|name| !request.sex_chromosomes.contains(name))
        .collect();
    if retained.is_empty() {
        // an empty region list would make the extractor keep every record
        return Err(ToolError::InvalidRequest(format!(
            "{} has no references outside {}",
            request.original.display(),
            request.sex_chromosomes.join(", ")
        )));
    }
    info!(
        "Keeping {} reference(s) from {}; replacing {}",
        retained.len(),
        request.original.display(),
        request.sex_chromosomes.join(", ")
    );

    let reheadered = out_dir.join(format!("reheadered.temp.new.{}", ext));
    runner.run_checked(&samtools_reheader(
        tools,
        &header_path,
        &request.remapped,
        &reheadered,
    ))?;

    let no_sex = out_dir.join(format!("no_sex.{}", ext));
    match request.extractor {
        Extractor::Samtools => {
            runner.run_checked(&samtools_view_regions(
                tools,
                &request.original,
                &no_sex,
                &retained,
                None,
                request.format,
            ))?;
            runner.run_checked(&samtools_index(tools, &no_sex))?;
        }
        Extractor::Sambamba => {
            runner.run_checked(&sambamba_view(tools, &request.original, &no_sex, &retained))?;
            runner.run_checked(&sambamba_index(tools, &no_sex))?;
        }
    }

    let merged = request.merged_path();
    runner.run_checked(&samtools_merge(
        tools,
        &header_path,
        &merged,
        &[&no_sex, &reheadered],
        request.format,
    ))?;
    runner.run_checked(&samtools_index(tools, &merged))?;
    info!("Merged file written to {}", merged.display());

    if !request.keep_temps {
        remove_temporaries(&[header_path, reheadered, index_path(&no_sex), no_sex]);
    }

    Ok(merged)
}

fn index_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    match path.extension().and_then(|e| e.to_str()) {
        Some("cram") => name.push(".crai"),
        _ => name.push(".bai"),
    }
    PathBuf::from(name)
}

fn remove_temporaries(paths: &[PathBuf]) {
    for path in paths {
        match remove_file(path) {
            Ok(()) => debug!("Removed {}", path.display()),
            Err(e) => warn!("Could not remove {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("no_sex.bam", "no_sex.bam.bai")]
    #[case("no_sex.cram", "no_sex.cram.crai")]
    fn test_index_path(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(index_path(Path::new(input)), PathBuf::from(expected));
    }

    #[rstest]
    fn test_merged_path() {
        let request = SwapRequest {
            original: PathBuf::from("orig.cram"),
            remapped: PathBuf::from("remap.cram"),
            sex_chromosomes: vec!["chrX".to_string()],
            output_dir: PathBuf::from("/out"),
            output_prefix: "sample".to_string(),
            pg_line: None,
            format: AlignmentFormat::Cram,
            extractor: Extractor::Samtools,
            keep_temps: false,
        };
        assert_eq!(request.merged_path(), PathBuf::from("/out/sample.merged.cram"));
    }

    #[rstest]
    #[case("samtools", Extractor::Samtools)]
    #[case("Sambamba", Extractor::Sambamba)]
    fn test_parse_extractor(#[case] input: &str, #[case] expected: Extractor) {
        assert_eq!(input.parse::<Extractor>().unwrap(), expected);
    }
}
