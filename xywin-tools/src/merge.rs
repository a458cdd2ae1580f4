use std::path::{Path, PathBuf};

use log::info;

use crate::commands::{sambamba_index, sambamba_merge as sambamba_merge_command};
use crate::config::ToolPaths;
use crate::errors::ToolError;
use crate::runner::ProcessRunner;

///
/// Merge BAM files into `<output_prefix>.merged.bam` with sambamba and index
/// the result
///
/// `output_prefix` may carry a directory. Returns the merged path.
///
pub fn sambamba_merge<R, P>(
    runner: &R,
    tools: &ToolPaths,
    bams: &[P],
    output_prefix: &str,
) -> Result<PathBuf, ToolError>
where
    R: ProcessRunner + ?Sized,
    P: AsRef<Path>,
{
    if bams.is_empty() {
        return Err(ToolError::InvalidRequest(
            "no input files to merge".to_string(),
        ));
    }

    let merged = PathBuf::from(format!("{}.merged.bam", output_prefix));
    runner.run_checked(&sambamba_merge_command(tools, &merged, bams))?;
    runner.run_checked(&sambamba_index(tools, &merged))?;

    info!("Merged {} file(s) into {}", bams.len(), merged.display());
    Ok(merged)
}
