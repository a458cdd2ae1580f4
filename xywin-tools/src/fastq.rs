use std::fs::{File, write};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::info;

use crate::commands::{
    AlignmentFormat, repair_paired, repair_single, samtools_bam2fq_paired, samtools_bam2fq_single,
    samtools_view_regions,
};
use crate::config::ToolPaths;
use crate::consts::{FULL_RG_LIST, RG_FASTQ_KEY, RG_HEADER_LINES};
use crate::errors::ToolError;
use crate::header::{read_group_ids, read_group_lines, read_header_text};
use crate::runner::ProcessRunner;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadLayout {
    Single,
    #[default]
    Paired,
}

///
/// Reads to strip from an alignment file into FASTQ
///
#[derive(Debug, Clone)]
pub struct FastqRequest {
    pub input: PathBuf,
    pub layout: ReadLayout,
    /// Receives every output, temporary files included.
    pub output_dir: PathBuf,
    pub output_prefix: String,
    /// samtools region strings; empty means the whole file.
    pub regions: Vec<String>,
}

/// FASTQ files written for one read group (one for single end, two for paired).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadGroupFastq {
    pub read_group: String,
    pub fastqs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastqOutputs {
    /// `rg<TAB>fastq[<TAB>fastq2]` per read group.
    pub rg_fastq_key: PathBuf,
    /// The input's `@RG` header lines.
    pub rg_header_lines: PathBuf,
    pub read_groups: Vec<ReadGroupFastq>,
}

///
/// Strip the reads in `request.regions` to repaired, name-sorted FASTQ files,
/// one set per read group
///
/// Per read group: `samtools view -r <rg>` into a temporary BAM, `samtools
/// bam2fq`, then `repair.sh` to restore pairing. Also writes the read group
/// list (`full_rg.list`), the `@RG` lines (`header_lines_rg.list`) and a
/// `<rg>.txt` file holding each read group id.
///
pub fn bam_to_fastq<R: ProcessRunner + ?Sized>(
    runner: &R,
    tools: &ToolPaths,
    request: &FastqRequest,
) -> Result<FastqOutputs, ToolError> {
    let out_dir = request.output_dir.as_path();
    let header = read_header_text(runner, tools, &request.input)?;

    let read_groups = read_group_ids(&header);
    for rg in read_groups.iter() {
        check_read_group_id(rg)?;
    }
    write(out_dir.join(FULL_RG_LIST), lines_with_newlines(&read_groups))?;

    let rg_header_lines = out_dir.join(RG_HEADER_LINES);
    write(&rg_header_lines, lines_with_newlines(&read_group_lines(&header)))?;

    info!(
        "Stripping {} read group(s) from {} to FASTQ",
        read_groups.len(),
        request.input.display()
    );

    let rg_fastq_key = out_dir.join(RG_FASTQ_KEY);
    let mut key_writer = BufWriter::new(File::create(&rg_fastq_key)?);
    let mut outputs = Vec::with_capacity(read_groups.len());

    let temp_bam = out_dir.join("temp.bam");
    for rg in read_groups.iter() {
        write(out_dir.join(format!("{}.txt", rg)), rg)?;

        runner.run_checked(&samtools_view_regions(
            tools,
            &request.input,
            &temp_bam,
            &request.regions,
            Some(rg.as_str()),
            AlignmentFormat::Bam,
        ))?;

        let fastqs = match request.layout {
            ReadLayout::Paired => extract_paired(runner, tools, request, &temp_bam, rg)?,
            ReadLayout::Single => extract_single(runner, tools, request, &temp_bam, rg)?,
        };

        let columns: Vec<String> = fastqs.iter().map(|p| p.display().to_string()).collect();
        writeln!(key_writer, "{}\t{}", rg, columns.join("\t"))?;

        info!("Wrote {} FASTQ file(s) for read group {}", fastqs.len(), rg);
        outputs.push(ReadGroupFastq {
            read_group: rg.clone(),
            fastqs,
        });
    }
    key_writer.flush()?;

    Ok(FastqOutputs {
        rg_fastq_key,
        rg_header_lines,
        read_groups: outputs,
    })
}

fn extract_paired<R: ProcessRunner + ?Sized>(
    runner: &R,
    tools: &ToolPaths,
    request: &FastqRequest,
    temp_bam: &Path,
    rg: &str,
) -> Result<Vec<PathBuf>, ToolError> {
    let out_dir = request.output_dir.as_path();
    let temp_1 = out_dir.join("temp_1.fastq");
    let temp_2 = out_dir.join("temp_2.fastq");
    let out_1 = out_dir.join(format!("{}_{}_1.fastq", request.output_prefix, rg));
    let out_2 = out_dir.join(format!("{}_{}_2.fastq", request.output_prefix, rg));

    runner.run_checked(&samtools_bam2fq_paired(tools, temp_bam, &temp_1, &temp_2))?;
    runner.run_checked(&repair_paired(tools, &temp_1, &temp_2, &out_1, &out_2))?;

    Ok(vec![out_1, out_2])
}

fn extract_single<R: ProcessRunner + ?Sized>(
    runner: &R,
    tools: &ToolPaths,
    request: &FastqRequest,
    temp_bam: &Path,
    rg: &str,
) -> Result<Vec<PathBuf>, ToolError> {
    let out_dir = request.output_dir.as_path();
    let temp = out_dir.join("temp.fastq");
    let out = out_dir.join(format!("{}_{}.fastq", request.output_prefix, rg));

    runner.run_checked(&samtools_bam2fq_single(tools, temp_bam, &temp))?;
    runner.run_checked(&repair_single(tools, &temp, &out))?;

    Ok(vec![out])
}

/// Read group ids end up in file names, so they must stay inside the output directory.
fn check_read_group_id(rg: &str) -> Result<(), ToolError> {
    if rg == "." || rg == ".." || rg.contains(['/', '\\']) {
        return Err(ToolError::InvalidRequest(format!(
            "read group id {:?} can't be used in a file name",
            rg
        )));
    }
    Ok(())
}

fn lines_with_newlines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}
