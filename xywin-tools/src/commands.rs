//! Argument lists for the samtools, sambamba and repair.sh calls the
//! workflows make.
use std::ffi::OsString;
use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use crate::config::ToolPaths;
use crate::runner::Invocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentFormat {
    #[default]
    Bam,
    Cram,
}

impl AlignmentFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            AlignmentFormat::Bam => "bam",
            AlignmentFormat::Cram => "cram",
        }
    }

    /// samtools `--output-fmt` value.
    pub fn samtools_name(&self) -> &'static str {
        match self {
            AlignmentFormat::Bam => "BAM",
            AlignmentFormat::Cram => "CRAM",
        }
    }
}

impl FromStr for AlignmentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bam" => Ok(AlignmentFormat::Bam),
            "cram" => Ok(AlignmentFormat::Cram),
            _ => Err(format!("Invalid alignment format: {}", s)),
        }
    }
}

impl Display for AlignmentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// `samtools view -H <input>`
pub fn samtools_view_header(tools: &ToolPaths, input: &Path) -> Invocation {
    Invocation::new(&tools.samtools)
        .args(["view", "-H"])
        .arg(input)
}

///
/// `samtools view -h -@ <t> -O <fmt> [-r <rg>] -o <output> <input> <regions..>`
///
/// With no regions every record is kept.
///
pub fn samtools_view_regions<S: AsRef<str>>(
    tools: &ToolPaths,
    input: &Path,
    output: &Path,
    regions: &[S],
    read_group: Option<&str>,
    format: AlignmentFormat,
) -> Invocation {
    let mut invocation = Invocation::new(&tools.samtools)
        .args(["view", "-h", "-@"])
        .arg(tools.threads.to_string())
        .args(["-O", format.samtools_name()]);
    if let Some(rg) = read_group {
        invocation = invocation.args(["-r", rg]);
    }
    invocation
        .arg("-o")
        .arg(output)
        .arg(input)
        .args(regions.iter().map(|r| -> &str { r.as_ref() }))
}

/// `samtools index <input>`
pub fn samtools_index(tools: &ToolPaths, input: &Path) -> Invocation {
    Invocation::new(&tools.samtools).arg("index").arg(input)
}

/// `samtools reheader -P <header> <input> > <output>`
pub fn samtools_reheader(tools: &ToolPaths, header: &Path, input: &Path, output: &Path) -> Invocation {
    Invocation::new(&tools.samtools)
        .args(["reheader", "-P"])
        .arg(header)
        .arg(input)
        .stdout_to(output)
}

/// `samtools merge -@ <t> -h <header> -O <fmt> -f <output> <inputs..>`
pub fn samtools_merge<P: AsRef<Path>>(
    tools: &ToolPaths,
    header: &Path,
    output: &Path,
    inputs: &[P],
    format: AlignmentFormat,
) -> Invocation {
    Invocation::new(&tools.samtools)
        .args(["merge", "-@"])
        .arg(tools.threads.to_string())
        .arg("-h")
        .arg(header)
        .args(["-O", format.samtools_name()])
        .arg("-f")
        .arg(output)
        .args(inputs.iter().map(|p| -> &Path { p.as_ref() }))
}

/// `samtools bam2fq -t -n -1 <fq1> -2 <fq2> <input>`
pub fn samtools_bam2fq_paired(tools: &ToolPaths, input: &Path, fq1: &Path, fq2: &Path) -> Invocation {
    Invocation::new(&tools.samtools)
        .args(["bam2fq", "-t", "-n", "-1"])
        .arg(fq1)
        .arg("-2")
        .arg(fq2)
        .arg(input)
}

/// `samtools bam2fq -t -n <input> > <fastq>`
pub fn samtools_bam2fq_single(tools: &ToolPaths, input: &Path, fastq: &Path) -> Invocation {
    Invocation::new(&tools.samtools)
        .args(["bam2fq", "-t", "-n"])
        .arg(input)
        .stdout_to(fastq)
}

/// `sambamba view -h -t <t> -f bam -o <output> <input> <regions..>`
pub fn sambamba_view<S: AsRef<str>>(
    tools: &ToolPaths,
    input: &Path,
    output: &Path,
    regions: &[S],
) -> Invocation {
    Invocation::new(&tools.sambamba)
        .args(["view", "-h", "-t"])
        .arg(tools.threads.to_string())
        .args(["-f", "bam", "-o"])
        .arg(output)
        .arg(input)
        .args(regions.iter().map(|r| -> &str { r.as_ref() }))
}

/// `sambamba merge -t <t> <output> <inputs..>`
pub fn sambamba_merge<P: AsRef<Path>>(tools: &ToolPaths, output: &Path, inputs: &[P]) -> Invocation {
    Invocation::new(&tools.sambamba)
        .args(["merge", "-t"])
        .arg(tools.threads.to_string())
        .arg(output)
        .args(inputs.iter().map(|p| -> &Path { p.as_ref() }))
}

/// `sambamba index <input>`
pub fn sambamba_index(tools: &ToolPaths, input: &Path) -> Invocation {
    Invocation::new(&tools.sambamba).arg("index").arg(input)
}

/// `repair.sh in1=<fq1> in2=<fq2> out1=<out1> out2=<out2> overwrite=true`
pub fn repair_paired(tools: &ToolPaths, fq1: &Path, fq2: &Path, out1: &Path, out2: &Path) -> Invocation {
    Invocation::new(&tools.repair_sh)
        .arg(key_value("in1", fq1))
        .arg(key_value("in2", fq2))
        .arg(key_value("out1", out1))
        .arg(key_value("out2", out2))
        .arg("overwrite=true")
}

/// `repair.sh in=<fastq> out=<out> overwrite=true`
pub fn repair_single(tools: &ToolPaths, fastq: &Path, out: &Path) -> Invocation {
    Invocation::new(&tools.repair_sh)
        .arg(key_value("in", fastq))
        .arg(key_value("out", out))
        .arg("overwrite=true")
}

fn key_value(key: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(format!("{}=", key));
    arg.push(path.as_os_str());
    arg
}
