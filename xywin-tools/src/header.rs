use std::fmt::{self, Display};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::commands::samtools_view_header;
use crate::config::ToolPaths;
use crate::errors::ToolError;
use crate::runner::ProcessRunner;

/// SAM header text of `input` as printed by `samtools view -H`.
pub fn read_header_text<R: ProcessRunner + ?Sized>(
    runner: &R,
    tools: &ToolPaths,
    input: &Path,
) -> Result<String, ToolError> {
    let output = runner.run_checked(&samtools_view_header(tools, input))?;
    Ok(output.stdout_string())
}

fn header_lines<'a>(header: &'a str, record_type: &'a str) -> impl Iterator<Item = &'a str> {
    header
        .lines()
        .filter(move |line| line.split('\t').next() == Some(record_type))
}

fn field<'a>(line: &'a str, tag: &str) -> Option<&'a str> {
    line.split('\t')
        .skip(1)
        .find_map(|f| f.strip_prefix(tag).and_then(|rest| rest.strip_prefix(':')))
}

/// Every `@RG` line, unchanged.
pub fn read_group_lines(header: &str) -> Vec<String> {
    header_lines(header, "@RG").map(str::to_string).collect()
}

/// `ID` of every `@RG` line, in header order.
pub fn read_group_ids(header: &str) -> Vec<String> {
    header_lines(header, "@RG")
        .filter_map(|line| field(line, "ID"))
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

/// `SN` of every `@SQ` line, in header order.
pub fn reference_names(header: &str) -> Vec<String> {
    header_lines(header, "@SQ")
        .filter_map(|line| field(line, "SN"))
        .map(str::to_string)
        .collect()
}

///
/// `@PG` line recording the program that rewrote a file
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PgLine {
    pub id: String,
    pub version: Option<String>,
    pub command_line: Vec<String>,
}

impl PgLine {
    pub fn new(id: impl Into<String>, version: Option<String>, command_line: Vec<String>) -> Self {
        PgLine {
            id: id.into(),
            version,
            command_line,
        }
    }

    /// Append the line to a SAM header file.
    pub fn append_to(&self, header_path: &Path) -> Result<(), ToolError> {
        let mut file = OpenOptions::new().append(true).open(header_path)?;
        writeln!(file, "{}", self)?;
        Ok(())
    }
}

impl Display for PgLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@PG\tID:{}", self.id)?;
        if let Some(version) = &self.version {
            write!(f, "\tVN:{}", version)?;
        }
        write!(f, "\tCL:{}", self.command_line.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn header() -> &'static str {
        "@HD\tVN:1.6\tSO:coordinate\n\
         @SQ\tSN:chr1\tLN:248956422\n\
         @SQ\tSN:chrX\tLN:156040895\n\
         @SQ\tSN:chrY\tLN:57227415\n\
         @RG\tID:lane1\tSM:NA12878\tPL:ILLUMINA\n\
         @RG\tSM:NA12878\tID:lane2:extra\n\
         @PG\tID:bwa\tPN:bwa\tCL:bwa mem ref.fa r1.fq r2.fq\n"
    }

    #[rstest]
    fn test_reference_names(header: &str) {
        assert_eq!(reference_names(header), vec!["chr1", "chrX", "chrY"]);
    }

    #[rstest]
    fn test_read_group_ids(header: &str) {
        assert_eq!(read_group_ids(header), vec!["lane1", "lane2:extra"]);
    }

    #[rstest]
    fn test_read_group_lines(header: &str) {
        let lines = read_group_lines(header);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "@RG\tID:lane1\tSM:NA12878\tPL:ILLUMINA");
    }

    #[rstest]
    fn test_no_read_groups() {
        assert!(read_group_ids("@HD\tVN:1.6\n@SQ\tSN:chr1\tLN:10\n").is_empty());
    }

    #[rstest]
    fn test_pg_line_with_version() {
        let pg = PgLine::new(
            "xywin",
            Some("0.1.0".to_string()),
            vec!["xywin".to_string(), "swap".to_string(), "--threads".to_string(), "4".to_string()],
        );
        assert_eq!(pg.to_string(), "@PG\tID:xywin\tVN:0.1.0\tCL:xywin swap --threads 4");
    }

    #[rstest]
    fn test_pg_line_without_version() {
        let pg = PgLine::new("xywin", None, vec!["xywin".to_string(), "swap".to_string()]);
        assert_eq!(pg.to_string(), "@PG\tID:xywin\tCL:xywin swap");
    }

    #[rstest]
    fn test_append_pg_line(header: &str) {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("header.sam");
        std::fs::write(&path, header).unwrap();

        PgLine::new("xywin", None, vec!["xywin".to_string()])
            .append_to(&path)
            .unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.ends_with("@PG\tID:bwa\tPN:bwa\tCL:bwa mem ref.fa r1.fq r2.fq\n@PG\tID:xywin\tCL:xywin\n"));
    }
}
