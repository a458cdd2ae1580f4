use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use log::debug;

use crate::errors::ToolError;

///
/// One external program call: the program, its argument list and where
/// stdout goes
///
/// Arguments are passed to the program as-is; nothing is interpreted by a
/// shell.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    /// Write stdout to this file instead of capturing it.
    pub stdout: Option<PathBuf>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Invocation {
            program: program.into(),
            args: Vec::new(),
            stdout: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn stdout_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    /// File name of the program, e.g. `samtools` for `/opt/bin/samtools`.
    pub fn tool_name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    pub fn args_lossy(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Human readable rendering for logs; not meant to be fed to a shell.
    pub fn command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in self.args_lossy() {
            line.push(' ');
            line.push_str(&arg);
        }
        if let Some(path) = &self.stdout {
            line.push_str(&format!(" > {}", path.display()));
        }
        line
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub elapsed: Duration,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_string(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_string(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

///
/// Runs [`Invocation`]s
///
/// `run` reports whatever the process did; `run_checked` additionally turns
/// a non-zero exit into [`ToolError::InvocationFailed`].
///
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError>;

    fn run_checked(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        let output = self.run(invocation)?;
        if output.success() {
            return Ok(output);
        }
        Err(ToolError::InvocationFailed {
            tool: invocation.tool_name(),
            args: invocation.args_lossy(),
            exit_code: output.exit_code,
            stderr: output.stderr_string(),
        })
    }
}

/// Spawns real processes with [`std::process::Command`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<ToolOutput, ToolError> {
        debug!("Running {}", invocation.command_line());

        let mut command = Command::new(&invocation.program);
        command.args(&invocation.args);
        if let Some(path) = &invocation.stdout {
            command.stdout(Stdio::from(File::create(path)?));
        }

        let started = Instant::now();
        let output = command.output().map_err(|source| ToolError::Spawn {
            tool: invocation.tool_name(),
            source,
        })?;
        let elapsed = started.elapsed();

        debug!(
            "{} finished with {:?} in {:.2}s",
            invocation.tool_name(),
            output.status.code(),
            elapsed.as_secs_f64()
        );

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_invocation_builder() {
        let invocation = Invocation::new("/opt/bin/samtools")
            .arg("view")
            .args(["-H", "in file.bam"])
            .stdout_to("/tmp/header.sam");

        assert_eq!(invocation.tool_name(), "samtools");
        assert_eq!(invocation.args_lossy(), vec!["view", "-H", "in file.bam"]);
        assert_eq!(
            invocation.command_line(),
            "/opt/bin/samtools view -H in file.bam > /tmp/header.sam"
        );
    }

    #[rstest]
    fn test_system_runner_captures_stdout() {
        let output = SystemRunner
            .run_checked(&Invocation::new("echo").args(["chrX", "chrY"]))
            .unwrap();

        assert!(output.success());
        assert_eq!(output.stdout_string(), "chrX chrY\n");
    }

    #[rstest]
    fn test_system_runner_arguments_are_not_shell_expanded() {
        let output = SystemRunner
            .run_checked(&Invocation::new("echo").arg("$HOME; rm -rf *"))
            .unwrap();

        assert_eq!(output.stdout_string(), "$HOME; rm -rf *\n");
    }

    #[rstest]
    fn test_system_runner_redirects_stdout() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("out.txt");

        let output = SystemRunner
            .run_checked(&Invocation::new("echo").arg("@HD").stdout_to(&path))
            .unwrap();

        assert!(output.stdout.is_empty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "@HD\n");
    }

    #[rstest]
    fn test_run_checked_reports_exit_code() {
        let invocation = Invocation::new("sh").args(["-c", "echo broken >&2; exit 3"]);

        let unchecked = SystemRunner.run(&invocation).unwrap();
        assert_eq!(unchecked.exit_code, Some(3));

        match SystemRunner.run_checked(&invocation) {
            Err(ToolError::InvocationFailed {
                tool,
                args,
                exit_code,
                stderr,
            }) => {
                assert_eq!(tool, "sh");
                assert_eq!(args, vec!["-c", "echo broken >&2; exit 3"]);
                assert_eq!(exit_code, Some(3));
                assert_eq!(stderr, "broken\n");
            }
            other => panic!("expected InvocationFailed, got {:?}", other),
        }
    }

    #[rstest]
    fn test_missing_program_is_spawn_error() {
        let result = SystemRunner.run(&Invocation::new("xywin-no-such-program-4821"));
        assert!(matches!(result, Err(ToolError::Spawn { .. })));
    }
}
