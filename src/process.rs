//! External tool invocation.
//!
//! Every stage of the pipeline drives a host tool (`tar`, `xcrun codesign`,
//! `hdiutil`). All of those invocations go through [`Cmd`], which captures
//! exit status and output and turns a nonzero exit into an error, so the
//! first failing tool halts the run with a message naming the tool and
//! the artifact it was working on.

use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Builder for a single external tool invocation.
///
/// # Example
///
/// ```rust,ignore
/// use eps_codesign::process::Cmd;
///
/// Cmd::new("tar")
///     .args(["-xf"])
///     .arg_path(Path::new("build.tar"))
///     .error_msg("tar extraction failed")
///     .run()?;
/// ```
pub struct Cmd {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    error_msg: Option<String>,
}

/// Captured output of a successful invocation.
#[derive(Debug)]
pub struct CmdOutput {
    pub stdout: String,
    pub stderr: String,
}

impl Cmd {
    pub fn new(program: &str) -> Self {
        Self {
            program: program.to_string(),
            args: Vec::new(),
            current_dir: None,
            error_msg: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append a path argument verbatim (no lossy string conversion).
    pub fn arg_path(mut self, path: &Path) -> Self {
        self.args.push(path.as_os_str().to_os_string());
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// Remediation hint included in the error when the tool fails.
    pub fn error_msg(mut self, msg: impl Into<String>) -> Self {
        self.error_msg = Some(msg.into());
        self
    }

    /// Run the tool, blocking until it exits.
    ///
    /// Returns captured stdout/stderr on exit code zero; otherwise an error
    /// carrying the tool name, exit status, and the tool's own diagnostics.
    pub fn run(self) -> Result<CmdOutput> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .with_context(|| format!("spawning '{}'", self.program))?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if output.status.success() {
            return Ok(CmdOutput { stdout, stderr });
        }

        let hint = self
            .error_msg
            .unwrap_or_else(|| format!("'{}' failed", self.program));
        bail!(
            "{}: '{}' exited with {}\n{}\n{}",
            hint,
            self.program,
            output.status,
            stdout.trim(),
            stderr.trim()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_captures_stdout() {
        let result = Cmd::new("echo").arg("hello").run().unwrap();
        assert_eq!(result.stdout.trim(), "hello");
    }

    #[test]
    fn test_nonzero_exit_is_error() {
        let err = Cmd::new("false")
            .error_msg("false always fails")
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("false always fails"));
    }

    #[test]
    fn test_missing_program_is_error() {
        let err = Cmd::new("definitely_not_a_real_command_12345")
            .run()
            .unwrap_err();
        assert!(err.to_string().contains("spawning"));
    }

    #[test]
    fn test_current_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let result = Cmd::new("pwd").current_dir(temp.path()).run().unwrap();
        let reported = std::fs::canonicalize(result.stdout.trim()).unwrap();
        let expected = std::fs::canonicalize(temp.path()).unwrap();
        assert_eq!(reported, expected);
    }
}
