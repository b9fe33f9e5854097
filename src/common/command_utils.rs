use crate::error::{Result, UpdaterError};
use log::{debug, error, info};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// A single external command invocation.
#[derive(Clone, Default)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub dir: Option<PathBuf>,
    pub envs: Vec<(String, String)>,
    /// Fed to the child's stdin. Never logged.
    pub stdin: Option<String>,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            ..Self::default()
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    pub fn secret_stdin(mut self, secret: impl Into<String>) -> Self {
        self.stdin = Some(secret.into());
        self
    }

    /// The command line as it appears in logs.
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

impl std::fmt::Debug for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandSpec")
            .field("program", &self.program)
            .field("args", &self.args)
            .field("dir", &self.dir)
            .field("envs", &self.envs)
            .field("stdin", &self.stdin.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Runs external tools on behalf of the pipeline.
///
/// Implementations block until the command finishes and return its stdout.
/// A non-zero exit status must be reported as [`UpdaterError::Command`].
pub trait CommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<Vec<u8>>;
}

/// Executes commands with `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommandRunner;

impl CommandRunner for SystemCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<Vec<u8>> {
        info!("$ {}", spec.display());

        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &spec.dir {
            command.current_dir(dir);
        }

        let output = if let Some(secret) = &spec.stdin {
            command.stdin(Stdio::piped());
            let mut child = command.spawn()?;
            if let Some(mut stdin) = child.stdin.take() {
                stdin.write_all(secret.as_bytes())?;
            }
            child.wait_with_output()?
        } else {
            command.stdin(Stdio::null()).output()?
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!("{} exited with {}", spec.program, output.status);
            log_multiline(log::Level::Error, &failure_report(&output.stdout, &stderr));
            return Err(UpdaterError::Command {
                program: spec.program.clone(),
                args: spec.args.clone(),
                status: output.status,
                stderr,
            });
        }

        debug!("Result:");
        log_multiline(log::Level::Debug, &String::from_utf8_lossy(&output.stdout));

        Ok(output.stdout)
    }
}

/// Both streams of a failed command, stdout first.
fn failure_report(stdout: &[u8], stderr: &str) -> String {
    let stdout = String::from_utf8_lossy(stdout);
    let mut report = String::new();
    if !stdout.trim().is_empty() {
        report.push_str("stdout:\n");
        report.push_str(&stdout);
        if !stdout.ends_with('\n') {
            report.push('\n');
        }
    }
    if !stderr.trim().is_empty() {
        report.push_str("stderr:\n");
        report.push_str(stderr);
    }
    report
}

/// Log each line of a multi-line string as its own record.
pub fn log_multiline(level: log::Level, text: &str) {
    for line in text.lines() {
        log::log!(level, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_args() {
        let spec = CommandSpec::new("helm").args(["repo", "update", "argo"]);
        assert_eq!(spec.display(), "helm repo update argo");
        assert_eq!(CommandSpec::new("git").display(), "git");
    }

    #[test]
    fn test_debug_redacts_stdin() {
        let spec = CommandSpec::new("docker")
            .args(["login", "quay.io"])
            .secret_stdin("hunter2");
        let rendered = format!("{:?}", spec);
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_returns_stdout() {
        let out = SystemCommandRunner
            .run(&CommandSpec::new("sh").args(["-c", "echo hello"]))
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_feeds_stdin() {
        let out = SystemCommandRunner
            .run(&CommandSpec::new("cat").secret_stdin("from-stdin"))
            .unwrap();
        assert_eq!(String::from_utf8_lossy(&out), "from-stdin");
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_reports_failure() {
        let err = SystemCommandRunner
            .run(&CommandSpec::new("sh").args(["-c", "echo boom >&2; exit 3"]))
            .unwrap_err();
        match err {
            UpdaterError::Command { program, stderr, .. } => {
                assert_eq!(program, "sh");
                assert!(stderr.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_report_keeps_both_streams() {
        let report = failure_report(b"Error: chart not found", "exit status 1\n");
        assert_eq!(
            report,
            "stdout:\nError: chart not found\nstderr:\nexit status 1\n"
        );
        assert_eq!(failure_report(b"", "boom\n"), "stderr:\nboom\n");
        assert_eq!(failure_report(b"partial\n", ""), "stdout:\npartial\n");
    }
}
