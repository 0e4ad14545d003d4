use crate::cancel::CancelToken;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::fmt;
use std::path::Path;
use std::process::{Child, Command as StdCommand, ExitStatus};
use std::time::Duration;

/// How often a cancellable wait checks the child and the token.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Outcome of a child process that ran to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessResult {
    pub exit_code: i32,
    pub cause: Option<String>,
}

impl ProcessResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

impl From<ExitStatus> for ProcessResult {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return Self {
                exit_code: code,
                cause: None,
            };
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self {
                    exit_code: -1,
                    cause: Some(format!("terminated by signal {signal}")),
                };
            }
        }

        Self {
            exit_code: -1,
            cause: Some(format!("terminated abnormally: {status}")),
        }
    }
}

/// A child process invocation with inherited standard streams.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<String>) -> Self {
        let program = program.into();
        Self {
            inner: StdCommand::new(&program),
            program,
        }
    }

    /// Program from the first token, arguments from the rest.
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self> {
        let (program, args) = tokens.split_first().ok_or(Error::EmptyCommand)?;
        let command = Self::new(AsRef::<str>::as_ref(program));
        Ok(command.args(args.iter().map(|arg| AsRef::<str>::as_ref(arg))))
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.inner.current_dir(dir);
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn(&mut self) -> Result<Child> {
        tracing::debug!(command = %self, "spawning child process");
        self.inner.spawn().map_err(|e| Error::CommandFailed {
            cmd: self.program.clone(),
            source: e,
        })
    }

    /// Run to completion, blocking the caller.
    pub fn run(&mut self) -> Result<ProcessResult> {
        let mut child = self.spawn()?;
        let status = child.wait().map_err(|e| Error::Wait {
            cmd: self.program.clone(),
            source: e,
        })?;
        Ok(status.into())
    }

    /// Run to completion unless `cancel` fires first.
    ///
    /// On cancellation the child is killed and reaped before
    /// [`Error::Interrupted`] is returned.
    pub fn run_until(&mut self, cancel: &CancelToken) -> Result<ProcessResult> {
        let mut child = self.spawn()?;

        loop {
            match child.try_wait() {
                // A child that failed after cancellation was most likely hit by the same signal.
                Ok(Some(status)) if !status.success() && cancel.is_cancelled() => {
                    return Err(Error::Interrupted {
                        cmd: self.program.clone(),
                    });
                }
                Ok(Some(status)) => return Ok(status.into()),
                Ok(None) if cancel.is_cancelled() => {
                    tracing::warn!(program = %self.program, "cancelled, terminating child process");
                    terminate(&mut child);
                    return Err(Error::Interrupted {
                        cmd: self.program.clone(),
                    });
                }
                Ok(None) => std::thread::sleep(POLL_INTERVAL),
                Err(e) => {
                    terminate(&mut child);
                    return Err(Error::Wait {
                        cmd: self.program.clone(),
                        source: e,
                    });
                }
            }
        }
    }
}

fn terminate(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in self.inner.get_args() {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_new() {
        let cmd = Command::new("node");
        assert_eq!(cmd.program(), "node");
    }

    #[test]
    fn test_command_args() {
        let cmd = Command::new("node").arg("jsx").arg("--strip-types");
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args, ["jsx", "--strip-types"]);
    }

    #[test]
    fn test_command_arg_with_spaces_stays_one_arg() {
        let cmd = Command::new("echo").arg("hello world");
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn test_from_tokens_splits_program() {
        let cmd = Command::from_tokens(&["bin/jsx", "--extension", "js"]).unwrap();
        assert_eq!(cmd.program(), "bin/jsx");
        let args: Vec<_> = cmd.inner.get_args().collect();
        assert_eq!(args, ["--extension", "js"]);
    }

    #[test]
    fn test_from_tokens_empty() {
        let tokens: [&str; 0] = [];
        assert!(matches!(
            Command::from_tokens(&tokens),
            Err(Error::EmptyCommand)
        ));
    }

    #[test]
    fn test_command_display() {
        let cmd = Command::new("node").args(["jsx", "src", "out"]);
        assert_eq!(cmd.to_string(), "node jsx src out");
    }

    #[test]
    fn test_current_dir_is_recorded() {
        let cmd = Command::new("node").current_dir("/tmp");
        assert_eq!(cmd.inner.get_current_dir(), Some(Path::new("/tmp")));
    }

    #[test]
    fn test_missing_binary_is_a_launch_error() {
        let mut cmd = Command::new("jsxt-nonexistent-binary-12345");
        assert!(matches!(cmd.run(), Err(Error::CommandFailed { .. })));
    }

    #[test]
    fn test_process_result_success() {
        let ok = ProcessResult {
            exit_code: 0,
            cause: None,
        };
        let failed = ProcessResult {
            exit_code: 2,
            cause: None,
        };
        assert!(ok.success());
        assert!(!failed.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_exit_code_is_captured() {
        let mut cmd = Command::new("sh").args(["-c", "exit 2"]);
        let result = cmd.run().unwrap();
        assert_eq!(result.exit_code, 2);
        assert_eq!(result.cause, None);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_is_reported_as_cause() {
        let mut cmd = Command::new("sh").args(["-c", "kill -9 $$"]);
        let result = cmd.run().unwrap();
        assert_eq!(result.exit_code, -1);
        assert_eq!(result.cause.as_deref(), Some("terminated by signal 9"));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_until_completes_without_cancel() {
        let mut cmd = Command::new("sh").args(["-c", "exit 0"]);
        let result = cmd.run_until(&CancelToken::new()).unwrap();
        assert!(result.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_cancelled_wait_terminates_child() {
        let token = CancelToken::new();
        let trigger = token.clone();
        let canceller = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(100));
            trigger.cancel();
        });

        let started = std::time::Instant::now();
        let mut cmd = Command::new("sleep").arg("30");
        let result = cmd.run_until(&token);
        canceller.join().unwrap();

        assert!(matches!(result, Err(Error::Interrupted { .. })));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_after_cancel_is_interrupted() {
        let token = CancelToken::new();
        token.cancel();

        let mut cmd = Command::new("sh").args(["-c", "exit 3"]);
        let result = cmd.run_until(&token);

        assert!(matches!(result, Err(Error::Interrupted { .. })));
    }
}
