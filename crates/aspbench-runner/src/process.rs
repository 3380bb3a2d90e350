//! Isolated child-process execution under a wall-clock budget.

use std::ffi::OsString;
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use aspbench_config::BenchConfig;
use wait_timeout::ChildExt;

/// How long collected output is waited for after the child is gone.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

const READ_CHUNK: usize = 64 * 1024;

/// A command line to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl ProcessSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Splits a configured command into program and leading arguments.
    pub fn from_command(command: &[String]) -> Option<Self> {
        let (program, args) = command.split_first()?;
        Some(Self::new(program).args(args))
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

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// The command line as one display string.
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How the child process ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessExit {
    /// Exited on its own. `None` when ended by a signal.
    Exited(Option<i32>),
    /// Killed after running past the budget and grace margin.
    Killed,
    /// Could not be started, or could not be waited on.
    LaunchFailed(String),
}

/// Everything observed about one child process.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub exit: ProcessExit,
    pub stdout: String,
    /// Whether output past the capture cap was discarded.
    pub truncated: bool,
    /// Wall-clock time from spawn until the child was reaped.
    pub elapsed: Duration,
}

impl ProcessOutput {
    fn launch_failed(reason: String, elapsed: Duration) -> Self {
        Self {
            exit: ProcessExit::LaunchFailed(reason),
            stdout: String::new(),
            truncated: false,
            elapsed,
        }
    }
}

/// Runs one child process at a time, killing it once the budget is spent.
///
/// # Example
///
/// ```no_run
/// use aspbench_runner::{ProcessRunner, ProcessSpec};
/// use std::time::Duration;
///
/// let runner = ProcessRunner::new(Duration::from_secs(5));
/// let output = runner.run(&ProcessSpec::new("clingo").arg("-v"));
/// println!("{:?} after {:?}", output.exit, output.elapsed);
/// ```
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
    grace: Duration,
    max_output_bytes: usize,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            grace: Duration::from_millis(500),
            max_output_bytes: 16 * 1024 * 1024,
        }
    }

    pub fn from_config(config: &BenchConfig) -> Self {
        Self::new(config.timeout())
            .with_grace(config.grace())
            .with_max_output_bytes(config.max_output_bytes)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.grace = grace;
        self
    }

    pub fn with_max_output_bytes(mut self, bytes: usize) -> Self {
        self.max_output_bytes = bytes.max(1);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Runs `spec` to completion or until `timeout + grace` has passed.
    ///
    /// Stdin and stderr are closed. Stdout is drained concurrently so a
    /// chatty child never blocks on a full pipe.
    pub fn run(&self, spec: &ProcessSpec) -> ProcessOutput {
        let mut command = Command::new(&spec.program);
        command
            .args(&spec.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null());
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }
        isolate(&mut command);

        let start = Instant::now();
        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(err) => return ProcessOutput::launch_failed(err.to_string(), start.elapsed()),
        };

        let collected = child
            .stdout
            .take()
            .map(|stdout| spawn_reader(stdout, self.max_output_bytes));

        let exit = self.wait(&mut child);
        let elapsed = start.elapsed();

        let (bytes, truncated) = collected
            .and_then(|rx| rx.recv_timeout(DRAIN_TIMEOUT).ok())
            .unwrap_or_default();

        ProcessOutput {
            exit,
            stdout: String::from_utf8_lossy(&bytes).into_owned(),
            truncated,
            elapsed,
        }
    }

    fn wait(&self, child: &mut Child) -> ProcessExit {
        match child.wait_timeout(self.timeout + self.grace) {
            Ok(Some(status)) => ProcessExit::Exited(status.code()),
            Ok(None) => {
                kill(child);
                ProcessExit::Killed
            }
            Err(err) => {
                kill(child);
                ProcessExit::LaunchFailed(err.to_string())
            }
        }
    }
}

/// Starts the child in a process group of its own.
#[cfg(unix)]
fn isolate(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(not(unix))]
fn isolate(_command: &mut Command) {}

/// Kills the child together with everything it spawned, then reaps it.
fn kill(child: &mut Child) {
    kill_group(child);
    // Either call fails only if the child is already gone.
    let _ = child.kill();
    let _ = child.wait();
}

#[cfg(unix)]
fn kill_group(child: &Child) {
    let Ok(pid) = libc::pid_t::try_from(child.id()) else {
        return;
    };
    // SAFETY: the child is not reaped yet, so `pid` still names the group
    // created for it at spawn.
    unsafe {
        libc::kill(-pid, libc::SIGKILL);
    }
}

#[cfg(not(unix))]
fn kill_group(_child: &Child) {}

/// Reads stdout to EOF, keeping at most `limit` bytes.
fn spawn_reader(mut stdout: ChildStdout, limit: usize) -> mpsc::Receiver<(Vec<u8>, bool)> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let mut kept = Vec::new();
        let mut truncated = false;
        let mut chunk = vec![0u8; READ_CHUNK];
        loop {
            match stdout.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => {
                    let room = limit.saturating_sub(kept.len());
                    if n > room {
                        truncated = true;
                    }
                    kept.extend_from_slice(&chunk[..n.min(room)]);
                }
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
        }
        let _ = tx.send((kept, truncated));
    });
    rx
}

#[cfg(all(test, unix))]
#[path = "process_tests.rs"]
mod tests;
