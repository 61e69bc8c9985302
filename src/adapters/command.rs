//! External command execution with a hard deadline.
//!
//! The vendor utilities are plain processes. [`CommandRunner`] is the seam
//! the sensor and fan adapters use to invoke them, so their parsing can be
//! tested against scripted output. [`ProcessRunner`] is the real thing: it
//! spawns the program directly (no shell), captures its output and kills it
//! if the call outlives the timeout.
//!
//! The deadline covers the whole call, including reading both pipes to EOF.
//! A background descendant that inherits stdout therefore cannot hold `run`
//! past the timeout.

use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};

use crate::error::CommandError;

/// How long to wait for a killed child to be reaped.
const REAP_GRACE: Duration = Duration::from_millis(500);

/// Runs one program and returns its trimmed standard output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        (**self).run(program, args)
    }
}

/// Spawns real processes, each bounded by `timeout`.
///
/// Every call builds a current-thread runtime and blocks on it, so callers
/// stay synchronous.
#[derive(Debug, Clone, Copy)]
pub struct ProcessRunner {
    timeout: Duration,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        debug!("Executing command '{} {}'", program, args.join(" "));

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CommandError::Io {
                program: program.to_string(),
                reason: e.to_string(),
            })?;
        let (status, stdout, stderr) = runtime.block_on(execute(program, args, self.timeout))?;

        if !status.success() {
            let mut output = String::from_utf8_lossy(&stdout).trim().to_string();
            let err = String::from_utf8_lossy(&stderr);
            if !err.trim().is_empty() {
                if !output.is_empty() {
                    output.push_str(" | ");
                }
                output.push_str(err.trim());
            }
            return Err(CommandError::NonZeroExit {
                program: program.to_string(),
                status: status.to_string(),
                output,
            });
        }

        String::from_utf8(stdout)
            .map(|s| s.trim().to_string())
            .map_err(|_| CommandError::InvalidOutput {
                program: program.to_string(),
            })
    }
}

/// Spawn `program`, then wait for its exit and both pipes' EOF under one
/// deadline.
async fn execute(
    program: &str,
    args: &[String],
    timeout: Duration,
) -> Result<(ExitStatus, Vec<u8>, Vec<u8>), CommandError> {
    // `kill_on_drop` covers every early return below.
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| CommandError::Spawn {
            program: program.to_string(),
            reason: e.to_string(),
        })?;

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let collect = async {
        let (status, out, err) =
            tokio::join!(child.wait(), read_stream(stdout), read_stream(stderr));
        status.map(|status| (status, out, err))
    };
    let result = tokio::time::timeout(timeout, collect).await;

    match result {
        Ok(Ok(done)) => Ok(done),
        Ok(Err(e)) => {
            kill_and_reap(program, &mut child).await;
            Err(CommandError::Io {
                program: program.to_string(),
                reason: e.to_string(),
            })
        }
        Err(_elapsed) => {
            warn!("Command '{}' exceeded {:?}, killing it", program, timeout);
            kill_and_reap(program, &mut child).await;
            Err(CommandError::TimedOut {
                program: program.to_string(),
                timeout,
            })
        }
    }
}

/// Kill `child` if it is still running and give it a moment to be reaped.
async fn kill_and_reap(program: &str, child: &mut Child) {
    // Fails when the child already exited, e.g. a descendant kept the pipes open.
    if let Err(e) = child.start_kill() {
        debug!("Could not kill '{}': {}", program, e);
    }
    match tokio::time::timeout(REAP_GRACE, child.wait()).await {
        Ok(Ok(status)) => debug!("Reaped '{}' ({})", program, status),
        Ok(Err(e)) => debug!("Could not reap '{}': {}", program, e),
        Err(_) => debug!("'{}' not reaped within {:?}", program, REAP_GRACE),
    }
}

async fn read_stream<R: AsyncRead + Unpin>(pipe: Option<R>) -> Vec<u8> {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        if let Err(e) = pipe.read_to_end(&mut buf).await {
            debug!("Pipe read failed: {}", e);
        }
    }
    buf
}
