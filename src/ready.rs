//! Waiting for a built environment to finish provisioning.
//!
//! The base image ships a probe command that exits successfully once the
//! provisioning script has run. [`wait_until_ready`] polls a probe at a fixed
//! interval until it reports ready, the caller cancels, or an optional bound
//! is reached.

use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use log::debug;

use crate::constants::commands;
use crate::error::{Error, Result};

/// Default delay between two probe attempts.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

/// Binary ready/not-ready signal.
pub trait ReadinessProbe {
    fn is_ready(&self) -> bool;
}

/// Runs an external program; a successful exit status means ready.
#[derive(Debug, Clone)]
pub struct CommandProbe {
    program: String,
    args: Vec<String>,
}

impl CommandProbe {
    pub fn new<S: Into<String>>(program: S, args: Vec<String>) -> Self {
        Self { program: program.into(), args }
    }
}

impl Default for CommandProbe {
    /// The finalization check of the base image.
    fn default() -> Self {
        Self::new(
            commands::PROBE_PROGRAM,
            commands::PROBE_ARGS.iter().map(|arg| arg.to_string()).collect(),
        )
    }
}

impl ReadinessProbe for CommandProbe {
    fn is_ready(&self) -> bool {
        match Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
        {
            Ok(status) => status.success(),
            Err(e) => {
                debug!("Probe '{}' could not run: {}", self.program, e);
                false
            }
        }
    }
}

/// Shared flag a caller flips to stop a wait in progress.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Polling behaviour. The default polls every 500 ms without bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitOptions {
    pub interval: Duration,
    pub timeout: Option<Duration>,
    pub max_attempts: Option<u32>,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self { interval: DEFAULT_INTERVAL, timeout: None, max_attempts: None }
    }
}

/// Polls `probe` until it reports ready and returns the number of attempts.
///
/// # Errors
/// * `Error::CancelledError` once `token` is cancelled
/// * `Error::ReadinessTimeoutError` when the timeout elapses or the attempt
///   bound is reached
pub fn wait_until_ready(
    probe: &dyn ReadinessProbe,
    options: &WaitOptions,
    token: &CancellationToken,
) -> Result<u32> {
    let started = Instant::now();
    let mut attempts = 0;

    loop {
        if token.is_cancelled() {
            return Err(Error::CancelledError);
        }

        attempts += 1;
        if probe.is_ready() {
            debug!("Environment ready after {} attempts", attempts);
            return Ok(attempts);
        }

        let attempts_exhausted = options.max_attempts.is_some_and(|max| attempts >= max);
        let timed_out = options
            .timeout
            .is_some_and(|timeout| started.elapsed() + options.interval > timeout);
        if attempts_exhausted || timed_out {
            return Err(Error::ReadinessTimeoutError { attempts });
        }

        debug!("Environment not ready (attempt {}), retrying", attempts);
        std::thread::sleep(options.interval);
    }
}
