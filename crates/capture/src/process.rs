// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deadline-bounded execution in a child process.
//!
//! A thread that never touches the stdio facade cannot be stopped from
//! outside. A process can: when the deadline passes the child is killed
//! and reaped, so nothing it started keeps running.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::timeout::{ExecError, DEFAULT_TIMEOUT};

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// What a child process left behind when it exited on its own.
#[derive(Clone, Debug)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

/// Runs commands under a wall-clock deadline, killing them when it passes.
#[derive(Clone, Copy, Debug)]
pub struct ProcessExecutor {
    deadline: Duration,
}

impl Default for ProcessExecutor {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}

impl ProcessExecutor {
    pub fn new(deadline: Duration) -> Self {
        Self { deadline }
    }

    pub fn deadline(&self) -> Duration {
        self.deadline
    }

    /// Spawn `command` with piped output and no stdin, and wait for it.
    pub fn run(&self, mut command: Command) -> Result<ProcessOutput, ExecError> {
        let started = Instant::now();
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;
        // Drain both pipes while waiting so a chatty child never blocks.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match wait_until(&mut child, started + self.deadline) {
            Ok(Some(status)) => status,
            Ok(None) => {
                kill(&mut child);
                tracing::warn!(
                    deadline_ms = self.deadline.as_millis() as u64,
                    pid = child.id(),
                    "worker process exceeded its deadline; killed"
                );
                return Err(ExecError::Timeout(self.deadline));
            }
            Err(err) => {
                kill(&mut child);
                return Err(ExecError::Wait(err));
            }
        };

        Ok(ProcessOutput {
            status,
            stdout: collect(stdout),
            stderr: collect(stderr),
        })
    }
}

fn wait_until(child: &mut Child, deadline: Instant) -> std::io::Result<Option<ExitStatus>> {
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(Some(status));
        }
        if Instant::now() >= deadline {
            return Ok(None);
        }
        thread::sleep(POLL_INTERVAL);
    }
}

fn kill(child: &mut Child) {
    let _ = child.kill();
    // Reap it, so the pid is not left as a zombie.
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    let mut pipe = pipe?;
    Some(thread::spawn(move || {
        let mut bytes = Vec::new();
        let _ = pipe.read_to_end(&mut bytes);
        String::from_utf8_lossy(&bytes).into_owned()
    }))
}

fn collect(reader: Option<JoinHandle<String>>) -> String {
    reader
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
