// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! External process execution with combined output capture.

use std::process::{ExitStatus, Stdio};

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::Error;

/// Outcome of running an external command.
///
/// `output` holds stdout followed by stderr. Relative ordering between
/// the two streams is whatever the OS delivered, not a guarantee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecResult {
    /// Combined stdout + stderr bytes.
    pub output: Vec<u8>,
    /// Exit status: 0 on success, `128 + signo` for signal death.
    pub status: i32,
}

impl ExecResult {
    /// True when the command exited zero.
    pub fn success(&self) -> bool {
        self.status == 0
    }

    /// Output as lossy UTF-8, for logs and error text.
    pub fn output_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.output)
    }
}

/// Run `program` with `args` and capture its combined output.
///
/// A non-zero or signal-derived status is a normal outcome, returned as
/// data. `Err` means the program could not be launched at all (missing
/// binary, permission) or the wait failed.
pub async fn run_cmd(program: &str, args: &[String]) -> Result<ExecResult, Error> {
    let out = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| Error::ProcessLaunch {
            program: program.to_string(),
            source,
        })?;

    let mut output = out.stdout;
    output.extend_from_slice(&out.stderr);

    Ok(ExecResult {
        output,
        status: exit_code(out.status),
    })
}

/// Map the OS process-termination representation to one integer.
///
/// Normal exit yields the exit code; death by signal yields `128 +
/// signo`, the shell convention. Platform specifics stay behind this
/// one seam.
pub fn exit_code(status: ExitStatus) -> i32 {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(code) = status.code() {
            code
        } else if let Some(sig) = status.signal() {
            128 + sig
        } else {
            -1
        }
    }
    #[cfg(not(unix))]
    {
        status.code().unwrap_or(-1)
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
