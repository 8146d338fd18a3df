// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy for the compile pipeline.

use std::path::PathBuf;

use thiserror::Error;

use crate::exec::ExecResult;

/// Errors from the core pipeline and node primitives.
///
/// A compiler that launches and exits non-zero is not an error here:
/// that outcome travels as data in an [`ExecResult`], the same way a
/// local build reports it.
#[derive(Debug, Error)]
pub enum Error {
    /// No input source argument could be identified in the argv.
    #[error("no input file in compiler invocation")]
    MalformedInvocation,

    /// Scratch-file name retries exceeded.
    #[error("scratch name retries exhausted in {}", dir.display())]
    ResourceExhausted { dir: PathBuf },

    /// The external program could not be started at all.
    #[error("failed to launch {program}: {source}")]
    ProcessLaunch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The preprocessor exited non-zero; the unit must not ship.
    #[error("preprocessing failed with status {}", exec.status)]
    PreprocessFailed { exec: ExecResult },

    /// The compiler exited zero but produced no output file.
    #[error("compiler exited 0 but {} was not produced", path.display())]
    MissingObject { path: PathBuf },

    /// The host exposes no usable network interface.
    #[error("no usable network interface for a machine id")]
    NoIdentity,

    /// The platform does not expose a load average.
    #[error("load average unavailable")]
    LoadUnavailable,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
