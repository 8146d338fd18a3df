// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Preprocess and compile stages of the offload pipeline.
//!
//! Preprocessing runs on the requester and folds every header into one
//! self-contained translation unit; compilation replays the original
//! flags against that unit, locally or on a remote daemon.

use std::path::Path;

use crate::error::Error;
use crate::exec::{run_cmd, ExecResult};
use crate::invocation::Invocation;
use crate::scratch::ScratchFile;

/// Prefix for scratch files created by the pipeline.
const SCRATCH_PREFIX: &str = "fcc-";

/// Run the preprocessor and capture the expanded translation unit.
///
/// The derived argv drops `-o` and `-c`, adds `-E`, and redirects into
/// a scratch file whose suffix matches the input's extension so the
/// downstream compiler infers the same front end. A non-zero exit comes
/// back as [`Error::PreprocessFailed`] carrying the diagnostics; such a
/// unit must not ship.
///
/// The returned [`ScratchFile`] belongs to the caller.
pub async fn preprocess(
    compiler: &str,
    inv: &Invocation,
    scratch_dir: Option<&Path>,
) -> Result<(ScratchFile, ExecResult), Error> {
    let unit = ScratchFile::create(scratch_dir, SCRATCH_PREFIX, &dot_ext(inv.source_ext()))?;

    let mut args = Vec::with_capacity(inv.args().len() + 3);
    let mut skip = false;
    for (i, arg) in inv.args().iter().enumerate() {
        if skip {
            skip = false;
            continue;
        }
        if Some(i) == inv.compile_only() {
            continue;
        }
        if arg == "-o" && inv.output() == Some(i + 1) {
            skip = true;
            continue;
        }
        args.push(arg.clone());
    }
    args.push("-E".to_string());
    args.push("-o".to_string());
    args.push(unit.path().display().to_string());

    let exec = run_cmd(compiler, &args).await?;
    if !exec.success() {
        return Err(Error::PreprocessFailed { exec });
    }
    Ok((unit, exec))
}

/// Replay the original flags against a preprocessed unit.
///
/// The input argument is swapped for `source` (the reason the input's
/// index is tracked rather than recognized once) and the output is
/// redirected to a fresh `.o` scratch file. A compiler error is a
/// normal outcome: the non-zero [`ExecResult`] comes back as data. A
/// zero exit without a produced object is [`Error::MissingObject`],
/// since the caller loads the object bytes next.
pub async fn compile(
    compiler: &str,
    inv: &Invocation,
    source: &Path,
    scratch_dir: Option<&Path>,
) -> Result<(ScratchFile, ExecResult), Error> {
    let object = ScratchFile::create(scratch_dir, SCRATCH_PREFIX, ".o")?;

    let mut args = inv.args().to_vec();
    args[inv.input()] = source.display().to_string();
    match inv.output() {
        Some(i) => args[i] = object.path().display().to_string(),
        None => {
            args.push("-o".to_string());
            args.push(object.path().display().to_string());
        }
    }

    let exec = run_cmd(compiler, &args).await?;
    if exec.success() && !produced(object.path()).await {
        return Err(Error::MissingObject {
            path: object.path().to_path_buf(),
        });
    }
    Ok((object, exec))
}

/// The object slot is pre-created empty by the exclusive create, so
/// "produced" means the compiler actually wrote bytes into it.
async fn produced(path: &Path) -> bool {
    tokio::fs::metadata(path).await.map(|m| m.len() > 0).unwrap_or(false)
}

fn dot_ext(ext: &str) -> String {
    if ext.is_empty() {
        String::new()
    } else {
        format!(".{ext}")
    }
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;
