// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Requester pipeline: preprocess locally, ship the job, and replay
//! the result as if the compiler had run here.

use std::io::Write;
use std::process::Stdio;
use std::time::Duration;

use anyhow::Context;
use fcc_core::{machine_id, preprocess, CompileJob, CompileResult, Invocation};
use tokio::net::TcpStream;

/// Bound on the whole daemon exchange, job out and result back.
const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(120);

/// Run one compiler invocation, remotely when eligible.
///
/// Link commands, multi-input invocations, and argv without a
/// recognizable input compile locally; the daemon only handles
/// single-translation-unit jobs. Transport failure also falls back to
/// a local run, while a genuine compiler failure is final and is never
/// retried elsewhere.
pub async fn run(host: &str, port: u16, command: &[String]) -> anyhow::Result<i32> {
    let (program, args) = command.split_first().context("missing compiler command")?;

    let inv = match Invocation::parse(args.iter().cloned()) {
        Ok(inv) if !inv.is_link_command() && !inv.extra_inputs() => inv,
        _ => return local_run(program, args).await,
    };

    let requester = match machine_id() {
        Ok(id) => id,
        Err(e) => {
            eprintln!("fcc: {e}; compiling locally");
            return local_run(program, args).await;
        }
    };

    // Preprocessor diagnostics mean the unit would fail identically on
    // the daemon; report them here and stop.
    let (unit, _) = match preprocess(program, &inv, None).await {
        Ok(done) => done,
        Err(fcc_core::Error::PreprocessFailed { exec }) => {
            std::io::stderr().write_all(&exec.output)?;
            return Ok(exec.status);
        }
        Err(e) => return Err(e.into()),
    };

    let source = tokio::fs::read(unit.path()).await?;
    drop(unit);

    let job = CompileJob::new(&inv, source, requester);
    match exchange(host, port, &job).await {
        Ok(result) => finish(&inv, result),
        Err(e) => {
            eprintln!("fcc: {host}:{port}: {e}; compiling locally");
            local_run(program, args).await
        }
    }
}

/// One job/result exchange over a fresh connection.
async fn exchange(
    host: &str,
    port: u16,
    job: &CompileJob,
) -> Result<CompileResult, fcc_wire::ProtocolError> {
    let stream = TcpStream::connect((host, port)).await?;
    let (mut reader, mut writer) = stream.into_split();
    fcc_wire::write_job(&mut writer, job, EXCHANGE_TIMEOUT).await?;
    fcc_wire::read_result(&mut reader, EXCHANGE_TIMEOUT).await
}

/// Replay a remote result locally: diagnostics to stderr, object bytes
/// to the path the original invocation expected.
fn finish(inv: &Invocation, result: CompileResult) -> anyhow::Result<i32> {
    std::io::stderr().write_all(&result.exec.output)?;
    if let Some(object) = result.object {
        let path = inv.output_path();
        std::fs::write(&path, object).with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(result.exec.status)
}

/// Plain local run with inherited stdio, byte-for-byte what the user
/// asked for.
async fn local_run(program: &str, args: &[String]) -> anyhow::Result<i32> {
    let status = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::inherit())
        .status()
        .await
        .with_context(|| format!("failed to launch {program}"))?;
    Ok(fcc_core::exit_code(status))
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
