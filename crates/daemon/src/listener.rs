// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Accept loop and per-connection job handling.
//!
//! Every accepted connection is one exchange: decode a CompileJob, run
//! the compile stage, encode a CompileResult, close. Connections run on
//! independent tasks and share no mutable state; the scratch directory
//! is shared but collision-free by construction.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use fcc_core::{compile, CompileJob, CompileResult, ExecResult, Invocation, ScratchFile};
use fcc_wire::ProtocolError;
use thiserror::Error;
use tokio::net::{TcpListener, TcpStream, ToSocketAddrs};
use tracing::{debug, error, info, warn};

use crate::env;

/// Daemon configuration, threaded into the listener rather than read
/// from process-wide switches.
#[derive(Debug, Clone)]
pub struct Config {
    /// Compiler program jobs are replayed against.
    pub compiler: String,
    /// Scratch directory; `None` means the system temp directory.
    pub scratch_dir: Option<PathBuf>,
    /// Bound on receiving a job / sending a result.
    pub ipc_timeout: Duration,
}

impl Config {
    /// Build a config from the environment.
    pub fn from_env() -> Self {
        Self {
            compiler: env::compiler(),
            scratch_dir: env::scratch_dir(),
            ipc_timeout: env::ipc_timeout(),
        }
    }
}

/// Errors from connection handling.
#[derive(Debug, Error)]
enum ConnectionError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

/// Listener accepting one-shot compile connections.
pub struct Listener {
    tcp: TcpListener,
    config: Arc<Config>,
}

impl Listener {
    /// Bind the listener.
    pub async fn bind(addr: impl ToSocketAddrs, config: Config) -> std::io::Result<Self> {
        Ok(Self {
            tcp: TcpListener::bind(addr).await?,
            config: Arc::new(config),
        })
    }

    /// Local address actually bound (ephemeral ports in tests).
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.tcp.local_addr()
    }

    /// Run the accept loop, spawning one task per connection.
    pub async fn run(self) {
        loop {
            match self.tcp.accept().await {
                Ok((stream, addr)) => {
                    debug!("connection from {}", addr);
                    let config = Arc::clone(&self.config);
                    tokio::spawn(async move {
                        if let Err(e) = handle_connection(stream, &config).await {
                            log_connection_error(e);
                        }
                    });
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
    }
}

fn log_connection_error(e: ConnectionError) {
    match e {
        ConnectionError::Protocol(ProtocolError::ConnectionClosed) => {
            debug!("client disconnected")
        }
        ConnectionError::Protocol(ProtocolError::Timeout) => {
            warn!("connection timeout")
        }
        _ => error!("connection error: {}", e),
    }
}

/// Handle one job/result exchange.
///
/// A malformed or partial job closes the connection without a response.
/// Once a job is decoded, a result is always attempted, so the
/// requester sees the compiler's diagnostics instead of a dropped
/// connection.
async fn handle_connection(stream: TcpStream, config: &Config) -> Result<(), ConnectionError> {
    let (mut reader, mut writer) = stream.into_split();

    let job = fcc_wire::read_job(&mut reader, config.ipc_timeout).await?;
    info!(job = %job.id, requester = %job.requester, "job received");

    let result = run_job(&job, config).await;
    fcc_wire::write_result(&mut writer, &result, config.ipc_timeout).await?;

    info!(job = %job.id, status = result.exec.status, "job finished");
    Ok(())
}

/// Materialize the unit, replay the compile, load the object.
///
/// Internal failures become a diagnostic CompileResult rather than a
/// dropped connection. Scratch files are owned by handles local to this
/// call, so they are removed on every exit path.
pub async fn run_job(job: &CompileJob, config: &Config) -> CompileResult {
    match try_run_job(job, config).await {
        Ok(result) => result,
        Err(e) => {
            warn!(job = %job.id, "job failed: {}", e);
            CompileResult {
                exec: ExecResult {
                    output: format!("fccd: {e}\n").into_bytes(),
                    status: -1,
                },
                object: None,
            }
        }
    }
}

async fn try_run_job(job: &CompileJob, config: &Config) -> Result<CompileResult, fcc_core::Error> {
    let inv = Invocation::parse(job.source_args.iter().cloned())?;

    let suffix = if job.source_ext.is_empty() {
        String::new()
    } else {
        format!(".{}", job.source_ext)
    };
    let unit = ScratchFile::create(config.scratch_dir.as_deref(), "fccd-", &suffix)?;
    tokio::fs::write(unit.path(), &job.source).await?;

    let (object, exec) = compile(
        &config.compiler,
        &inv,
        unit.path(),
        config.scratch_dir.as_deref(),
    )
    .await?;

    let object_bytes = if exec.success() {
        Some(tokio::fs::read(object.path()).await?)
    } else {
        None
    };

    Ok(CompileResult {
        exec,
        object: object_bytes,
    })
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
