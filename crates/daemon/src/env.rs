// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::path::PathBuf;
use std::time::Duration;

/// TCP port to listen on (`FCC_PORT`).
pub fn port() -> u16 {
    std::env::var("FCC_PORT")
        .ok()
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(fcc_wire::DEFAULT_PORT)
}

/// Compiler jobs are replayed against (`FCC_COMPILER`).
pub fn compiler() -> String {
    std::env::var("FCC_COMPILER")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "cc".to_string())
}

/// Directory for materialized units and objects (`FCC_SCRATCH_DIR`).
/// `None` means the system temp directory.
pub fn scratch_dir() -> Option<PathBuf> {
    std::env::var("FCC_SCRATCH_DIR").ok().filter(|s| !s.is_empty()).map(PathBuf::from)
}

/// Bound on receiving a complete job or sending a result
/// (`FCC_IPC_TIMEOUT_MS`, default 30s). Guards against slow or stalled
/// senders holding handler tasks open.
pub fn ipc_timeout() -> Duration {
    std::env::var("FCC_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(30))
}
