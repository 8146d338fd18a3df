// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire entities for one remote compile exchange.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exec::ExecResult;
use crate::invocation::Invocation;
use crate::node::MachineId;

/// Marker standing in for the input path in a shipped argv. The daemon
/// substitutes the path of its materialized unit before replaying.
pub const SOURCE_PLACEHOLDER: &str = "__FCC_SOURCE__";

/// Random 128-bit job identifier.
///
/// Used for tracing and correlation only, never for lookup or ordering;
/// collision resistance is whatever 122 random bits buy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for JobId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for JobId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One unit of remote work: the original argv with the input swapped
/// for [`SOURCE_PLACEHOLDER`], plus the preprocessed unit itself.
///
/// Created by the requester right after preprocessing, immutable once
/// serialized, consumed exactly once by a daemon, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileJob {
    pub id: JobId,
    pub source_args: Vec<String>,
    /// Extension of the original input, so the daemon materializes the
    /// unit with the language-bearing suffix.
    pub source_ext: String,
    /// The complete preprocessed translation unit, shipped inline; no
    /// remote filesystem access is assumed.
    pub source: Vec<u8>,
    /// Origin machine, carried for logging and accounting.
    pub requester: MachineId,
}

impl CompileJob {
    /// Package a preprocessed unit for shipping.
    pub fn new(inv: &Invocation, source: Vec<u8>, requester: MachineId) -> Self {
        let mut source_args = inv.args().to_vec();
        source_args[inv.input()] = SOURCE_PLACEHOLDER.to_string();
        Self {
            id: JobId::new(),
            source_args,
            source_ext: inv.source_ext().to_string(),
            source,
            requester,
        }
    }
}

/// Outcome of a remote compile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileResult {
    pub exec: ExecResult,
    /// Object bytes, present only when `exec` succeeded and an output
    /// file was actually produced.
    pub object: Option<Vec<u8>>,
}

#[cfg(test)]
#[path = "job_tests.rs"]
mod tests;
