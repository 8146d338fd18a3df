// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Node identity and load signaling.
//!
//! Consumed by an external dispatcher to pick a daemon before a job is
//! sent; nothing here selects nodes itself.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Best-effort stable per-machine fingerprint: the lexicographically
/// smallest non-empty hardware interface address on the host.
///
/// Stable across process restarts; not guaranteed unique if hardware
/// addresses collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MachineId(String);

impl MachineId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MachineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MachineId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MachineId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Derive the machine id from the host's network interfaces.
///
/// Fails with [`Error::NoIdentity`] when no interface carries a usable
/// hardware address. Never silently defaulted: a host without identity
/// is an explicit failure the caller must handle.
pub fn machine_id() -> Result<MachineId, Error> {
    #[cfg(unix)]
    {
        let addrs = nix::ifaddrs::getifaddrs().map_err(|_| Error::NoIdentity)?;
        let mut macs: Vec<String> = addrs
            .filter_map(|ifa| ifa.address)
            .filter_map(|addr| addr.as_link_addr().and_then(|link| link.addr()))
            // All-zero addresses (loopback and friends) identify nothing.
            .filter(|mac| mac.iter().any(|b| *b != 0))
            .map(|mac| format_mac(&mac))
            .collect();
        macs.sort();
        macs.into_iter().next().map(MachineId).ok_or(Error::NoIdentity)
    }
    #[cfg(not(unix))]
    {
        Err(Error::NoIdentity)
    }
}

#[cfg(unix)]
fn format_mac(mac: &[u8; 6]) -> String {
    mac.iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(":")
}

/// Read the 1-minute load average.
///
/// Dispatchers treat [`Error::LoadUnavailable`] as "exclude this node",
/// not as zero load.
pub fn load_average() -> Result<f64, Error> {
    #[cfg(target_os = "linux")]
    {
        let text = std::fs::read_to_string("/proc/loadavg").map_err(|_| Error::LoadUnavailable)?;
        text.split_whitespace()
            .next()
            .and_then(|s| s.parse().ok())
            .ok_or(Error::LoadUnavailable)
    }
    #[cfg(not(target_os = "linux"))]
    {
        Err(Error::LoadUnavailable)
    }
}

#[cfg(test)]
#[path = "node_tests.rs"]
mod tests;
