// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for the job/result exchange.
//!
//! Wire format: 4-byte length prefix (big-endian) + bincode payload.
//! One connection carries exactly one CompileJob request and one
//! CompileResult response; there is no chunking or pipelining.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod wire;

pub use wire::{decode, encode, read_message, write_message, ProtocolError, MAX_FRAME_LEN};
pub use wire::{read_job, read_result, write_job, write_result};

/// Default TCP port daemons listen on for job submission.
pub const DEFAULT_PORT: u16 = 17878;
