// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fcc: requester front end.
//!
//! Wraps one compiler invocation, offloading eligible single-unit
//! compiles to a farcc daemon and running everything else locally.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use clap::Parser;

mod client;

/// Offload a compiler invocation to a farcc daemon.
///
/// The wrapped command line is passed through untouched, e.g.
/// `fcc --host buildbox gcc -c main.c -o main.o`.
#[derive(Debug, Parser)]
#[command(name = "fcc", version, about)]
struct Cli {
    /// Daemon host to submit jobs to.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Daemon port.
    #[arg(long, default_value_t = fcc_wire::DEFAULT_PORT)]
    port: u16,

    /// Compiler invocation: program followed by its arguments.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
    command: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let status = client::run(&cli.host, cli.port, &cli.command).await?;
    std::process::exit(status)
}
