// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! fccd: the compile daemon entry point.

use fcc_daemon::{env, Config, Listener};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Identity and load are what a dispatcher selects this node by;
    // surface them at startup for the operator.
    match fcc_core::machine_id() {
        Ok(id) => info!(machine = %id, "node identity"),
        Err(e) => warn!("machine id unavailable: {}", e),
    }
    match fcc_core::load_average() {
        Ok(load) => info!(load, "1-minute load average"),
        Err(e) => warn!("load average unavailable: {}", e),
    }

    let listener = Listener::bind(("0.0.0.0", env::port()), Config::from_env()).await?;
    info!("listening on {}", listener.local_addr()?);
    listener.run().await;
    Ok(())
}
