// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared spec helpers: project scaffolding and daemon bootstrap.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use fcc_core::test_support::fake_compiler;

use fcc_daemon::{Config, Listener};

/// A scratch project: a temp dir holding the stand-in compiler, a
/// scratch subdirectory, and any sources a spec writes.
pub struct Project {
    dir: tempfile::TempDir,
    pub compiler: String,
    pub scratch: PathBuf,
}

impl Project {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let compiler = fake_compiler(dir.path()).display().to_string();
        let scratch = dir.path().join("scratch");
        std::fs::create_dir(&scratch).unwrap();
        Self {
            dir,
            compiler,
            scratch,
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write a source file into the project, returning its path.
    pub fn file(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Start a daemon bound to an ephemeral local port, compiling with
    /// this project's stand-in compiler.
    pub async fn spawn_daemon(&self) -> SocketAddr {
        let config = Config {
            compiler: self.compiler.clone(),
            scratch_dir: Some(self.scratch.clone()),
            ipc_timeout: Duration::from_secs(5),
        };
        let listener = Listener::bind(("127.0.0.1", 0), config).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(listener.run());
        addr
    }
}

pub const HELLO_C: &str = "int main(void) { printf(\"Hello, world!\\n\"); return 0; }\n";
