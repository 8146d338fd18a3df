// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collision-free scratch files under a shared temp directory.
//!
//! The scratch namespace is shared by every concurrent handler on a
//! machine; uniqueness comes from randomized names and exclusive
//! creation, not from locking.

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Hex alphabet for scratch-name tokens.
const TOKEN_ALPHABET: [char; 16] = [
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f',
];

/// Token length: 16 hex chars, 64 bits of name space.
const TOKEN_LEN: usize = 16;

/// Creation attempts before giving up. With 64 random bits a second
/// collision is already vanishingly unlikely.
const MAX_ATTEMPTS: u32 = 64;

/// An exclusively-created scratch file.
///
/// Creation never reuses or overwrites an existing name. The handle
/// owns removal: the file is deleted when it drops unless [`keep`]
/// disarms it first.
///
/// [`keep`]: ScratchFile::keep
#[derive(Debug)]
pub struct ScratchFile {
    path: PathBuf,
    keep: bool,
}

impl ScratchFile {
    /// Create `{dir}/{prefix}{token}{suffix}` with an exclusive create.
    ///
    /// `dir` defaults to the system temp directory when `None`. On a
    /// name collision a fresh token is tried, up to a fixed bound, then
    /// [`Error::ResourceExhausted`].
    pub fn create(dir: Option<&Path>, prefix: &str, suffix: &str) -> Result<Self, Error> {
        let dir = match dir {
            Some(d) => d.to_path_buf(),
            None => std::env::temp_dir(),
        };

        for _ in 0..MAX_ATTEMPTS {
            let token = nanoid::nanoid!(TOKEN_LEN, &TOKEN_ALPHABET);
            let path = dir.join(format!("{prefix}{token}{suffix}"));
            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => return Ok(Self { path, keep: false }),
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Err(Error::ResourceExhausted { dir })
    }

    /// Path of the created file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Disarm drop-removal and hand the path to the caller.
    pub fn keep(mut self) -> PathBuf {
        self.keep = true;
        self.path.clone()
    }
}

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if !self.keep {
            let _ = std::fs::remove_file(&self.path);
        }
    }
}

#[cfg(test)]
#[path = "scratch_tests.rs"]
mod tests;
