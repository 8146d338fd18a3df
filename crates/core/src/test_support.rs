// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers shared across crates: hermetic stand-in compilers.
//!
//! The stand-in speaks just enough of the cc flag grammar for the
//! pipeline (`-E`, `-c`, `-o <path>`, one positional input) so suites
//! run without a real toolchain installed. Inputs containing
//! `PREP_ERROR` fail preprocessing; inputs containing `SYNTAX_ERROR`
//! fail compilation.

use std::path::{Path, PathBuf};

/// Shell stand-in for `cc`.
///
/// `-E` prepends a linemarker and copies the input to `-o`; `-c` writes
/// an `ELFOBJ:`-stamped object to `-o`.
const FAKE_CC: &str = r##"#!/bin/sh
mode=run; out=""; input=""
while [ $# -gt 0 ]; do
  case "$1" in
    -E) mode=pre ;;
    -c) mode=obj ;;
    -o) out="$2"; shift ;;
    -*) ;;
    *) input="$1" ;;
  esac
  shift
done
case "$mode" in
  pre)
    if grep -q PREP_ERROR "$input" 2>/dev/null; then
      echo "$input:1:1: error: unterminated #include" >&2
      exit 1
    fi
    { echo "# 1 \"$input\""; cat "$input"; } > "$out"
    ;;
  obj)
    if grep -q SYNTAX_ERROR "$input" 2>/dev/null; then
      echo "$input:1:1: error: expected expression" >&2
      exit 1
    fi
    { printf 'ELFOBJ:'; cat "$input"; } > "$out"
    ;;
esac
"##;

/// Stand-in that accepts anything, exits 0, and writes nothing.
const HOLLOW_CC: &str = "#!/bin/sh\nexit 0\n";

/// Write the stand-in compiler into `dir` and return its path.
pub fn fake_compiler(dir: &Path) -> PathBuf {
    write_script(dir, "cc.sh", FAKE_CC)
}

/// Write the do-nothing compiler into `dir` and return its path.
pub fn hollow_compiler(dir: &Path) -> PathBuf {
    write_script(dir, "hollow-cc.sh", HOLLOW_CC)
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("write stand-in compiler");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("chmod stand-in compiler");
    }
    path
}
