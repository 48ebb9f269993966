//! Scripted stand-in engines for tests.

use crate::OpponentConfig;
use tempfile::TempDir;

/// A minimal UCI engine as a shell script, always replying with the
/// given move.
pub fn fake_engine(reply: &str) -> String {
    format!(
        r#"#!/bin/sh
while IFS= read -r line; do
  case "$line" in
    uci) printf 'id name FakeEngine\nuciok\n';;
    isready) echo readyok;;
    go*) echo "bestmove {reply}";;
    quit) exit 0;;
  esac
done
"#
    )
}

/// An engine that completes the handshake but never answers `go`.
pub fn silent_engine() -> String {
    r#"#!/bin/sh
while IFS= read -r line; do
  case "$line" in
    uci) printf 'id name SilentEngine\nuciok\n';;
    isready) echo readyok;;
    quit) exit 0;;
  esac
done
"#
    .to_string()
}

/// Writes the script into a fresh temp directory and returns a config
/// pointing at it. The directory must stay alive for the test's duration.
pub fn test_config(script: String) -> (TempDir, OpponentConfig) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("engine.sh");
    std::fs::write(&path, script).expect("write engine script");

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
            .expect("mark engine script executable");
    }

    let config = OpponentConfig {
        engine_path: path.to_string_lossy().into_owned(),
        ..OpponentConfig::default()
    };
    (dir, config)
}
