//! Recording helper for persisting fetched CSV bodies as test fixtures.
//! Compiled only when the `test-mode` feature is enabled.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub(crate) fn fixture_dir() -> PathBuf {
    env::var("ESG_FIXDIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"))
}

/// Writes `body` to `<fixture_dir>/<name>`, creating the directory if needed.
pub(crate) fn record_fixture(name: &str, body: &str) -> Result<PathBuf, std::io::Error> {
    let dir = fixture_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(name);
    fs::write(&path, body)?;
    Ok(path)
}
