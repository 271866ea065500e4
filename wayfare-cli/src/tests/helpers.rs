//! Test helpers for building catalogue workspaces on disk.

use camino::{Utf8Path, Utf8PathBuf};
use std::fs;
use tempfile::TempDir;

/// The bundled thirteen-city catalogue.
pub(super) const EUROPEAN_CITIES: &str = include_str!("../../data/european_cities.json");

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write fixture file");
}

/// A temporary directory holding a catalogue and any other inputs.
pub(super) struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    /// A workspace with the bundled catalogue written to `cities.json`.
    pub(super) fn with_catalogue() -> Self {
        let workspace = Self::new();
        write_utf8(&workspace.catalogue(), EUROPEAN_CITIES.as_bytes());
        workspace
    }

    pub(super) fn path(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }

    pub(super) fn catalogue(&self) -> Utf8PathBuf {
        self.path("cities.json")
    }
}
