//! Capability-based file access for catalogue and plan files.
//!
//! Paths are UTF-8 and opened through `cap-std` ambient authority rather than
//! `std::fs`, so every file the crate touches goes through one place.

use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8};

/// Open `path` for reading.
pub fn open_utf8_file(path: &Utf8Path) -> io::Result<fs_utf8::File> {
    fs_utf8::File::open_ambient(path, ambient_authority())
}

/// Read the whole of `path` as UTF-8 text.
pub fn read_to_string(path: &Utf8Path) -> io::Result<String> {
    let mut file = open_utf8_file(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Whether `path` exists and is a regular file.
///
/// A missing parent directory counts as "not a file" rather than an error.
pub fn is_regular_file(path: &Utf8Path) -> io::Result<bool> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_str().is_empty() => parent,
        _ => Utf8Path::new("."),
    };
    let Some(name) = path.file_name() else {
        return Ok(false);
    };
    let dir = match fs_utf8::Dir::open_ambient_dir(parent, ambient_authority()) {
        Ok(dir) => dir,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };
    match dir.metadata(name) {
        Ok(meta) => Ok(meta.is_file()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use rstest::rstest;
    use std::io::Write;
    use tempfile::TempDir;

    fn utf8(dir: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("temp dir is UTF-8")
    }

    #[rstest]
    fn reads_file_contents() {
        let dir = TempDir::new().expect("temp dir");
        let path = utf8(&dir).join("cities.json");
        let mut file = std::fs::File::create(&path).expect("create file");
        file.write_all(b"[]").expect("write file");

        assert_eq!(read_to_string(&path).expect("read file"), "[]");
        assert!(is_regular_file(&path).expect("stat file"));
    }

    #[rstest]
    fn directories_and_missing_paths_are_not_files() {
        let dir = TempDir::new().expect("temp dir");
        let root = utf8(&dir);
        assert!(!is_regular_file(&root).expect("stat dir"));
        assert!(!is_regular_file(&root.join("absent.json")).expect("stat missing"));
        assert!(!is_regular_file(&root.join("absent/nested.json")).expect("stat missing parent"));
    }
}
