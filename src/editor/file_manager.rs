//! Project export
//!
//! Saving never overwrites: when `cube_project.json` already exists in the
//! target directory the file is named `cube_project (1).json`,
//! `cube_project (2).json` and so on, the way browsers name downloads.

use std::fs::{self, File, OpenOptions};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::project;
use crate::project::CubeSet;

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("failed to serialize project: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes project files into one directory
pub struct FileManager {
    directory: PathBuf,
    last_saved: Option<PathBuf>,
}

impl FileManager {
    /// Save into the user's download directory, or the working directory
    /// when the platform has none
    pub fn new() -> Self {
        let directory = dirs::download_dir()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::with_directory(directory)
    }

    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            last_saved: None,
        }
    }

    /// Path written by the most recent successful save
    pub fn last_saved(&self) -> Option<&Path> {
        self.last_saved.as_deref()
    }

    /// Serialize `cubes` and write them to a new file
    pub fn save_project(&mut self, cubes: &CubeSet) -> Result<PathBuf, ProjectError> {
        let json = cubes.to_json()?;
        let path = write_new_file(&self.directory, project::FILE_NAME, |file| {
            file.write_all(json.as_bytes())?;
            file.flush()
        })?;
        self.last_saved = Some(path.clone());
        Ok(path)
    }
}

impl Default for FileManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Name of the `attempt`-th candidate: `name.ext`, then `name (1).ext`, ...
pub fn numbered_file_name(file_name: &str, attempt: usize) -> String {
    if attempt == 0 {
        return file_name.to_string();
    }
    match file_name.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() => format!("{stem} ({attempt}).{extension}"),
        _ => format!("{file_name} ({attempt})"),
    }
}

/// Create the first free candidate name in `directory` and fill it with
/// `write`. A file whose write fails is removed again.
fn write_new_file<F>(directory: &Path, file_name: &str, write: F) -> Result<PathBuf, ProjectError>
where
    F: FnOnce(&mut File) -> io::Result<()>,
{
    let mut attempt = 0;
    loop {
        let path = directory.join(numbered_file_name(file_name, attempt));
        attempt += 1;
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(ProjectError::Io { path, source }),
        };

        return match write(&mut file) {
            Ok(()) => Ok(path),
            Err(source) => {
                drop(file);
                if let Err(err) = fs::remove_file(&path) {
                    log::warn!("Could not remove partial file {}: {err}", path.display());
                }
                Err(ProjectError::Io { path, source })
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cube-editor-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_numbered_file_name() {
        assert_eq!(numbered_file_name("cube_project.json", 0), "cube_project.json");
        assert_eq!(numbered_file_name("cube_project.json", 1), "cube_project (1).json");
        assert_eq!(numbered_file_name("cube_project.json", 12), "cube_project (12).json");
        assert_eq!(numbered_file_name("README", 2), "README (2)");
        assert_eq!(numbered_file_name(".hidden", 1), ".hidden (1)");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = scratch_dir("round-trip");
        let mut manager = FileManager::with_directory(&dir);
        let cubes = CubeSet::initial();

        let path = manager.save_project(&cubes).unwrap();
        assert_eq!(path, dir.join("cube_project.json"));
        assert_eq!(manager.last_saved(), Some(path.as_path()));

        let written = std::fs::read_to_string(&path).unwrap();
        let parsed: CubeSet = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, cubes);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_never_overwrites() {
        let dir = scratch_dir("dedup");
        let mut manager = FileManager::with_directory(&dir);
        let cubes = CubeSet::initial();

        let first = manager.save_project(&cubes).unwrap();
        let second = manager.save_project(&cubes).unwrap();
        let third = manager.save_project(&cubes).unwrap();
        assert_eq!(first, dir.join("cube_project.json"));
        assert_eq!(second, dir.join("cube_project (1).json"));
        assert_eq!(third, dir.join("cube_project (2).json"));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_failed_write_leaves_no_file() {
        let dir = scratch_dir("failed-write");

        let result = write_new_file(&dir, project::FILE_NAME, |file| {
            file.write_all(b"[{\"width\":")?;
            Err(io::Error::other("No space left on device"))
        });
        match result {
            Err(ProjectError::Io { path, .. }) => assert_eq!(path, dir.join("cube_project.json")),
            other => panic!("expected io error, got {other:?}"),
        }
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);

        // The next save takes the plain name again
        let mut manager = FileManager::with_directory(&dir);
        let path = manager.save_project(&CubeSet::initial()).unwrap();
        assert_eq!(path, dir.join("cube_project.json"));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = std::env::temp_dir().join(format!("cube-editor-missing-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let mut manager = FileManager::with_directory(dir.join("nested"));

        match manager.save_project(&CubeSet::initial()) {
            Err(ProjectError::Io { path, .. }) => assert!(path.ends_with("cube_project.json")),
            other => panic!("expected io error, got {other:?}"),
        }
        assert_eq!(manager.last_saved(), None);
    }
}
