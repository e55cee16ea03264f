//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An isolated home directory plus a `bin/` directory for fake executables.
pub struct TestHome {
    pub temp: TempDir,
}

impl TestHome {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(temp.path().join("home")).expect("Failed to create home");
        fs::create_dir_all(temp.path().join("bin")).expect("Failed to create bin");
        Self { temp }
    }

    pub fn home(&self) -> PathBuf {
        self.temp.path().join("home")
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.temp.path().join("bin")
    }

    /// Directory used by the defaults for lock files.
    pub fn app_dir(&self) -> PathBuf {
        self.home().join(".duplicacy-util")
    }

    /// Create the default lock directory.
    pub fn create_app_dir(&self) -> PathBuf {
        let dir = self.app_dir();
        fs::create_dir_all(&dir).expect("Failed to create app dir");
        dir
    }

    /// Search path containing only the fixture `bin/` directory.
    pub fn search_path(&self) -> OsString {
        self.bin_dir().into_os_string()
    }

    /// Install a fake executable named `name` into `bin/`.
    pub fn install_binary(&self, name: &str) -> PathBuf {
        let path = self.bin_dir().join(name);
        write_executable(&path);
        path
    }

    /// Write a file relative to the home directory, creating parents.
    pub fn write_home_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.home().join(relative);
        write_file(&path, content);
        path
    }

    /// Write a file outside the home directory.
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.temp.path().join(relative);
        write_file(&path, content);
        path
    }
}

pub fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
}

#[cfg(unix)]
pub fn write_executable(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    write_file(path, "#!/bin/sh\nexit 0\n");
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .expect("Failed to set permissions");
}

#[cfg(not(unix))]
pub fn write_executable(path: &Path) {
    write_file(path, "");
}
