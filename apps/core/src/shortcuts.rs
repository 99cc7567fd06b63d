use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::AppEntry;

#[derive(Debug)]
pub enum ShortcutError {
    MissingDescriptor(PathBuf),
    Io(std::io::Error),
}

impl Display for ShortcutError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDescriptor(path) => {
                write!(f, "descriptor does not exist: {}", path.display())
            }
            Self::Io(error) => write!(f, "shortcut error: {error}"),
        }
    }
}

impl std::error::Error for ShortcutError {}

impl From<std::io::Error> for ShortcutError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortcutOutcome {
    Created(PathBuf),
    AlreadyExists(PathBuf),
}

/// Copies the entry's descriptor into `desktop_dir` and marks it
/// executable. An existing shortcut is left untouched.
pub fn add_to_desktop(
    entry: &AppEntry,
    desktop_dir: &Path,
) -> Result<ShortcutOutcome, ShortcutError> {
    let source = Path::new(&entry.file_path);
    if !source.is_file() {
        return Err(ShortcutError::MissingDescriptor(source.to_path_buf()));
    }

    let file_name = source
        .file_name()
        .ok_or_else(|| ShortcutError::MissingDescriptor(source.to_path_buf()))?;
    let destination = desktop_dir.join(file_name);
    if destination.exists() {
        return Ok(ShortcutOutcome::AlreadyExists(destination));
    }

    fs::create_dir_all(desktop_dir)?;
    fs::copy(source, &destination)?;
    mark_executable(&destination)?;

    Ok(ShortcutOutcome::Created(destination))
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<(), std::io::Error> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<(), std::io::Error> {
    Ok(())
}
