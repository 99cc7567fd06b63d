use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::desktop_entry::{DesktopEntry, DesktopEntryError};
use crate::model::AppEntry;

#[derive(Debug)]
pub enum LaunchError {
    MissingDescriptor(PathBuf),
    Descriptor(DesktopEntryError),
    Spawn(String, std::io::Error),
}

impl Display for LaunchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingDescriptor(path) => {
                write!(f, "descriptor does not exist: {}", path.display())
            }
            Self::Descriptor(error) => write!(f, "descriptor error: {error}"),
            Self::Spawn(program, error) => write!(f, "failed to start '{program}': {error}"),
        }
    }
}

impl std::error::Error for LaunchError {}

impl From<DesktopEntryError> for LaunchError {
    fn from(value: DesktopEntryError) -> Self {
        Self::Descriptor(value)
    }
}

/// Application activation as the engine consumes it. Injected so the
/// engine stays free of process handling and tests can observe launches
/// without spawning anything.
pub trait AppLauncher {
    fn activate(&self, entry: &AppEntry) -> Result<(), LaunchError>;
}

/// Launches through the entry's descriptor: reads the Exec line, strips
/// field codes, and spawns the command detached.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecLauncher;

impl AppLauncher for ExecLauncher {
    fn activate(&self, entry: &AppEntry) -> Result<(), LaunchError> {
        let descriptor_path = Path::new(&entry.file_path);
        if !descriptor_path.exists() {
            return Err(LaunchError::MissingDescriptor(descriptor_path.to_path_buf()));
        }

        let descriptor = DesktopEntry::from_path(descriptor_path)?;
        let command = descriptor.launch_command(descriptor_path)?;
        spawn_detached(&command)
    }
}

fn spawn_detached(command: &str) -> Result<(), LaunchError> {
    let mut words = command.split_whitespace();
    let Some(program) = words.next() else {
        return Err(LaunchError::Spawn(
            command.to_string(),
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command"),
        ));
    };

    Command::new(program)
        .args(words)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|error| LaunchError::Spawn(program.to_string(), error))?;

    Ok(())
}
