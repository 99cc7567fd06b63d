use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum DesktopEntryError {
    Io(PathBuf, std::io::Error),
    MissingExec(PathBuf),
}

impl Display for DesktopEntryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, error) => {
                write!(f, "could not read {}: {error}", path.display())
            }
            Self::MissingExec(path) => {
                write!(f, "{} has no usable Exec line", path.display())
            }
        }
    }
}

impl std::error::Error for DesktopEntryError {}

/// The subset of a `.desktop` descriptor the menu consumes, read from
/// the `[Desktop Entry]` group only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesktopEntry {
    pub name: Option<String>,
    pub icon: Option<String>,
    pub exec: Option<String>,
    pub entry_type: Option<String>,
    pub no_display: bool,
    pub categories: Vec<String>,
}

impl DesktopEntry {
    pub fn from_path(path: &Path) -> Result<Self, DesktopEntryError> {
        let content = fs::read_to_string(path)
            .map_err(|error| DesktopEntryError::Io(path.to_path_buf(), error))?;
        Ok(Self::parse(&content))
    }

    /// Line-based keyfile read. Unknown keys and other groups are
    /// ignored; missing fields stay `None`.
    pub fn parse(content: &str) -> Self {
        let mut entry = Self::default();
        let mut in_entry_group = false;

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if line.starts_with('[') {
                in_entry_group = line == "[Desktop Entry]";
                continue;
            }
            if !in_entry_group {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "Name" => entry.name = Some(value.to_string()),
                "Icon" => entry.icon = Some(value.to_string()),
                "Exec" => entry.exec = Some(value.to_string()),
                "Type" => entry.entry_type = Some(value.to_string()),
                "NoDisplay" => entry.no_display = value.eq_ignore_ascii_case("true"),
                "Categories" => {
                    entry.categories = value
                        .split(';')
                        .map(str::trim)
                        .filter(|part| !part.is_empty())
                        .map(str::to_string)
                        .collect();
                }
                _ => {}
            }
        }

        entry
    }

    pub fn is_application(&self) -> bool {
        self.entry_type.as_deref() == Some("Application")
    }

    /// The cleaned launch command, or an error when the descriptor has
    /// no usable Exec line.
    pub fn launch_command(&self, path: &Path) -> Result<String, DesktopEntryError> {
        self.exec
            .as_deref()
            .and_then(clean_exec)
            .ok_or_else(|| DesktopEntryError::MissingExec(path.to_path_buf()))
    }
}

/// Strips `%`-style field codes and surrounding quotes from an Exec
/// line, leaving the bare command. Returns `None` when nothing remains.
pub fn clean_exec(exec: &str) -> Option<String> {
    let truncated = match exec.find('%') {
        Some(position) => &exec[..position],
        None => exec,
    };

    let mut trimmed = truncated.trim();
    if trimmed.starts_with('"') || trimmed.starts_with('\'') {
        let quote = trimmed.chars().next()?;
        trimmed = &trimmed[1..];
        if trimmed.ends_with(quote) {
            trimmed = &trimmed[..trimmed.len() - 1];
        }
        trimmed = trimmed.trim();
    }

    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
