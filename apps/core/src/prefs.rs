use std::fmt::{Display, Formatter};
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PrefsError {
    Io(std::io::Error),
}

impl Display for PrefsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(error) => write!(f, "preference file error: {error}"),
        }
    }
}

impl std::error::Error for PrefsError {}

impl From<std::io::Error> for PrefsError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Persisted membership set of application ids (favorites or hidden).
///
/// The backing file is newline-delimited, one id per line. A missing
/// file is an empty set, not an error. Every mutation saves
/// synchronously so a crash right after a toggle cannot lose the
/// preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferenceSet {
    path: PathBuf,
    header: Option<String>,
    ids: Vec<String>,
}

impl PreferenceSet {
    pub fn load(path: PathBuf) -> Self {
        let ids = read_ids(&path);
        Self {
            path,
            header: None,
            ids,
        }
    }

    /// Same as [`load`](Self::load), but `save` writes `header` as a
    /// leading `#` comment line. Comment lines are skipped on read.
    pub fn load_with_header(path: PathBuf, header: &str) -> Self {
        let ids = read_ids(&path);
        Self {
            path,
            header: Some(header.to_string()),
            ids,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|known| known == id)
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flips membership of `id` and saves. Returns whether the id is a
    /// member after the toggle. New entries go to the front, so the
    /// persisted order is most-recently-toggled-first.
    pub fn toggle(&mut self, id: &str) -> Result<bool, PrefsError> {
        let present = if let Some(position) = self.ids.iter().position(|known| known == id) {
            self.ids.remove(position);
            false
        } else {
            self.ids.insert(0, id.to_string());
            true
        };
        self.save()?;
        Ok(present)
    }

    /// Removes `id` if present and saves. Returns whether anything was
    /// removed.
    pub fn remove(&mut self, id: &str) -> Result<bool, PrefsError> {
        let Some(position) = self.ids.iter().position(|known| known == id) else {
            return Ok(false);
        };
        self.ids.remove(position);
        self.save()?;
        Ok(true)
    }

    pub fn save(&self) -> Result<(), PrefsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut data = String::new();
        if let Some(header) = &self.header {
            data.push_str(&format!("# {header}\n"));
        }
        for id in &self.ids {
            data.push_str(id);
            data.push('\n');
        }
        fs::write(&self.path, data)?;
        Ok(())
    }
}

fn read_ids(path: &PathBuf) -> Vec<String> {
    let Ok(content) = fs::read_to_string(path) else {
        return Vec::new();
    };

    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}
