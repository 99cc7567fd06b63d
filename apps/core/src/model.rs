#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppEntry {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub file_path: String,
    normalized_name: String,
}

impl AppEntry {
    pub fn new(id: &str, name: &str, icon: &str, file_path: &str) -> Self {
        Self::from_owned(
            id.to_string(),
            name.to_string(),
            icon.to_string(),
            file_path.to_string(),
        )
    }

    pub fn from_owned(id: String, name: String, icon: String, file_path: String) -> Self {
        let normalized_name = normalize_for_match(&name);
        Self {
            id,
            name,
            icon,
            file_path,
            normalized_name,
        }
    }

    pub fn normalized_name(&self) -> &str {
        &self.normalized_name
    }
}

/// Lowercases a display name for case-insensitive substring matching.
/// Spacing and punctuation are preserved so a query like "studio c"
/// still matches "Visual Studio Code".
pub fn normalize_for_match(input: &str) -> String {
    input.to_lowercase()
}
