use std::collections::HashSet;
use std::path::PathBuf;

use walkdir::WalkDir;
use xdg::BaseDirectories;

use crate::catalog::{CatalogSource, DirectoryNode};
use crate::desktop_entry::DesktopEntry;
use crate::model::AppEntry;

const FALLBACK_ICON: &str = "application-x-executable";
const MAX_SCAN_DEPTH: usize = 4;

/// Freedesktop main categories in display order. An application lands
/// in the first group its Categories list names; everything else goes
/// to the trailing fallback group.
const CATEGORY_GROUPS: [(&str, &str); 11] = [
    ("AudioVideo", "Sound & Video"),
    ("Development", "Programming"),
    ("Education", "Education"),
    ("Game", "Games"),
    ("Graphics", "Graphics"),
    ("Network", "Internet"),
    ("Office", "Office"),
    ("Science", "Science"),
    ("Settings", "Preferences"),
    ("System", "System Tools"),
    ("Utility", "Accessories"),
];

const OTHER_GROUP: (&str, &str) = ("Other", "Other");

/// Catalog source backed by `.desktop` files on disk, grouped into
/// top-level categories the way a classic applications menu lays them
/// out.
pub struct DesktopFileCatalog {
    roots: Vec<PathBuf>,
}

impl DesktopFileCatalog {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Scans the `applications/` directories of the XDG data dirs, the
    /// user's data home first so per-user descriptors shadow system
    /// ones.
    pub fn system_default() -> Self {
        let base = BaseDirectories::new();
        let mut roots = Vec::new();
        if let Some(data_home) = base.get_data_home() {
            roots.push(data_home.join("applications"));
        }
        for dir in base.get_data_dirs() {
            roots.push(dir.join("applications"));
        }
        Self { roots }
    }
}

impl CatalogSource for DesktopFileCatalog {
    fn root(&self) -> Option<DirectoryNode> {
        if !self.roots.iter().any(|root| root.is_dir()) {
            return None;
        }
        Some(scan_roots(&self.roots))
    }
}

fn scan_roots(roots: &[PathBuf]) -> DirectoryNode {
    let mut seen: HashSet<String> = HashSet::new();
    let mut groups: Vec<(&str, &str, Vec<AppEntry>)> = CATEGORY_GROUPS
        .iter()
        .map(|(key, label)| (*key, *label, Vec::new()))
        .collect();
    groups.push((OTHER_GROUP.0, OTHER_GROUP.1, Vec::new()));

    for root in roots {
        for entry in WalkDir::new(root)
            .max_depth(MAX_SCAN_DEPTH)
            .follow_links(true)
            .into_iter()
            .filter_map(|entry| entry.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("desktop") {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            let Ok(descriptor) = DesktopEntry::from_path(path) else {
                continue;
            };
            if !descriptor.is_application() || descriptor.no_display {
                continue;
            }
            if !seen.insert(file_name.to_string()) {
                continue;
            }

            let name = descriptor
                .name
                .clone()
                .unwrap_or_else(|| file_name.trim_end_matches(".desktop").to_string());
            let icon = descriptor
                .icon
                .clone()
                .unwrap_or_else(|| FALLBACK_ICON.to_string());
            let app = AppEntry::from_owned(
                file_name.to_string(),
                name,
                icon,
                path.to_string_lossy().into_owned(),
            );

            let group_key = main_category(&descriptor.categories);
            if let Some(group) = groups.iter_mut().find(|group| group.0 == group_key) {
                group.2.push(app);
            }
        }
    }

    let mut root = DirectoryNode::new("applications", "Applications");
    for (key, label, mut apps) in groups {
        if apps.is_empty() {
            continue;
        }
        apps.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        let mut dir = DirectoryNode::new(key, label);
        for app in apps {
            dir.push_app(app);
        }
        root.push_directory(dir);
    }
    root
}

fn main_category(categories: &[String]) -> &'static str {
    for category in categories {
        for &(key, _) in CATEGORY_GROUPS.iter() {
            if key == category.as_str() {
                return key;
            }
        }
    }
    OTHER_GROUP.0
}
