use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use crate::model::AppEntry;

/// One node of the external application catalog, as handed over by a
/// [`CatalogSource`]. The tree is a read-only snapshot; the engine never
/// mutates it, it only rebuilds its own index from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogNode {
    App(AppEntry),
    Directory(DirectoryNode),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryNode {
    pub id: String,
    pub name: String,
    pub children: Vec<CatalogNode>,
}

impl DirectoryNode {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            children: Vec::new(),
        }
    }

    pub fn with_children(id: &str, name: &str, children: Vec<CatalogNode>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            children,
        }
    }

    pub fn push_app(&mut self, app: AppEntry) {
        self.children.push(CatalogNode::App(app));
    }

    pub fn push_directory(&mut self, dir: DirectoryNode) {
        self.children.push(CatalogNode::Directory(dir));
    }
}

/// The external desktop-entry cache as the engine consumes it. `None`
/// means the catalog is absent, which is a valid empty state rather than
/// an error.
pub trait CatalogSource {
    fn root(&self) -> Option<DirectoryNode>;
}

/// Top-level category with its own direct application children captured
/// unfiltered. Hidden-app filtering is a projection concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySnapshot {
    pub id: String,
    pub name: String,
    pub apps: Vec<AppEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogIndex {
    pub categories: Vec<CategorySnapshot>,
    pub all_apps: Vec<AppEntry>,
}

impl CatalogIndex {
    /// Walks the catalog snapshot into a flat, deduplicated index.
    ///
    /// Categories are the root's immediate directory children in native
    /// order. `all_apps` collects every application in the subtree,
    /// breadth-first, each directory fully enumerated before the next
    /// queued one; the first occurrence of an id wins, because menus
    /// commonly expose the same application under several category
    /// paths.
    pub fn rebuild(root: Option<&DirectoryNode>) -> Self {
        let Some(root) = root else {
            return Self::default();
        };

        let mut categories = Vec::new();
        for child in &root.children {
            if let CatalogNode::Directory(dir) = child {
                let apps = dir
                    .children
                    .iter()
                    .filter_map(|node| match node {
                        CatalogNode::App(app) => Some(app.clone()),
                        CatalogNode::Directory(_) => None,
                    })
                    .collect();
                categories.push(CategorySnapshot {
                    id: dir.id.clone(),
                    name: dir.name.clone(),
                    apps,
                });
            }
        }

        let mut all_apps = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<&DirectoryNode> = VecDeque::new();
        queue.push_back(root);

        while let Some(dir) = queue.pop_front() {
            for child in &dir.children {
                match child {
                    CatalogNode::App(app) => {
                        if seen.insert(app.id.clone()) {
                            all_apps.push(app.clone());
                        }
                    }
                    CatalogNode::Directory(sub) => queue.push_back(sub),
                }
            }
        }

        Self {
            categories,
            all_apps,
        }
    }

    pub fn category(&self, id: &str) -> Option<&CategorySnapshot> {
        self.categories.iter().find(|cat| cat.id == id)
    }

    pub fn find_app(&self, id: &str) -> Option<&AppEntry> {
        self.all_apps.iter().find(|app| app.id == id)
    }
}

/// In-memory catalog with a shared root, so a test can keep one handle
/// while the engine owns another and swap the tree between reloads.
#[derive(Clone, Default)]
pub struct FixtureCatalog {
    root: Rc<RefCell<Option<DirectoryNode>>>,
}

impl FixtureCatalog {
    pub fn new(root: Option<DirectoryNode>) -> Self {
        Self {
            root: Rc::new(RefCell::new(root)),
        }
    }

    pub fn set_root(&self, root: Option<DirectoryNode>) {
        *self.root.borrow_mut() = root;
    }
}

impl CatalogSource for FixtureCatalog {
    fn root(&self) -> Option<DirectoryNode> {
        self.root.borrow().clone()
    }
}
