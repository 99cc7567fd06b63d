use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use panelmenu_core::catalog::{CatalogIndex, CatalogSource};
use panelmenu_core::desktop_files::DesktopFileCatalog;

fn scratch_dir(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be valid")
        .as_nanos();
    std::env::temp_dir().join(format!("panelmenu-desktop-files-{label}-{unique}"))
}

fn write_descriptor(dir: &Path, file_name: &str, body: &str) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(dir.join(file_name), body).unwrap();
}

#[test]
fn scan_groups_applications_by_main_category() {
    let root = scratch_dir("groups");
    write_descriptor(
        &root,
        "vlc.desktop",
        "[Desktop Entry]\nType=Application\nName=VLC\nIcon=vlc\nExec=vlc %U\nCategories=AudioVideo;Player;\n",
    );
    write_descriptor(
        &root,
        "gimp.desktop",
        "[Desktop Entry]\nType=Application\nName=GIMP\nExec=gimp\nCategories=Graphics;\n",
    );
    write_descriptor(
        &root,
        "odd-tool.desktop",
        "[Desktop Entry]\nType=Application\nName=Odd Tool\nExec=odd-tool\n",
    );

    let catalog = DesktopFileCatalog::new(vec![root.clone()]);
    let tree = catalog.root().expect("catalog root should exist");
    let index = CatalogIndex::rebuild(Some(&tree));

    let names: Vec<&str> = index
        .categories
        .iter()
        .map(|cat| cat.name.as_str())
        .collect();
    assert_eq!(names, vec!["Sound & Video", "Graphics", "Other"]);

    let video = index.category("AudioVideo").expect("group should exist");
    assert_eq!(video.apps.len(), 1);
    assert_eq!(video.apps[0].id, "vlc.desktop");
    assert_eq!(video.apps[0].icon, "vlc");

    let other = index.category("Other").expect("fallback group should exist");
    assert_eq!(other.apps[0].id, "odd-tool.desktop");

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn no_display_and_non_application_entries_are_skipped() {
    let root = scratch_dir("skips");
    write_descriptor(
        &root,
        "hidden-tool.desktop",
        "[Desktop Entry]\nType=Application\nName=Hidden Tool\nExec=hidden-tool\nNoDisplay=true\n",
    );
    write_descriptor(
        &root,
        "weblink.desktop",
        "[Desktop Entry]\nType=Link\nName=Some Link\nURL=https://example.org\n",
    );
    write_descriptor(
        &root,
        "visible.desktop",
        "[Desktop Entry]\nType=Application\nName=Visible\nExec=visible\nCategories=Utility;\n",
    );

    let catalog = DesktopFileCatalog::new(vec![root.clone()]);
    let tree = catalog.root().expect("catalog root should exist");
    let index = CatalogIndex::rebuild(Some(&tree));

    assert_eq!(index.all_apps.len(), 1);
    assert_eq!(index.all_apps[0].id, "visible.desktop");

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn earlier_roots_shadow_later_ones() {
    let user_root = scratch_dir("shadow-user");
    let system_root = scratch_dir("shadow-system");
    write_descriptor(
        &user_root,
        "editor.desktop",
        "[Desktop Entry]\nType=Application\nName=User Editor\nExec=editor\nCategories=Utility;\n",
    );
    write_descriptor(
        &system_root,
        "editor.desktop",
        "[Desktop Entry]\nType=Application\nName=System Editor\nExec=editor\nCategories=Utility;\n",
    );

    let catalog = DesktopFileCatalog::new(vec![user_root.clone(), system_root.clone()]);
    let tree = catalog.root().expect("catalog root should exist");
    let index = CatalogIndex::rebuild(Some(&tree));

    assert_eq!(index.all_apps.len(), 1);
    assert_eq!(index.all_apps[0].name, "User Editor");

    std::fs::remove_dir_all(&user_root).unwrap();
    std::fs::remove_dir_all(&system_root).unwrap();
}

#[test]
fn apps_within_a_group_are_sorted_by_name() {
    let root = scratch_dir("sorting");
    write_descriptor(
        &root,
        "zeta.desktop",
        "[Desktop Entry]\nType=Application\nName=Zeta\nExec=zeta\nCategories=Utility;\n",
    );
    write_descriptor(
        &root,
        "alpha.desktop",
        "[Desktop Entry]\nType=Application\nName=alpha\nExec=alpha\nCategories=Utility;\n",
    );

    let catalog = DesktopFileCatalog::new(vec![root.clone()]);
    let tree = catalog.root().expect("catalog root should exist");
    let index = CatalogIndex::rebuild(Some(&tree));

    let utility = index.category("Utility").expect("group should exist");
    let names: Vec<&str> = utility.apps.iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, vec!["alpha", "Zeta"]);

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn missing_roots_mean_an_absent_catalog() {
    let catalog = DesktopFileCatalog::new(vec![scratch_dir("does-not-exist")]);
    assert!(catalog.root().is_none());
}
