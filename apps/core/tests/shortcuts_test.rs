use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use panelmenu_core::model::AppEntry;
use panelmenu_core::shortcuts::{add_to_desktop, ShortcutError, ShortcutOutcome};

fn scratch_dir(label: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be valid")
        .as_nanos();
    std::env::temp_dir().join(format!("panelmenu-shortcuts-{label}-{unique}"))
}

fn write_descriptor(dir: &Path, file_name: &str) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(file_name);
    std::fs::write(
        &path,
        "[Desktop Entry]\nType=Application\nName=Editor\nExec=editor\n",
    )
    .unwrap();
    path
}

#[test]
fn copies_descriptor_to_desktop_directory() {
    let source_dir = scratch_dir("copy-src");
    let desktop_dir = scratch_dir("copy-dst");
    let source = write_descriptor(&source_dir, "editor.desktop");
    let entry = AppEntry::new(
        "editor.desktop",
        "Editor",
        "editor",
        &source.to_string_lossy(),
    );

    let outcome = add_to_desktop(&entry, &desktop_dir).unwrap();

    let created = desktop_dir.join("editor.desktop");
    assert_eq!(outcome, ShortcutOutcome::Created(created.clone()));
    assert!(created.is_file());

    std::fs::remove_dir_all(&source_dir).unwrap();
    std::fs::remove_dir_all(&desktop_dir).unwrap();
}

#[test]
fn existing_shortcut_is_left_untouched() {
    let source_dir = scratch_dir("exists-src");
    let desktop_dir = scratch_dir("exists-dst");
    let source = write_descriptor(&source_dir, "editor.desktop");
    std::fs::create_dir_all(&desktop_dir).unwrap();
    std::fs::write(desktop_dir.join("editor.desktop"), "user-edited").unwrap();
    let entry = AppEntry::new(
        "editor.desktop",
        "Editor",
        "editor",
        &source.to_string_lossy(),
    );

    let outcome = add_to_desktop(&entry, &desktop_dir).unwrap();

    assert_eq!(
        outcome,
        ShortcutOutcome::AlreadyExists(desktop_dir.join("editor.desktop"))
    );
    let contents = std::fs::read_to_string(desktop_dir.join("editor.desktop")).unwrap();
    assert_eq!(contents, "user-edited");

    std::fs::remove_dir_all(&source_dir).unwrap();
    std::fs::remove_dir_all(&desktop_dir).unwrap();
}

#[test]
fn missing_descriptor_is_reported() {
    let desktop_dir = scratch_dir("missing-dst");
    let entry = AppEntry::new(
        "gone.desktop",
        "Gone",
        "gone",
        "/nonexistent/gone.desktop",
    );

    let result = add_to_desktop(&entry, &desktop_dir);

    match result {
        Err(ShortcutError::MissingDescriptor(path)) => {
            assert_eq!(path, PathBuf::from("/nonexistent/gone.desktop"))
        }
        other => panic!("unexpected result: {other:?}"),
    }
}
