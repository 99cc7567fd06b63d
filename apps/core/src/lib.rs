pub mod catalog;
pub mod config;
pub mod desktop_entry;
pub mod desktop_files;
pub mod engine;
pub mod launch;
pub mod logging;
pub mod model;
pub mod package_ops;
pub mod popup;
pub mod prefs;
pub mod shortcuts;
pub mod view;
