use std::path::{Component, Path, PathBuf};

use humansize::{format_size, BINARY};

/// Archive names use `\` separators regardless of platform; convert one
/// to a native relative path for extraction and display.
pub fn to_native_path(name: &str) -> PathBuf {
    name.split('\\').collect()
}

/// Convert a filesystem path to the `\`-separated archive form, dropping
/// root and parent components.
pub fn to_archive_name(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\\")
}

/// True when every component is a plain name, so joining the path under a
/// destination directory cannot escape it.
pub fn is_safe_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

pub fn size(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

pub fn time(timestamp: u32) -> String {
    if timestamp == 0 {
        return "-".into();
    }
    chrono::DateTime::from_timestamp(i64::from(timestamp), 0)
        .map(|t| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
        .unwrap_or_else(|| "-".into())
}
