//! Filesystem discovery and classification.
//!
//! This module walks inventory roots and classifies every entry as a
//! directory, a recognized video file, or a plain file. Video
//! classification is purely name-based: a file that later fails probing
//! still reports as a video. Directories are classified structurally,
//! never by name.
//!
//! Unreadable entries (permission denied, races with concurrent deletes)
//! are logged and skipped so one bad entry never loses the rest of the
//! walk.

use std::fs;
use std::path::Path;

use log::warn;
use walkdir::WalkDir;

use crate::inventory::Entry;

/// Filename suffixes recognized as video files (case-insensitive).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mkv", "avi", "mov", "wmv", "mpg", "mpeg"];

/// Returns true if the file name carries a recognized video suffix.
///
/// Pure and infallible; the match is case-insensitive against
/// [`VIDEO_EXTENSIONS`].
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            VIDEO_EXTENSIONS
                .iter()
                .any(|video_ext| ext.eq_ignore_ascii_case(video_ext))
        })
        .unwrap_or(false)
}

fn classify_file(path: &Path) -> Entry {
    if is_video_file(path) {
        Entry::video(path.to_path_buf())
    } else {
        Entry::file(path.to_path_buf())
    }
}

/// Walks `root`, emitting one entry per filesystem object beneath it as a
/// single flat sequence. The root itself is not emitted. Entries are
/// visited in file-name order, parents before their contents, so output
/// is deterministic within one run.
pub fn walk_flat(root: &Path) -> Vec<Entry> {
    let mut entries = Vec::new();
    for result in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let dirent = match result {
            Ok(dirent) => dirent,
            Err(e) => {
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };
        if dirent.file_type().is_dir() {
            entries.push(Entry::directory(dirent.path().to_path_buf()));
        } else {
            entries.push(classify_file(dirent.path()));
        }
    }
    entries
}

/// Recursively builds the rooted tree for `root`: a directory entry whose
/// `contents` holds one entry per object directly inside it, with
/// sub-directories expanded the same way. An empty directory yields an
/// empty `contents` sequence, never an error.
pub fn walk_tree(root: &Path) -> Entry {
    Entry::directory_with(root.to_path_buf(), read_children(root))
}

fn read_children(dir: &Path) -> Vec<Entry> {
    let read_dir = match fs::read_dir(dir) {
        Ok(read_dir) => read_dir,
        Err(e) => {
            warn!("Cannot read directory {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut dirents: Vec<fs::DirEntry> = read_dir
        .filter_map(|result| match result {
            Ok(dirent) => Some(dirent),
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {}", dir.display(), e);
                None
            }
        })
        .collect();
    dirents.sort_by_key(|dirent| dirent.file_name());

    let mut children = Vec::new();
    for dirent in dirents {
        let path = dirent.path();
        match dirent.file_type() {
            Ok(file_type) if file_type.is_dir() => {
                children.push(Entry::directory_with(path.clone(), read_children(&path)));
            }
            Ok(_) => children.push(classify_file(&path)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }
    children
}
