//! Inventory assembly across roots.
//!
//! Orchestrates the run: walk every requested root, then probe the
//! discovered video files and attach their metadata. A root that does not
//! exist is reported and skipped; a probe that fails leaves its entry
//! without metadata. Neither interrupts the batch.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{info, warn};
use rayon::prelude::*;
use serde_json::Value;

use crate::config::{CoreConfig, Layout};
use crate::discovery;
use crate::error::CoreResult;
use crate::external::MediaProber;
use crate::inventory::{Entry, InventoryDocument};

/// Builds the inventory document for every root in `config`.
///
/// Walking is sequential and fixes the entry structure and order before
/// any probing starts; metadata is then filled in by probing video files
/// concurrently. Output is therefore deterministic regardless of probe
/// completion order.
pub fn build_inventory(
    config: &CoreConfig,
    prober: &dyn MediaProber,
) -> CoreResult<InventoryDocument> {
    config.validate()?;

    let mut entries = Vec::new();
    for root in &config.roots {
        if !root.exists() {
            warn!("The path {} does not exist, skipping root", root.display());
            continue;
        }
        match config.layout {
            Layout::Flat => entries.extend(discovery::walk_flat(root)),
            Layout::Tree => entries.push(discovery::walk_tree(root)),
        }
    }

    enrich(&mut entries, prober);
    Ok(InventoryDocument { entries })
}

/// Probes every video entry and attaches the resulting metadata. Failed
/// probes are logged and leave the entry's metadata absent.
fn enrich(entries: &mut [Entry], prober: &dyn MediaProber) {
    let mut videos = collect_video_paths(entries);
    videos.sort();
    videos.dedup();
    if videos.is_empty() {
        return;
    }

    info!("Probing {} video file(s)", videos.len());
    let probed: HashMap<PathBuf, Value> = videos
        .into_par_iter()
        .filter_map(|path| match prober.probe(&path) {
            Ok(value) => Some((path, value)),
            Err(e) => {
                warn!("Error getting video info for {}: {e}", path.display());
                None
            }
        })
        .collect();

    apply_metadata(entries, &probed);
}

fn collect_video_paths(entries: &[Entry]) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for entry in entries {
        match entry {
            Entry::Video { path, .. } => paths.push(path.clone()),
            Entry::Directory {
                contents: Some(children),
                ..
            } => paths.extend(collect_video_paths(children)),
            _ => {}
        }
    }
    paths
}

fn apply_metadata(entries: &mut [Entry], probed: &HashMap<PathBuf, Value>) {
    for entry in entries {
        match entry {
            Entry::Video { path, info } => *info = probed.get(path).cloned(),
            Entry::Directory {
                contents: Some(children),
                ..
            } => apply_metadata(children, probed),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use serde_json::json;
    use std::fs::{self, File};
    use std::path::Path;
    use tempfile::tempdir;

    /// Prober that fabricates a report without spawning processes, and
    /// fails for any path containing the configured marker.
    struct MockProber {
        fail_marker: Option<&'static str>,
    }

    impl MockProber {
        fn new() -> Self {
            Self { fail_marker: None }
        }

        fn failing_on(marker: &'static str) -> Self {
            Self {
                fail_marker: Some(marker),
            }
        }
    }

    impl MediaProber for MockProber {
        fn probe(&self, path: &Path) -> CoreResult<Value> {
            if let Some(marker) = self.fail_marker {
                if path.to_string_lossy().contains(marker) {
                    return Err(CoreError::CommandFailed(
                        "ffprobe".to_string(),
                        "Invalid data found when processing input".to_string(),
                    ));
                }
            }
            Ok(json!({
                "format": {"format_name": "matroska", "duration": "60.0"},
                "streams": [{"codec_type": "video", "codec_name": "h264"}],
            }))
        }
    }

    fn touch(path: &Path) {
        File::create(path).unwrap();
    }

    #[test]
    fn test_flat_inventory_classifies_and_enriches() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.mp4"));
        touch(&dir.path().join("b.txt"));
        fs::create_dir(dir.path().join("sub")).unwrap();

        let config = CoreConfig::new(vec![dir.path().to_path_buf()]);
        let document = build_inventory(&config, &MockProber::new()).unwrap();

        assert_eq!(document.entries.len(), 3);
        let Entry::Video { info, .. } = &document.entries[0] else {
            panic!("expected video first");
        };
        assert_eq!(info.as_ref().unwrap()["format"]["format_name"], "matroska");
        assert!(matches!(document.entries[1], Entry::File { .. }));
        assert!(matches!(document.entries[2], Entry::Directory { .. }));
    }

    #[test]
    fn test_failed_probe_keeps_video_kind_and_siblings() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("broken.mkv"));
        touch(&dir.path().join("fine.mp4"));
        touch(&dir.path().join("readme.txt"));

        let config = CoreConfig::new(vec![dir.path().to_path_buf()]);
        let document = build_inventory(&config, &MockProber::failing_on("broken")).unwrap();

        assert_eq!(document.entries.len(), 3);
        let Entry::Video { info, .. } = &document.entries[0] else {
            panic!("expected broken.mkv to stay a video entry");
        };
        assert!(info.is_none());
        let Entry::Video { info, .. } = &document.entries[1] else {
            panic!("expected fine.mp4 second");
        };
        assert!(info.is_some());
    }

    #[test]
    fn test_missing_root_is_skipped_not_fatal() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("only.txt"));
        let missing = dir.path().join("does-not-exist");

        let config = CoreConfig::new(vec![missing, dir.path().to_path_buf()]);
        let document = build_inventory(&config, &MockProber::new()).unwrap();

        assert_eq!(document.entries.len(), 1);
        assert!(matches!(document.entries[0], Entry::File { .. }));
    }

    #[test]
    fn test_tree_inventory_probes_nested_videos() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("season1")).unwrap();
        touch(&dir.path().join("season1/e01.mkv"));
        touch(&dir.path().join("cover.jpg"));

        let mut config = CoreConfig::new(vec![dir.path().to_path_buf()]);
        config.layout = Layout::Tree;
        let document = build_inventory(&config, &MockProber::new()).unwrap();

        // One rooted tree per root.
        assert_eq!(document.entries.len(), 1);
        let Entry::Directory {
            contents: Some(children),
            ..
        } = &document.entries[0]
        else {
            panic!("expected rooted directory tree");
        };
        let Entry::Directory {
            contents: Some(grandchildren),
            ..
        } = &children[0]
        else {
            panic!("expected season1 first");
        };
        let Entry::Video { info, .. } = &grandchildren[0] else {
            panic!("expected nested video");
        };
        assert!(info.is_some());
    }

    #[test]
    fn test_two_roots_flat_concatenates_in_order() {
        let first = tempdir().unwrap();
        let second = tempdir().unwrap();
        touch(&first.path().join("one.txt"));
        touch(&second.path().join("two.txt"));

        let config = CoreConfig::new(vec![
            first.path().to_path_buf(),
            second.path().to_path_buf(),
        ]);
        let document = build_inventory(&config, &MockProber::new()).unwrap();

        let paths: Vec<_> = document.entries.iter().map(|e| e.path()).collect();
        assert_eq!(
            paths,
            vec![first.path().join("one.txt"), second.path().join("two.txt")]
        );
    }
}
