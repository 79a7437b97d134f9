//! Inventory data model and document serialization.
//!
//! Every filesystem object visited during a walk becomes one [`Entry`].
//! The serialized form is the wire format existing consumers read: a
//! `type` tag, the entry `path`, probe `info` for videos (`null` when
//! probing failed), and nested `contents` for directories in tree mode.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreResult;

/// One classified filesystem object in the inventory.
///
/// The kind is decided once at classification time and is immutable
/// thereafter. A video whose probe fails keeps its `Video` kind with
/// `info` absent, distinguishing "not a video" from "video, metadata
/// unavailable".
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Entry {
    Directory {
        path: PathBuf,
        /// `Some` in tree mode, omitted from the document in flat mode.
        #[serde(skip_serializing_if = "Option::is_none")]
        contents: Option<Vec<Entry>>,
    },
    Video {
        path: PathBuf,
        /// Raw probe payload; serialized as `null` when probing failed.
        info: Option<Value>,
    },
    File {
        path: PathBuf,
    },
}

impl Entry {
    /// Directory entry without children (flat mode).
    pub fn directory(path: PathBuf) -> Self {
        Entry::Directory {
            path,
            contents: None,
        }
    }

    /// Directory entry with its direct children (tree mode).
    pub fn directory_with(path: PathBuf, contents: Vec<Entry>) -> Self {
        Entry::Directory {
            path,
            contents: Some(contents),
        }
    }

    /// Video entry, metadata to be attached by enrichment.
    pub fn video(path: PathBuf) -> Self {
        Entry::Video { path, info: None }
    }

    /// Plain file entry.
    pub fn file(path: PathBuf) -> Self {
        Entry::File { path }
    }

    pub fn path(&self) -> &Path {
        match self {
            Entry::Directory { path, .. } | Entry::Video { path, .. } | Entry::File { path } => {
                path
            }
        }
    }
}

/// The aggregated inventory across all requested roots.
///
/// Flat mode holds one entry per filesystem object; tree mode holds one
/// rooted tree per root. Exactly one shape is produced per run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct InventoryDocument {
    pub entries: Vec<Entry>,
}

/// Writes the document as pretty-printed UTF-8 JSON, overwriting any
/// previous file at `path`. Non-ASCII characters pass through unescaped.
pub fn write_document(document: &InventoryDocument, path: &Path) -> CoreResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, document)?;
    writer.flush()?;
    Ok(())
}
