//! JSON export of a finished collection.
//!
//! The document is a pretty-printed array of items (four-space indent) and is
//! a pure function of the records, so identical inputs give identical bytes.
//! Files are written next to their destination and renamed into place once
//! complete.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use sha2::{Digest, Sha256};

use crate::app::{CollectorError, Result};
use crate::domain::ItemRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    /// `-` selects stdout.
    pub fn from_path(path: &Path) -> Self {
        if path.as_os_str() == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(path.to_path_buf())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportSummary {
    pub items: usize,
    pub comments: usize,
    pub bytes: usize,
    pub sha256: String,
}

pub fn to_json(items: &[ItemRecord]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = Serializer::with_formatter(&mut buf, formatter);
    items.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| CollectorError::Decode(e.to_string()))
}

pub fn digest(document: &str) -> String {
    hex::encode(Sha256::digest(document.as_bytes()))
}

pub fn export(items: &[ItemRecord], target: &OutputTarget) -> Result<ExportSummary> {
    let document = to_json(items)?;

    match target {
        OutputTarget::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            stdout.write_all(b"\n")?;
        }
        OutputTarget::File(path) => {
            write_atomic(path, document.as_bytes())?;
            tracing::info!("Wrote {} items to {}", items.len(), path.display());
        }
    }

    Ok(ExportSummary {
        items: items.len(),
        comments: items.iter().map(|i| i.comments.len()).sum(),
        bytes: document.len(),
        sha256: digest(&document),
    })
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".partial");
    let tmp = PathBuf::from(tmp);

    fs::write(&tmp, contents)?;
    if let Err(e) = fs::rename(&tmp, path) {
        let _ = fs::remove_file(&tmp);
        return Err(e.into());
    }
    Ok(())
}
