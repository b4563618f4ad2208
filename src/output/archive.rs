//! Zip repackaging
//!
//! The remote service nests its outputs under internal folders and may mix
//! in files the user did not ask for. The rebuilt archive keeps only the
//! entries with the expected extension, flattened to their base names.

use crate::error::Result;
use crate::form::base_name;
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Rebuild `source` keeping only entries ending in `extension`.
///
/// Returns `Ok(None)` when no entry matches. Names are compared
/// case-insensitively; a flattened name already taken gets a numeric
/// prefix (`2-page.pdf`).
pub fn rebuild_archive(source: &[u8], extension: &str) -> Result<Option<Vec<u8>>> {
    let mut archive = ZipArchive::new(Cursor::new(source))?;
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let extension = extension.to_ascii_lowercase();

    let mut taken = HashSet::new();
    let mut kept = 0usize;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        if entry.is_dir() {
            continue;
        }

        let name = base_name(entry.name()).to_string();
        if name.is_empty() || !name.to_ascii_lowercase().ends_with(&extension) {
            tracing::debug!(entry = entry.name(), "skipping archive entry");
            continue;
        }

        let mut data = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut data)?;

        let name = unique_name(&mut taken, name);
        writer.start_file(name.as_str(), options)?;
        writer.write_all(&data)?;
        kept += 1;
    }

    if kept == 0 {
        return Ok(None);
    }

    Ok(Some(writer.finish()?.into_inner()))
}

/// File names of an archive, in stored order.
pub fn entry_names(source: &[u8]) -> Result<Vec<String>> {
    let archive = ZipArchive::new(Cursor::new(source))?;
    Ok(archive.file_names().map(str::to_string).collect())
}

fn unique_name(taken: &mut HashSet<String>, name: String) -> String {
    if taken.insert(name.clone()) {
        return name;
    }
    let mut ordinal = 2;
    loop {
        let candidate = format!("{}-{}", ordinal, name);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        ordinal += 1;
    }
}
