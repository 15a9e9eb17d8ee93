//! Release archive reading (`.tar.gz`).

use crate::error::KzError;
use flate2::read::GzDecoder;
use std::io::Read;
use tar::{Archive, Entry};

/// Open gzip-compressed tar bytes for streaming.
pub fn open(bytes: &[u8]) -> Archive<GzDecoder<&[u8]>> {
    Archive::new(GzDecoder::new(bytes))
}

/// Walk the archive in order and return the first entry whose raw name equals
/// `name`. Entries before it are skipped without being buffered.
pub fn find_entry<'a, R: Read>(
    archive: &'a mut Archive<R>,
    name: &str,
) -> Result<Option<Entry<'a, R>>, KzError> {
    let entries = archive
        .entries()
        .map_err(|e| KzError::Archive(e.to_string()))?;

    for entry in entries {
        let entry = entry.map_err(|e| KzError::Archive(e.to_string()))?;
        if entry.path_bytes().as_ref() == name.as_bytes() {
            return Ok(Some(entry));
        }
        tracing::trace!(
            entry = %String::from_utf8_lossy(&entry.path_bytes()),
            "Skipping archive entry"
        );
    }

    Ok(None)
}
