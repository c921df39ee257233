//! gzip-compressed JSON encoding of the bookmark document

use crate::{PersistError, PersistedDocument, Result};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::{Read, Write};

/// Serialize and compress a document
pub fn encode_document(doc: &PersistedDocument) -> Result<Vec<u8>> {
    let json = serde_json::to_vec(doc).map_err(|e| PersistError::Encode(e.to_string()))?;

    let mut encoder = GzEncoder::new(Vec::with_capacity(json.len() / 2), Compression::default());
    encoder.write_all(&json)?;
    let bytes = encoder.finish()?;

    tracing::trace!("Encoded document: {} bytes json, {} bytes compressed", json.len(), bytes.len());
    Ok(bytes)
}

/// Decompress and parse a document
///
/// Any failure to decompress, decode UTF-8 or parse the structure is
/// reported as `CorruptData`.
pub fn decode_document(bytes: &[u8]) -> Result<PersistedDocument> {
    let mut json = String::new();
    GzDecoder::new(bytes)
        .read_to_string(&mut json)
        .map_err(|e| PersistError::CorruptData(format!("decompression failed: {}", e)))?;

    // Tolerate a UTF-8 byte order mark from other writers
    let json = json.trim_start_matches('\u{feff}');

    serde_json::from_str(json).map_err(|e| PersistError::CorruptData(format!("invalid document: {}", e)))
}
