//! Checksum utilities for downloaded documents
//!
//! Manifest records carry a SHA-256 digest of every ingested file. The
//! digest is computed over a stream in fixed-size chunks so arbitrarily
//! large documents hash in bounded memory.

use crate::error::Result;
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::Path;

/// Chunk size for streaming reads.
const READ_BUFFER_SIZE: usize = 8192;

/// Compute the SHA-256 checksum of a file on disk
pub fn compute_file_checksum(path: impl AsRef<Path>) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    compute_checksum(&mut file)
}

/// Compute the SHA-256 checksum of any readable source
///
/// Reads the source to exhaustion in fixed-size chunks; identical bytes
/// always produce the same hex digest regardless of how the source chunks
/// its reads.
pub fn compute_checksum<R: Read>(reader: &mut R) -> Result<String> {
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; READ_BUFFER_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}
