//! File hashing utilities

use anyhow::Result;
use blake3::Hasher;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use crate::utils::config::HashingConsts;

/// Hash a file's full contents with blake3 and return the lower-case hex digest.
///
/// Always reads in [`HashingConsts::HASH_READ_CHUNK_SIZE`] chunks, whatever the size. A file that
/// shrinks or fails mid-read surfaces as an `Err` for that file only.
/// The handle is released when it goes out of scope, on success and on error alike.
pub fn hash_file(path: &Path) -> Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Hasher::new();
    let mut buffer = vec![0u8; HashingConsts::HASH_READ_CHUNK_SIZE];
    loop {
        let n = match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        // Blake3 already uses SIMD internally
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize().to_hex().to_string())
}

/// Hex digest of an in-memory buffer. Same output as [`hash_file`] for the same bytes.
pub fn hash_bytes(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
