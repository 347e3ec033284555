// src/core/digest.rs

use log::debug;
use std::{fs, io, path::Path};
use walkdir::WalkDir;

const HASH_TRUNCATE_LENGTH: usize = 16; // 16 bytes = 32 hex characters

/// Computes a content digest for a whole directory tree (blake3).
///
/// The digest covers every file's relative path and bytes, and every
/// directory's relative path, visited in a stable order. Two trees have the
/// same digest iff they hold the same files with the same contents.
///
/// # Errors
/// Returns an I/O error if the tree cannot be walked or a file cannot be read.
pub fn tree_digest(root: &Path) -> io::Result<String> {
    let mut hasher = blake3::Hasher::new();
    let mut files = 0usize;

    for entry in WalkDir::new(root)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(io::Error::other)?
            .to_string_lossy()
            .replace('\\', "/");

        if entry.file_type().is_dir() {
            hasher.update(b"d\0");
            hasher.update(relative.as_bytes());
            hasher.update(b"\0");
        } else {
            let content = fs::read(entry.path())?;
            hasher.update(b"f\0");
            hasher.update(relative.as_bytes());
            hasher.update(b"\0");
            hasher.update(&(content.len() as u64).to_le_bytes());
            hasher.update(&content);
            files += 1;
        }
    }

    let hash = hasher.finalize();
    let digest = hex::encode(&hash.as_bytes()[..HASH_TRUNCATE_LENGTH]);
    debug!("Digest of '{}' ({} files): {}", root.display(), files, digest);
    Ok(digest)
}
