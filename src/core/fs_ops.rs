// src/core/fs_ops.rs

// Directory-tree helpers shared by the build and deploy tasks.

use std::{
    fs, io,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Signature of the function used to copy a single file. The deploy task
/// takes one so that a failing copy can be simulated. The lifetime lets
/// closures borrow from the caller's stack.
pub type FileCopier<'a> = dyn FnMut(&Path, &Path) -> io::Result<()> + 'a;

/// Copies a file, discarding the byte count.
pub fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    fs::copy(from, to).map(|_| ())
}

/// An error raised while copying a tree, naming the entry that failed.
#[derive(Debug, thiserror::Error)]
#[error("Could not copy '{}' to '{}': {source}", .from.display(), .to.display())]
pub struct CopyError {
    pub from: PathBuf,
    pub to: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Recursively copies the contents of `src` into `dest`, including hidden
/// files. `dest` is created if missing; existing files are overwritten.
/// Symbolic links are followed and their targets copied as real files and
/// directories; a link cycle is reported as an error.
///
/// Returns the number of files copied.
pub fn copy_tree(src: &Path, dest: &Path, copier: &mut FileCopier<'_>) -> Result<usize, CopyError> {
    let mut copied = 0;

    fs::create_dir_all(dest).map_err(|e| CopyError {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })?;

    for entry in WalkDir::new(src)
        .min_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| src.to_path_buf());
            CopyError {
                from: path,
                to: dest.to_path_buf(),
                source: e.into(),
            }
        })?;

        let relative = entry.path().strip_prefix(src).map_err(|_| CopyError {
            from: entry.path().to_path_buf(),
            to: dest.to_path_buf(),
            source: io::Error::other("entry is outside of the source tree"),
        })?;
        let target = dest.join(relative);

        let result = if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
        } else {
            copier(entry.path(), &target).map(|()| copied += 1)
        };

        result.map_err(|e| CopyError {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source: e,
        })?;
    }

    log::debug!(
        "Copied {} file(s) from '{}' to '{}'",
        copied,
        src.display(),
        dest.display()
    );
    Ok(copied)
}

/// True if `path` is a directory.
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// True if `path` is a directory with no entries. Unreadable directories are
/// treated as empty.
pub fn dir_is_empty(path: &Path) -> bool {
    fs::read_dir(path)
        .map(|mut entries| entries.next().is_none())
        .unwrap_or(true)
}

/// Removes everything inside `dir` but keeps `dir` itself. A missing
/// directory is not an error.
pub fn empty_dir(dir: &Path) -> io::Result<usize> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() && !path.is_symlink() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed += 1;
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn populate(root: &Path) {
        fs::create_dir_all(root.join("CSXS")).unwrap();
        fs::create_dir_all(root.join("ui/js")).unwrap();
        fs::write(root.join("CSXS/manifest.xml"), "<manifest/>").unwrap();
        fs::write(root.join(".debug"), "<debug/>").unwrap();
        fs::write(root.join("ui/js/main.js"), "main();").unwrap();
    }

    #[test]
    fn test_copy_tree_includes_hidden_files() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let dest = tmp.path().join("out/dest");
        populate(&src);

        let copied = copy_tree(&src, &dest, &mut copy_file).unwrap();

        assert_eq!(copied, 3);
        assert_eq!(fs::read_to_string(dest.join(".debug")).unwrap(), "<debug/>");
        assert_eq!(fs::read_to_string(dest.join("ui/js/main.js")).unwrap(), "main();");
        assert!(dest.join("CSXS/manifest.xml").is_file());
    }

    #[test]
    fn test_copy_tree_reports_failing_entry() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        populate(&src);

        let mut calls = 0;
        let mut failing = |from: &Path, to: &Path| {
            calls += 1;
            if calls == 2 {
                return Err(io::Error::other("disk full"));
            }
            copy_file(from, to)
        };

        let err = copy_tree(&src, &tmp.path().join("dest"), &mut failing).unwrap_err();
        assert_eq!(err.source.to_string(), "disk full");
        assert!(err.from.starts_with(&src));
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_tree_follows_symlinked_directories() {
        let tmp = TempDir::new().unwrap();
        let src = tmp.path().join("src");
        let shared = tmp.path().join("shared");
        populate(&src);
        fs::create_dir_all(shared.join("img")).unwrap();
        fs::write(shared.join("img/icon.png"), "png").unwrap();
        std::os::unix::fs::symlink(&shared, src.join("assets")).unwrap();

        let dest = tmp.path().join("dest");
        let copied = copy_tree(&src, &dest, &mut copy_file).unwrap();

        assert_eq!(copied, 4);
        let assets = dest.join("assets");
        assert!(!assets.is_symlink());
        assert!(assets.is_dir());
        assert_eq!(fs::read_to_string(assets.join("img/icon.png")).unwrap(), "png");
    }

    #[test]
    fn test_dir_checks() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing");
        assert!(!dir_exists(&missing));
        assert!(dir_is_empty(&missing));
        assert!(dir_is_empty(tmp.path()));

        fs::write(tmp.path().join("file"), "x").unwrap();
        assert!(!dir_is_empty(tmp.path()));
        assert!(!dir_exists(&tmp.path().join("file")));
    }

    #[test]
    fn test_empty_dir_keeps_directory() {
        let tmp = TempDir::new().unwrap();
        let dist = tmp.path().join("dist");
        populate(&dist);

        assert_eq!(empty_dir(&dist).unwrap(), 3);
        assert!(dist.is_dir());
        assert!(dir_is_empty(&dist));
        assert_eq!(empty_dir(&tmp.path().join("missing")).unwrap(), 0);
    }
}
