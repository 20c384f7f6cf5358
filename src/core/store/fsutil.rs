use std::{
    fs, io,
    path::{Path, PathBuf},
};

use walkdir::WalkDir;

use super::MESSAGE_FILE;

/// Copy a single file, creating parent directories and overwriting the target.
pub(crate) fn copy_file(src: &Path, dst: &Path) -> io::Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dst)?;
    Ok(())
}

/// Recursively copy the contents of `src` into `dst`, overwriting files that
/// already exist there.
pub(crate) fn copy_tree(src: &Path, dst: &Path) -> io::Result<()> {
    for entry in WalkDir::new(src).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_file(entry.path(), &target)?;
        }
    }
    Ok(())
}

/// Files stored in a version directory, relative to it, excluding the
/// version's own message.
pub(crate) fn list_files(version_dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(version_dir).min_depth(1).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_dir() {
            continue;
        }
        let rel = entry
            .path()
            .strip_prefix(version_dir)
            .map_err(io::Error::other)?;
        if rel == Path::new(MESSAGE_FILE) {
            continue;
        }
        files.push(rel.to_path_buf());
    }
    Ok(files)
}

/// Remove `rel` from a version tree and prune directories the removal left empty.
pub(crate) fn remove_tracked(version_dir: &Path, rel: &Path) -> io::Result<()> {
    fs::remove_file(version_dir.join(rel))?;

    let mut parent = rel.parent();
    while let Some(dir) = parent.filter(|p| !p.as_os_str().is_empty()) {
        let full = version_dir.join(dir);
        if fs::read_dir(&full)?.next().is_some() {
            break;
        }
        fs::remove_dir(&full)?;
        parent = dir.parent();
    }
    Ok(())
}

pub(crate) fn write_message(version_dir: &Path, message: &str) -> io::Result<()> {
    fs::write(version_dir.join(MESSAGE_FILE), message)
}

pub(crate) fn read_message(version_dir: &Path) -> io::Result<String> {
    fs::read_to_string(version_dir.join(MESSAGE_FILE))
}
