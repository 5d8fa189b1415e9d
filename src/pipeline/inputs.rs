//! Input image discovery.

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Collect input images from paths (files and directories).
///
/// Files named explicitly are kept regardless of extension, since the
/// format is detected from content. Directories are walked recursively
/// and only files with image extensions are picked up, in sorted order.
pub fn collect_input_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(path.clone());
        } else if path.is_dir() {
            let mut found = Vec::new();
            collect_image_files_recursive(path, &mut found)?;
            found.sort();
            files.extend(found);
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(files)
}

fn collect_image_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_image_files_recursive(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a supported image extension.
pub fn is_image_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|candidate| ext.eq_ignore_ascii_case(OsStr::new(candidate)))
    })
}
