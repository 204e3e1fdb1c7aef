use crate::model::ScanError;
use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};

const REPORT_SUFFIX: &str = ".xml";

/// List the `*.xml` files directly inside `directory`.
///
/// Problems with the directory itself are logged and yield an empty list, so the caller only has
/// to deal with "nothing found". The order of the result is unspecified.
pub fn find_xml_files(directory: &Path) -> Vec<PathBuf> {
    match try_find_xml_files(directory) {
        Ok(files) => files,
        Err(err) => {
            error!("Error: {}", err);
            vec![]
        }
    }
}

/// Same as [`find_xml_files`] but hands the directory error back.
pub fn try_find_xml_files(directory: &Path) -> Result<Vec<PathBuf>, ScanError> {
    if !directory.exists() {
        return Err(ScanError::Missing(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(ScanError::NotADirectory(directory.to_path_buf()));
    }

    let unreadable = |source| ScanError::Unreadable {
        path: directory.to_path_buf(),
        source,
    };

    let mut files = vec![];
    for entry in fs::read_dir(directory).map_err(unreadable)? {
        let path = entry.map_err(unreadable)?.path();
        // is_file follows symlinks
        if is_report_name(&path) && path.is_file() {
            debug!("Found {}", path.display());
            files.push(path);
        }
    }

    Ok(files)
}

fn is_report_name(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().ends_with(REPORT_SUFFIX))
        .unwrap_or(false)
}
