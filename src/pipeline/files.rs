//! Discovery of pipeline inputs on disk.

use crate::constants::AUDIO_EXTENSIONS;
use crate::error::{Error, Result};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Audio files of every trial of an experiment, as `(trial_name, path)`.
///
/// Only files directly inside a trial directory count. Trials and files are
/// returned in sorted order.
pub fn collect_experiment_audio(experiment_root: &Path) -> Result<Vec<(String, PathBuf)>> {
    require_dir(experiment_root)?;

    let mut files = Vec::new();
    for trial in sorted_entries(experiment_root)? {
        if !trial.is_dir() {
            continue;
        }
        let trial_name = file_name_lossy(&trial);
        for path in sorted_entries(&trial)? {
            if path.is_file() && is_audio_file(&path) {
                files.push((trial_name.clone(), path));
            }
        }
    }

    Ok(files)
}

/// Check if a file is a supported audio format.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| {
        AUDIO_EXTENSIONS
            .iter()
            .any(|supported| ext.eq_ignore_ascii_case(OsStr::new(supported)))
    })
}

/// Every file under `root` whose name ends with `suffix`, sorted.
pub fn find_files_with_suffix(root: &Path, suffix: &str) -> Result<Vec<PathBuf>> {
    require_dir(root)?;

    let mut files: Vec<PathBuf> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.file_name().to_string_lossy().ends_with(suffix))
        .map(walkdir::DirEntry::into_path)
        .collect();
    files.sort();
    Ok(files)
}

/// Trial directories, exactly two levels below a detection source root.
pub fn trial_dirs(source_root: &Path) -> Result<Vec<PathBuf>> {
    require_dir(source_root)?;

    let mut dirs: Vec<PathBuf> = WalkDir::new(source_root)
        .min_depth(2)
        .max_depth(2)
        .follow_links(true)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|entry| entry.file_type().is_dir())
        .map(walkdir::DirEntry::into_path)
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// File name of a path as text, replacing invalid UTF-8.
pub fn file_name_lossy(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// File stem of a path as text, replacing invalid UTF-8.
pub fn file_stem_lossy(path: &Path) -> String {
    path.file_stem()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn require_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        Ok(())
    } else {
        Err(Error::DirectoryNotFound {
            path: path.to_path_buf(),
        })
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = std::fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();
    Ok(entries)
}
