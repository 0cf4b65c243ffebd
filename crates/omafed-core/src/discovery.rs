//! Finds the selectable scripts under a directory tree

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::errors::ConvertError;
use crate::script::{Item, ScriptFilter};

/// Walks `root` depth first, entries sorted by file name, and returns one item
/// per visible matching file. When two files normalize to the same name the
/// first one visited wins and later ones are dropped.
pub fn discover(root: &Path, filter: &ScriptFilter) -> Result<Vec<Item>, ConvertError> {
    let mut items = Vec::new();
    let mut seen = HashSet::new();

    for (name, path) in visible_scripts(root, filter)? {
        if !seen.insert(name.clone()) {
            log::debug!(
                "skipping {}, '{}' is already bound to an earlier file",
                path.display(),
                name
            );
            continue;
        }

        items.push(Item::new(&name, path));
    }

    Ok(items)
}

/// Every visible matching file whose display name is in `names`, duplicates
/// that `discover` drops included.
pub fn find_named(
    root: &Path,
    filter: &ScriptFilter,
    names: &HashSet<String>,
) -> Result<HashSet<PathBuf>, ConvertError> {
    Ok(visible_scripts(root, filter)?
        .into_iter()
        .filter(|(name, _)| names.contains(name))
        .map(|(_, path)| path)
        .collect())
}

fn visible_scripts(
    root: &Path,
    filter: &ScriptFilter,
) -> Result<Vec<(String, PathBuf)>, ConvertError> {
    fs::read_dir(root).map_err(|e| ConvertError::DirectoryUnreadable {
        path: root.to_path_buf(),
        reason: e.to_string(),
    })?;

    let mut scripts = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ConvertError::DirectoryUnreadable {
            path: e.path().unwrap_or(root).to_path_buf(),
            reason: e.to_string(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(file_name) = entry.file_name().to_str() else {
            log::debug!("skipping non UTF-8 file name {}", entry.path().display());
            continue;
        };

        if !filter.matches_visible(file_name) {
            continue;
        }

        scripts.push((filter.display_name(file_name), entry.into_path()));
    }

    Ok(scripts)
}
