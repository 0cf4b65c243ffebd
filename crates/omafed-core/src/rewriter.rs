//! Rewrites package manager invocations in place
//!
//! Files are processed one at a time in walk order: read, transform, and
//! written back only when the content changed. Contents are handled as raw
//! bytes, so scripts in any encoding are rewritten. The first read or write
//! failure stops the pass.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::errors::{ConvertError, RewriteError};
use crate::rules::RuleSet;
use crate::script::ScriptFilter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub changed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteReport {
    pub outcomes: Vec<FileOutcome>,
}

impl RewriteReport {
    pub fn changed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.changed)
    }

    pub fn unchanged(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes
            .iter()
            .filter(|outcome| !outcome.changed && outcome.error.is_none())
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

pub struct Rewriter<'a> {
    rules: &'a RuleSet,
    filter: ScriptFilter,
}

impl Default for Rewriter<'static> {
    fn default() -> Self {
        Self::new(RuleSet::apt_to_dnf(), ScriptFilter::default())
    }
}

impl<'a> Rewriter<'a> {
    pub fn new(rules: &'a RuleSet, filter: ScriptFilter) -> Self {
        Self { rules, filter }
    }

    /// Rewrites every matching file under `root`, hidden files included.
    pub fn rewrite(&self, root: &Path) -> Result<RewriteReport, RewriteError> {
        self.rewrite_excluding(root, &HashSet::new())
    }

    /// Same pass as `rewrite`, leaving the files in `kept` untouched.
    pub fn rewrite_excluding(
        &self,
        root: &Path,
        kept: &HashSet<PathBuf>,
    ) -> Result<RewriteReport, RewriteError> {
        let mut report = RewriteReport::default();

        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let source = ConvertError::DirectoryUnreadable {
                        path: e.path().unwrap_or(root).to_path_buf(),
                        reason: e.to_string(),
                    };
                    return Err(RewriteError { report, source });
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.filter.matches(name));
            if !matches {
                continue;
            }

            let path = entry.path();
            if kept.contains(path) {
                log::info!("Keeping {}", path.display());
                continue;
            }

            log::info!("Processing file: {}", path.display());
            match self.rewrite_file(path) {
                Ok(changed) => report.outcomes.push(FileOutcome {
                    path: path.to_path_buf(),
                    changed,
                    error: None,
                }),
                Err(source) => {
                    report.outcomes.push(FileOutcome {
                        path: path.to_path_buf(),
                        changed: false,
                        error: Some(source.to_string()),
                    });
                    return Err(RewriteError { report, source });
                }
            }
        }

        Ok(report)
    }

    fn rewrite_file(&self, path: &Path) -> Result<bool, ConvertError> {
        let original = fs::read(path).map_err(|e| ConvertError::FileReadFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let modified = self.rules.apply_bytes(&original);
        if modified == original {
            log::debug!("No Ubuntu-specific commands found in {}", path.display());
            return Ok(false);
        }

        log::info!("Modifying file: {}", path.display());
        fs::write(path, modified).map_err(|e| ConvertError::FileWriteFailure {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(true)
    }
}

#[cfg(test)]
#[path = "rewriter_test.rs"]
mod tests;
