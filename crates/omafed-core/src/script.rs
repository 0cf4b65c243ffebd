//! Script entries and the file filter shared by discovery and rewriting

use std::path::Path;
use std::path::PathBuf;

pub const DEFAULT_SCRIPT_SUFFIX: &str = ".sh";

/// A selectable script, labelled for display and bound to the file it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub name: String,
    pub source_path: PathBuf,
}

impl Item {
    pub fn new(name: &str, source_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.to_string(),
            source_path: source_path.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptFilter {
    suffix: String,
}

impl Default for ScriptFilter {
    fn default() -> Self {
        Self::new(DEFAULT_SCRIPT_SUFFIX)
    }
}

impl ScriptFilter {
    pub fn new(suffix: &str) -> Self {
        Self {
            suffix: suffix.to_string(),
        }
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// Name-only match used by the rewriter. Hidden files count.
    pub fn matches(&self, file_name: &str) -> bool {
        file_name.ends_with(&self.suffix)
    }

    /// Stricter match used by discovery: hidden files are never listed.
    pub fn matches_visible(&self, file_name: &str) -> bool {
        !file_name.starts_with('.') && self.matches(file_name)
    }

    /// Derives the display label for a matching file name, e.g.
    /// `visual_studio_code.sh` becomes `Visual Studio Code`.
    pub fn display_name(&self, file_name: &str) -> String {
        let stem = match file_name.strip_suffix(self.suffix.as_str()) {
            Some(stem) if !self.suffix.is_empty() => stem,
            _ => Path::new(file_name)
                .file_stem()
                .and_then(|stem| stem.to_str())
                .unwrap_or(file_name),
        };

        stem.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
            .filter(|word| !word.is_empty())
            .map(title_case)
            .collect::<Vec<String>>()
            .join(" ")
    }
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
