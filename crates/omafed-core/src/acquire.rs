//! Populates the working directory with the script repository

use std::fs;
use std::path::Path;
use std::process::Command;

use which::which;

use crate::errors::ConvertError;

pub const DEFAULT_REPO_URL: &str = "https://github.com/omakub/omakub.git";

/// Something that can fill an empty directory with a script tree.
pub trait Acquirer {
    fn acquire(&self, dest: &Path) -> Result<(), ConvertError>;
}

/// Clones a git repository with the `git` binary found on `PATH`.
#[derive(Debug, Clone)]
pub struct GitAcquirer {
    url: String,
    tool: String,
}

impl GitAcquirer {
    pub fn new(url: &str) -> Self {
        Self::with_tool(url, "git")
    }

    pub fn with_tool(url: &str, tool: &str) -> Self {
        Self {
            url: url.to_string(),
            tool: tool.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Acquirer for GitAcquirer {
    fn acquire(&self, dest: &Path) -> Result<(), ConvertError> {
        ensure_empty(dest)?;

        let tool = which(&self.tool).map_err(|_| ConvertError::AcquisitionToolMissing {
            tool: self.tool.clone(),
        })?;

        log::info!("Cloning {} to {}", self.url, dest.display());
        let output = Command::new(tool)
            .arg("clone")
            .arg(&self.url)
            .arg(dest)
            .output()
            .map_err(|e| ConvertError::AcquisitionFailed {
                url: self.url.clone(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(ConvertError::AcquisitionFailed {
                url: self.url.clone(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        log::info!("Repository cloned successfully");
        Ok(())
    }
}

/// A missing destination is fine, the clone creates it.
fn ensure_empty(dest: &Path) -> Result<(), ConvertError> {
    if !dest.exists() {
        return Ok(());
    }

    let mut entries = fs::read_dir(dest).map_err(|e| ConvertError::DirectoryUnreadable {
        path: dest.to_path_buf(),
        reason: e.to_string(),
    })?;

    if entries.next().is_some() {
        return Err(ConvertError::DestinationNotEmpty {
            path: dest.to_path_buf(),
        });
    }

    Ok(())
}
