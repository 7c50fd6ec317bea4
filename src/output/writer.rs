//! Proto file writer

use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Write a rendered document, creating parent directories as needed
pub fn write_proto(path: impl AsRef<Path>, content: &str) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            Error::output(format!(
                "Failed to create directory '{}': {e}",
                parent.display()
            ))
        })?;
    }

    fs::write(path, content)
        .map_err(|e| Error::output(format!("Failed to write '{}': {e}", path.display())))?;

    tracing::info!(path = %path.display(), bytes = content.len(), "Wrote proto file");
    Ok(())
}
