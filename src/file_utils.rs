use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::formatters::Formatter;

// @module: Output file utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {}", path.display()))?;
        }
        Ok(())
    }

    // @generates: <output_dir>/<video_id>.<language_code>.<ext>
    pub fn output_path<P: AsRef<Path>>(
        output_dir: P,
        video_id: &str,
        language_code: &str,
        format: Formatter,
    ) -> PathBuf {
        let file_name = format!(
            "{}.{}.{}",
            sanitize_file_component(video_id),
            sanitize_file_component(language_code),
            format.extension()
        );
        output_dir.as_ref().join(file_name)
    }

    /// Write `content` to `path`, refusing to replace an existing file unless
    /// `force_overwrite` is set
    pub fn write_output<P: AsRef<Path>>(path: P, content: &str, force_overwrite: bool) -> Result<()> {
        let path = path.as_ref();

        if path.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {}. Use -f to force overwrite.",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display()))?;

        Ok(())
    }
}

/// Replace characters that are not safe in file names
fn sanitize_file_component(value: &str) -> String {
    value
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
