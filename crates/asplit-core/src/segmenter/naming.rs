//! Output file naming: `<dir>/<prefix><sequence>.<extension>`.

use std::path::{Path, PathBuf};

/// Separator appended to a non-empty prefix.
const PREFIX_SEPARATOR: char = '-';

/// Derives output paths for planned segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputNaming {
    dir: PathBuf,
    prefix: String,
    extension: String,
}

impl OutputNaming {
    /// `prefix` is used verbatim, separator included.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
        }
    }

    /// Builds naming from a user-facing prefix option.
    ///
    /// `None` falls back to the source file's stem; a non-empty prefix gets a
    /// trailing `-`; an explicitly empty prefix yields bare numbers.
    pub fn for_source(
        dir: impl Into<PathBuf>,
        prefix: Option<&str>,
        source: &Path,
        extension: impl Into<String>,
    ) -> Self {
        let base = match prefix {
            Some(p) => p.to_string(),
            None => source
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
        };
        let prefix = if base.is_empty() {
            base
        } else {
            format!("{base}{PREFIX_SEPARATOR}")
        };
        Self::new(dir, prefix, extension)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Output path for the segment numbered `sequence`.
    pub fn path_for(&self, sequence: u64) -> PathBuf {
        self.dir
            .join(format!("{}{}.{}", self.prefix, sequence, self.extension))
    }
}
