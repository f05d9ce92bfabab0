//! Checks applied to an uploaded roster before it is parsed

use crate::error::{NominaError, NominaResult};
use std::path::Path;

/// Default upload limit: 5 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Which uploads are accepted for parsing
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    pub max_bytes: u64,
    /// Lowercase extensions without the dot
    pub extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            extensions: vec!["xls".to_string(), "xlsx".to_string()],
        }
    }
}

impl UploadPolicy {
    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Reject files that are not spreadsheets or are over the size limit
    pub fn check(&self, file_name: &str, size: u64) -> NominaResult<()> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if !self.extensions.contains(&extension) {
            return Err(NominaError::UnsupportedFileType(file_name.to_string()));
        }

        self.check_size(size)
    }

    pub fn check_size(&self, size: u64) -> NominaResult<()> {
        if size > self.max_bytes {
            return Err(NominaError::FileTooLarge {
                size,
                limit: self.max_bytes,
            });
        }
        Ok(())
    }
}
