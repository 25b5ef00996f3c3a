//! Pre-flight checks applied to files before any upload is issued.

use std::error::Error;
use std::fmt;

/// Extensions the backend can parse.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "pptx", "csv", "txt", "md"];

/// Largest accepted upload (16 MiB).
pub const MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;

/// Reason a file was refused before upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    UnsupportedType { extension: String },
    TooLarge { name: String, size: u64 },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::UnsupportedType { extension } => {
                write!(f, "File type .{extension} is not supported")
            }
            ValidationError::TooLarge { name, .. } => {
                write!(f, "File {name} is too large (max 16MB)")
            }
        }
    }
}

impl Error for ValidationError {}

/// Lower-cased text after the last `.`; a name without a dot yields itself.
pub fn extension_of(name: &str) -> String {
    name.rsplit('.').next().unwrap_or(name).to_lowercase()
}

/// Checks extension first, then size.
///
/// # Errors
/// Returns the first rule the file breaks.
pub fn validate_file(name: &str, size: u64) -> Result<(), ValidationError> {
    let extension = extension_of(name);
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ValidationError::UnsupportedType { extension });
    }
    if size > MAX_FILE_BYTES {
        return Err(ValidationError::TooLarge {
            name: name.to_string(),
            size,
        });
    }
    Ok(())
}
