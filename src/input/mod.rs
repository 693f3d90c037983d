//! File reading boundary.
//!
//! The scanner and analyzer operate on in-memory text only; every file
//! access goes through here so missing, unreadable, and non-UTF-8 inputs
//! surface as distinct errors at the command layer.

use crate::utils::error::InputError;
use std::fs;
use std::io;
use std::path::Path;

/// **Public** - Reads a file fully into a UTF-8 string.
///
/// # Errors
/// * [`InputError::NotFound`] when the path does not exist
/// * [`InputError::Unreadable`] for any other IO failure
/// * [`InputError::InvalidEncoding`] when the content is not valid UTF-8
pub fn read_text(path: &Path) -> Result<String, InputError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Err(InputError::NotFound(path.to_path_buf()));
        }
        Err(source) => {
            return Err(InputError::Unreadable {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    String::from_utf8(bytes).map_err(|_| InputError::InvalidEncoding(path.to_path_buf()))
}
