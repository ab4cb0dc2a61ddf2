//! Success-string acknowledgments.
//!
//! The backend signals success on mutating album endpoints with a literal
//! string body, not a structured payload. Anything other than the exact
//! literal is treated as a contract violation, even under a 2xx status.

use picfolio_core::GalleryError;

pub const ALBUM_CREATED: &str = "Album created successfully";
pub const ALBUM_RENAMED: &str = "Album renamed successfully";
pub const ALBUM_REDATED: &str = "Album date updated successfully";
pub const ALBUM_DELETED: &str = "Album deleted successfully";
pub const ASSETS_ADDED: &str = "Assets added successfully";
pub const ASSETS_REMOVED: &str = "Assets removed successfully";

/// Compare a response body against the expected acknowledgment literal.
pub fn expect_ack(operation: &str, expected: &str, body: &str) -> Result<(), GalleryError> {
    if body.trim() == expected {
        Ok(())
    } else {
        Err(GalleryError::contract(format!(
            "{operation}: expected ack {expected:?}, got {body:?}"
        )))
    }
}
