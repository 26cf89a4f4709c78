//! Base64 helpers for transport edges.
//!
//! Transaction bytes and signatures stay binary inside the crate; base64 is
//! only produced or consumed where they cross into a transport.

use base64::Engine;

use crate::error::TypesError;

/// Encode bytes to base64 string.
pub fn base64_encode(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 string to bytes with context-aware error message.
///
/// # Arguments
/// * `b64` - Base64 encoded string
/// * `context` - Description for error messages (e.g., "transaction bytes", "signature")
pub fn base64_decode(b64: &str, context: &str) -> Result<Vec<u8>, TypesError> {
    base64::engine::general_purpose::STANDARD
        .decode(b64)
        .map_err(|e| TypesError::InvalidBase64 {
            context: context.to_string(),
            reason: e.to_string(),
        })
}
