//! Shared SHA-256 hex digest utility.
//!
//! Used by the `ticket_hash` QR policy and by the API layer's token
//! handling to avoid duplicating the same hash computation.

use sha2::{Digest, Sha256};

/// Compute a lowercase SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}
