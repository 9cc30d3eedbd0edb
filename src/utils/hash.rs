//! Content fingerprints using blake3.
//!
//! Fingerprints are persisted in lab front-matter, so they must be stable
//! across runs, platforms and versions.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let fp = hash::fingerprint("some content"); // 16 hex digits
//! ```

/// Number of hex digits kept in a fingerprint.
const FINGERPRINT_LEN: usize = 16;

/// Compute a 16-hex-digit blake3 fingerprint of `data`.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(data: &T) -> String {
    let hash = blake3::hash(data.as_ref());
    let mut hex = hex::encode(hash.as_bytes());
    hex.truncate(FINGERPRINT_LEN);
    hex
}
