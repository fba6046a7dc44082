//! Structural fingerprinting and mutation classification.
//!
//! [`hasher`] produces a spatially-independent fingerprint for TypeScript and
//! JavaScript sources (falling back to a raw content hash otherwise);
//! [`classifier`] diffs the exported surface of two versions of a file to
//! decide whether a write was a refactor or a behavioral change.

mod classifier;
mod hasher;
mod types;

pub use classifier::{Classification, MutationClass, classify};
pub use hasher::{fingerprint, is_supported, raw_fingerprint};
pub use types::{ExportKind, ExportSignature, Fingerprint, FingerprintMethod, FingerprintNode};
