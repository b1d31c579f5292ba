use sha2::{Digest, Sha256};

/// Hex SHA-256 of the UTF-8 bytes of `label`.
pub fn digest(label: &str) -> String {
    let hash = Sha256::digest(label.as_bytes());
    format!("{:x}", hash)
}

/// A pure label -> digest function. Handlers and the verifier go through this
/// so the hashing primitive can be swapped without touching either.
pub trait LabelHasher: Send + Sync {
    fn digest(&self, label: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Hasher;

impl LabelHasher for Sha256Hasher {
    fn digest(&self, label: &str) -> String {
        digest(label)
    }
}
