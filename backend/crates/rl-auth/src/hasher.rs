use sha2::{Digest, Sha256};

/// SHA-256 of `input` as 64 lowercase hex characters.
pub(crate) fn digest(input: impl AsRef<[u8]>) -> String {
    hex::encode(Sha256::digest(input.as_ref()))
}
