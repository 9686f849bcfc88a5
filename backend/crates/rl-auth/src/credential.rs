//! Salted password credentials.
//!
//! `salt = sha256(identity_id ++ secret)` and
//! `hash = sha256(raw_password ++ salt)`, both hex encoded. The secret is the
//! process-wide password salt from configuration. An empty secret still
//! works here but weakens every stored hash; startup validation rejects it.

use crate::hasher::digest;

use subtle::ConstantTimeEq;
use uuid::Uuid;

/// Stored hash for `raw_password` belonging to `identity_id`.
pub fn derive(identity_id: Uuid, raw_password: &str, secret: &str) -> String {
    let salt = digest(format!("{identity_id}{secret}"));
    digest(format!("{raw_password}{salt}"))
}

/// Constant-time check of `raw_password` against `stored_hash`.
pub fn verify(identity_id: Uuid, raw_password: &str, secret: &str, stored_hash: &str) -> bool {
    let candidate = derive(identity_id, raw_password, secret);
    candidate.as_bytes().ct_eq(stored_hash.as_bytes()).into()
}

/// Hash of a random value nobody knows.
///
/// Given to identities registered without a password so that no blank or
/// default password can ever authenticate them.
pub fn unguessable(identity_id: Uuid, secret: &str) -> String {
    let noise: [u8; 32] = rand::random();
    derive(identity_id, &hex::encode(noise), secret)
}
