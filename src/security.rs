//! Room password hashing (salted + peppered SHA-256, constant-time compare)

use rand::Rng;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Generate a random per-room salt (hex).
pub fn generate_salt_hex() -> String {
    let mut rng = rand::rng();
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);
    hex::encode(bytes)
}

/// Hash a room password as `sha256(pepper ":" salt ":" password)`, hex-encoded.
pub fn hash_room_password(password: &str, salt_hex: &str, pepper: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(pepper.as_bytes());
    hasher.update(b":");
    hasher.update(salt_hex.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

/// Check a submitted password against a stored hash.
pub fn verify_room_password(password: &str, salt_hex: &str, pepper: &str, expected: &str) -> bool {
    ct_eq_hex(&hash_room_password(password, salt_hex, pepper), expected)
}

/// Constant-time equality for hex strings.
pub fn ct_eq_hex(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
