//! Synthetic identities for editable schema objects and record fields.

use rand::Rng;

/// Key under which the identity is stored on editable objects.
///
/// The key never appears in canonical schemas.
pub const ID_KEY: &str = "id";

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Generate a random identity.
///
/// Identities are only used as stable render keys among siblings of one
/// editing session, so a non-cryptographic 64-bit random value rendered in
/// base 36 is enough.
pub fn generate_id() -> String {
    let mut n: u64 = rand::rng().random();
    let mut digits = Vec::with_capacity(13);
    loop {
        digits.push(ALPHABET[(n % 36) as usize]);
        n /= 36;
        if n == 0 {
            break;
        }
    }
    digits.reverse();
    String::from_utf8(digits).unwrap_or_default()
}
