//! Checkout link identifier generation.

use rand::Rng;

/// Number of random bytes in a link id. Hex-encoded, so the resulting
/// token is twice this many characters.
pub const LINK_ID_BYTES: usize = 8;

/// Generate a new link id: 8 cryptographically random bytes, hex-encoded.
///
/// No uniqueness check is made against existing links; at 64 bits of
/// entropy a collision is treated as acceptably rare, not prevented.
pub fn generate_link_id() -> String {
    let bytes: [u8; LINK_ID_BYTES] = rand::rng().random();
    let mut id = String::with_capacity(LINK_ID_BYTES * 2);
    for b in bytes {
        id.push_str(&format!("{b:02x}"));
    }
    id
}
