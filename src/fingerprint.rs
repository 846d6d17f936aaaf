//! Name fingerprinting
//!
//! Jenkins one-at-a-time hash over the UTF-8 bytes of a name. The result
//! is the sort and search key of the store. It is not collision free:
//! two names with the same fingerprint share one record.
//!
//! Bytes are added as unsigned values (0..=255). Names outside ASCII
//! therefore hash differently than in implementations that add a signed
//! `char`.

/// Compute the 32-bit fingerprint of `name`.
///
/// All arithmetic wraps modulo 2^32.
pub fn fingerprint(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for &byte in name.as_bytes() {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}
