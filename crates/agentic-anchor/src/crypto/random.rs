//! Secure random values, drawn from the thread-local OS-seeded RNG.

use rand::RngCore;

/// Generate a fixed-size array of cryptographically secure random bytes.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut buf = [0u8; N];
    rand::thread_rng().fill_bytes(&mut buf);
    buf
}

/// A random starting sequence number for Reply flows.
pub fn random_sequence() -> u32 {
    rand::thread_rng().next_u32()
}
