//! Record key generation
//!
//! Keys are 24 lowercase hex characters: a 4-byte big-endian seconds
//! timestamp, 5 bytes of per-process randomness and a 3-byte counter.
//! They sort roughly by creation time and never collide within a process.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU32, Ordering};

use rand::RngCore;

static PROCESS_BYTES: OnceLock<[u8; 5]> = OnceLock::new();
static COUNTER: OnceLock<AtomicU32> = OnceLock::new();

fn process_bytes() -> &'static [u8; 5] {
    PROCESS_BYTES.get_or_init(|| {
        let mut bytes = [0u8; 5];
        rand::thread_rng().fill_bytes(&mut bytes);
        bytes
    })
}

fn next_count() -> u32 {
    COUNTER
        .get_or_init(|| AtomicU32::new(rand::thread_rng().next_u32()))
        .fetch_add(1, Ordering::Relaxed)
        & 0x00ff_ffff
}

/// Generate a new record key
pub fn new_key() -> String {
    let secs = chrono::Utc::now().timestamp() as u32;
    let count = next_count();

    let mut bytes = [0u8; 12];
    bytes[..4].copy_from_slice(&secs.to_be_bytes());
    bytes[4..9].copy_from_slice(process_bytes());
    bytes[9..].copy_from_slice(&count.to_be_bytes()[1..]);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_key_format() {
        let key = new_key();
        assert_eq!(key.len(), 24);
        assert!(key.bytes().all(|b| b.is_ascii_hexdigit()));
        assert_eq!(key, key.to_lowercase());
    }

    #[test]
    fn test_keys_are_unique() {
        let keys: HashSet<String> = (0..10_000).map(|_| new_key()).collect();
        assert_eq!(keys.len(), 10_000);
    }

    #[test]
    fn test_key_embeds_timestamp() {
        let before = chrono::Utc::now().timestamp() as u32;
        let key = new_key();
        let secs = u32::from_str_radix(&key[..8], 16).unwrap();
        assert!(secs >= before && secs <= before + 2);
    }
}
