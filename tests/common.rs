//! tests/common.rs
//! Common keys and data generators shared across test files

/// Media key used by most round-trip tests
#[allow(dead_code)] // Used across multiple test files
pub const TEST_MEDIA_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e,
    0x0f, 0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d,
    0x1e, 0x1f,
];

#[allow(dead_code)]
pub const OTHER_MEDIA_KEY: [u8; 32] = [0xA5; 32];

/// Plaintext sizes around block and window boundaries
#[allow(dead_code)]
pub const EDGE_SIZES: &[usize] = &[0, 1, 15, 16, 17, 31, 32, 33, 1024, 65535, 65536, 65537];

/// Deterministic plaintext: byte `i` is `i % 251`
/// Matches the pattern cases in test_data/media_vectors.json
#[allow(dead_code)]
pub fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

/// Seeded pseudo-random bytes
#[allow(dead_code)]
pub fn random_bytes(len: usize, seed: u64) -> Vec<u8> {
    use rand::{rngs::StdRng, RngCore, SeedableRng};
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = vec![0u8; len];
    rng.fill_bytes(&mut data);
    data
}

/// Feed `data` to `step` in slices of `chunk` bytes and collect the output
#[allow(dead_code)]
pub fn feed_in_chunks<F>(data: &[u8], chunk: usize, mut step: F) -> Vec<u8>
where
    F: FnMut(&[u8]) -> Vec<u8>,
{
    let mut out = Vec::new();
    for piece in data.chunks(chunk.max(1)) {
        out.extend(step(piece));
    }
    out
}
