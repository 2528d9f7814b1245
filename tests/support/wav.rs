//! Tiny PCM wav files for upload tests.

use std::path::Path;

/// Write a minimal mono 16-bit wav whose data section is `payload`.
///
/// The client never decodes uploads, but a well-formed header keeps the
/// fixture honest.
pub fn write_test_wav(path: &Path, payload: &[u8]) {
    let sample_rate: u32 = 8_000;
    let byte_rate = sample_rate * 2;
    let data_len = payload.len() as u32;

    let mut bytes = Vec::with_capacity(44 + payload.len());
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&byte_rate.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    bytes.extend_from_slice(payload);

    std::fs::write(path, bytes).expect("write test wav");
}
