//! Canonical RIFF/WAVE header construction for raw linear PCM
//!
//! The synthesis service streams bare PCM samples with no container. To
//! persist a playable file we prefix the samples with a fixed 44-byte
//! header: `RIFF` chunk, `fmt ` chunk declaring uncompressed PCM, and a
//! `data` chunk sized to the payload. All integer fields little-endian.

use super::format::PcmFormat;

/// Size of the canonical PCM header in bytes
pub const HEADER_LEN: usize = 44;

/// Build the 44-byte header for `data_len` bytes of PCM in `format`.
pub fn header(data_len: u32, format: &PcmFormat) -> [u8; HEADER_LEN] {
    let mut header = [0u8; HEADER_LEN];

    header[0..4].copy_from_slice(b"RIFF");
    header[4..8].copy_from_slice(&(36 + data_len).to_le_bytes());
    header[8..12].copy_from_slice(b"WAVE");

    header[12..16].copy_from_slice(b"fmt ");
    header[16..20].copy_from_slice(&16u32.to_le_bytes());
    header[20..22].copy_from_slice(&1u16.to_le_bytes()); // PCM
    header[22..24].copy_from_slice(&format.channels.to_le_bytes());
    header[24..28].copy_from_slice(&format.sample_rate.to_le_bytes());
    header[28..32].copy_from_slice(&format.byte_rate().to_le_bytes());
    header[32..34].copy_from_slice(&format.block_align().to_le_bytes());
    header[34..36].copy_from_slice(&format.bits_per_sample.to_le_bytes());

    header[36..40].copy_from_slice(b"data");
    header[40..44].copy_from_slice(&data_len.to_le_bytes());

    header
}

/// Wrap raw PCM sample bytes into a complete WAV file image.
pub fn wrap_pcm(pcm: &[u8], format: &PcmFormat) -> Vec<u8> {
    let mut out = Vec::with_capacity(HEADER_LEN + pcm.len());
    out.extend_from_slice(&header(pcm.len() as u32, format));
    out.extend_from_slice(pcm);
    out
}
