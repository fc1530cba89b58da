use super::AudioFormat;

pub const HEADER_LEN: usize = 44;

const NUM_CHANNELS: u16 = 1;
const PCM_FORMAT: u16 = 1;
const FMT_CHUNK_LEN: u32 = 16;

/// Canonical 44-byte RIFF/WAVE header for mono PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavHeader {
    pub format: AudioFormat,
    pub data_len: u32,
}

impl WavHeader {
    pub fn new(format: AudioFormat, data_len: usize) -> Self {
        Self {
            format,
            data_len: data_len as u32,
        }
    }

    pub fn block_align(&self) -> u16 {
        NUM_CHANNELS.wrapping_mul((self.format.bits_per_sample / 8) as u16)
    }

    pub fn byte_rate(&self) -> u32 {
        self.format
            .sample_rate
            .wrapping_mul(u32::from(self.block_align()))
    }

    /// RIFF chunk size: the whole file minus the `RIFF` id and this field.
    pub fn chunk_size(&self) -> u32 {
        self.data_len.wrapping_add(36)
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];

        // RIFF header
        out[0..4].copy_from_slice(b"RIFF");
        out[4..8].copy_from_slice(&self.chunk_size().to_le_bytes());
        out[8..12].copy_from_slice(b"WAVE");

        // fmt chunk
        out[12..16].copy_from_slice(b"fmt ");
        out[16..20].copy_from_slice(&FMT_CHUNK_LEN.to_le_bytes());
        out[20..22].copy_from_slice(&PCM_FORMAT.to_le_bytes());
        out[22..24].copy_from_slice(&NUM_CHANNELS.to_le_bytes());
        out[24..28].copy_from_slice(&self.format.sample_rate.to_le_bytes());
        out[28..32].copy_from_slice(&self.byte_rate().to_le_bytes());
        out[32..34].copy_from_slice(&self.block_align().to_le_bytes());
        out[34..36].copy_from_slice(&(self.format.bits_per_sample as u16).to_le_bytes());

        // data chunk
        out[36..40].copy_from_slice(b"data");
        out[40..44].copy_from_slice(&self.data_len.to_le_bytes());

        out
    }
}

/// Wrap raw PCM samples in a WAV container.
pub fn synthesize(payload: &[u8], format: AudioFormat) -> Vec<u8> {
    let header = WavHeader::new(format, payload.len());

    let mut wav = Vec::with_capacity(HEADER_LEN + payload.len());
    wav.extend_from_slice(&header.to_bytes());
    wav.extend_from_slice(payload);
    wav
}
