pub mod assembler;
pub mod mime;
pub mod wav;

pub use assembler::{AssembledAudio, AudioAssembler};

/// Sample layout of raw PCM audio. Always mono.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioFormat {
    pub sample_rate: u32,
    pub bits_per_sample: u32,
}

impl Default for AudioFormat {
    fn default() -> Self {
        Self {
            sample_rate: mime::DEFAULT_SAMPLE_RATE,
            bits_per_sample: mime::DEFAULT_BITS_PER_SAMPLE,
        }
    }
}

/// One piece of audio as delivered by the upstream generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AudioChunk {
    pub data: Vec<u8>,
    pub mime_type: String,
}

impl AudioChunk {
    pub fn new(data: impl Into<Vec<u8>>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}
