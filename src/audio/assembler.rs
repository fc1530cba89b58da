use super::{mime, wav, AudioChunk};
use crate::error::AppError;

pub const WAV_MIME_TYPE: &str = "audio/wav";
pub const WAV_EXTENSION: &str = ".wav";

/// A complete utterance, ready to be returned to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledAudio {
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub file_extension: String,
}

/// Collects streamed chunks for a single request.
#[derive(Debug, Default)]
pub struct AudioAssembler {
    buffer: Vec<u8>,
    mime_type: Option<String>,
    chunks: usize,
}

impl AudioAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: AudioChunk) {
        if chunk.data.is_empty() {
            tracing::trace!("Skipping chunk without audio data");
            return;
        }

        if self.mime_type.is_none() {
            tracing::debug!("Upstream audio format: {}", chunk.mime_type);
            self.mime_type = Some(chunk.mime_type);
        }

        self.chunks += 1;
        self.buffer.extend_from_slice(&chunk.data);
    }

    pub fn is_empty(&self) -> bool {
        self.chunks == 0
    }

    /// Finish the utterance, wrapping raw PCM in a WAV container unless the
    /// upstream already produced one.
    pub fn finish(self) -> Result<AssembledAudio, AppError> {
        let mime_type = match self.mime_type {
            Some(mime_type) if self.chunks > 0 => mime_type,
            _ => return Err(AppError::NoAudio),
        };

        tracing::debug!(
            "Assembled {} chunks ({} bytes) of {}",
            self.chunks,
            self.buffer.len(),
            mime_type
        );

        if mime::is_wav_container(&mime_type) {
            return Ok(AssembledAudio {
                bytes: self.buffer,
                mime_type,
                file_extension: WAV_EXTENSION.to_string(),
            });
        }

        let format = mime::parse(&mime_type);
        Ok(AssembledAudio {
            bytes: wav::synthesize(&self.buffer, format),
            mime_type: WAV_MIME_TYPE.to_string(),
            file_extension: WAV_EXTENSION.to_string(),
        })
    }
}
