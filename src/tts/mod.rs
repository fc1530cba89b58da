pub mod gemini;
pub mod sse;

#[cfg(test)]
pub mod mock;

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};

use crate::audio::{AssembledAudio, AudioAssembler, AudioChunk};
use crate::error::AppError;

pub use gemini::GeminiClient;

pub const DEFAULT_VOICE: &str = "Enceladus";
pub const DEFAULT_TEMPERATURE: f32 = 1.0;

/// Prebuilt voices offered to clients.
pub const VOICES: &[&str] = &["Enceladus", "Puck", "Charon", "Kore", "Fenrir", "Aoede"];

#[derive(Debug, Clone, PartialEq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: String,
    pub temperature: f32,
}

pub type ChunkStream = BoxStream<'static, Result<AudioChunk, AppError>>;

/// Something that turns text into an ordered stream of audio chunks.
#[async_trait]
pub trait SpeechSource: Send + Sync {
    async fn stream(&self, request: &SpeechRequest) -> Result<ChunkStream, AppError>;
}

pub struct TtsService {
    source: Arc<dyn SpeechSource>,
}

impl TtsService {
    pub fn new(source: Arc<dyn SpeechSource>) -> Self {
        Self { source }
    }

    pub async fn speak(&self, request: &SpeechRequest) -> Result<AssembledAudio, AppError> {
        tracing::info!(
            "Generating speech: {} chars, voice={}, temperature={}",
            request.text.chars().count(),
            request.voice,
            request.temperature
        );

        // 1. Open upstream stream
        let mut chunks = self.source.stream(request).await?;

        // 2. Collect chunks in arrival order
        let mut assembler = AudioAssembler::new();
        while let Some(chunk) = chunks.next().await {
            assembler.push(chunk?);
        }
        if assembler.is_empty() {
            tracing::warn!("Upstream finished without any audio");
        }

        // 3. Wrap in a container
        let audio = assembler.finish()?;
        tracing::info!("Generated {} bytes of {}", audio.bytes.len(), audio.mime_type);

        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockSource;
    use super::*;

    fn request() -> SpeechRequest {
        SpeechRequest {
            text: "Hello".to_string(),
            voice: DEFAULT_VOICE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    #[tokio::test]
    async fn test_speak_concatenates_chunks() {
        let source = MockSource::with_chunks(vec![
            AudioChunk::new([0x01, 0x02], "audio/L16;rate=24000"),
            AudioChunk::default(),
            AudioChunk::new([0x03, 0x04], "audio/L16;rate=24000"),
        ]);
        let service = TtsService::new(Arc::new(source));

        let audio = service.speak(&request()).await.unwrap();
        assert_eq!(audio.bytes.len(), 48);
        assert_eq!(&audio.bytes[44..], &[0x01, 0x02, 0x03, 0x04]);
        assert_eq!(audio.mime_type, "audio/wav");
    }

    #[tokio::test]
    async fn test_speak_without_audio_fails() {
        let source = MockSource::with_chunks(vec![AudioChunk::default()]);
        let service = TtsService::new(Arc::new(source));

        let result = service.speak(&request()).await;
        assert!(matches!(result, Err(AppError::NoAudio)));
    }

    #[tokio::test]
    async fn test_speak_propagates_stream_error() {
        let source = MockSource::failing_after(
            vec![AudioChunk::new([0x01, 0x02], "audio/L16;rate=24000")],
            "connection reset",
        );
        let service = TtsService::new(Arc::new(source));

        match service.speak(&request()).await {
            Err(AppError::TtsError(msg)) => assert_eq!(msg, "connection reset"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_speak_forwards_request() {
        let source = Arc::new(MockSource::with_chunks(vec![AudioChunk::new(
            [0u8; 2],
            "audio/L16;rate=24000",
        )]));
        let service = TtsService::new(source.clone());

        service.speak(&request()).await.unwrap();
        assert_eq!(source.requests(), vec![request()]);
    }
}
