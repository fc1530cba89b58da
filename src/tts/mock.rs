use std::sync::Mutex;

use async_trait::async_trait;
use futures::stream;

use super::{ChunkStream, SpeechRequest, SpeechSource};
use crate::audio::AudioChunk;
use crate::error::AppError;

/// Replays a fixed list of chunks, optionally ending with an error.
#[derive(Default)]
pub struct MockSource {
    chunks: Vec<AudioChunk>,
    error: Option<String>,
    requests: Mutex<Vec<SpeechRequest>>,
}

impl MockSource {
    pub fn with_chunks(chunks: Vec<AudioChunk>) -> Self {
        Self {
            chunks,
            ..Default::default()
        }
    }

    pub fn failing_after(chunks: Vec<AudioChunk>, error: &str) -> Self {
        Self {
            chunks,
            error: Some(error.to_string()),
            ..Default::default()
        }
    }

    pub fn requests(&self) -> Vec<SpeechRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechSource for MockSource {
    async fn stream(&self, request: &SpeechRequest) -> Result<ChunkStream, AppError> {
        self.requests.lock().unwrap().push(request.clone());

        let mut items: Vec<Result<AudioChunk, AppError>> =
            self.chunks.iter().cloned().map(Ok).collect();
        if let Some(error) = &self.error {
            items.push(Err(AppError::TtsError(error.clone())));
        }

        Ok(Box::pin(stream::iter(items)))
    }
}
