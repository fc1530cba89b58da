pub mod handlers;
pub mod routes;

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::tts::{SpeechRequest, DEFAULT_TEMPERATURE, DEFAULT_VOICE};

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: Option<String>,
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_voice() -> String {
    DEFAULT_VOICE.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

impl SpeakRequest {
    pub fn into_speech_request(self) -> Result<SpeechRequest, AppError> {
        let text = self
            .text
            .ok_or_else(|| AppError::BadRequest("Text is required".into()))?;

        Ok(SpeechRequest {
            text,
            voice: self.voice,
            temperature: self.temperature,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct SpeechResponse {
    pub success: bool,
    pub audio_data: String,
    pub mime_type: String,
    pub file_extension: String,
}

#[derive(Debug, Serialize)]
pub struct VoicesResponse {
    pub voices: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub api_key_configured: bool,
    pub version: String,
}
