use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use futures::StreamExt;
use serde::{Deserialize, Serialize};

use super::sse::SseDecoder;
use super::{ChunkStream, SpeechRequest, SpeechSource};
use crate::audio::AudioChunk;
use crate::config::Config;
use crate::error::AppError;

/// Streams speech from the Gemini `streamGenerateContent` endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("gemini-tts-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            endpoint: stream_endpoint(&config.api_base, &config.model),
        })
    }
}

#[async_trait]
impl SpeechSource for GeminiClient {
    async fn stream(&self, request: &SpeechRequest) -> Result<ChunkStream, AppError> {
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::new(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::TtsError(format!(
                "Gemini API returned {}: {}",
                status,
                upstream_message(&body)
            )));
        }

        let mut body = Box::pin(response.bytes_stream());
        let chunks = async_stream::stream! {
            let mut decoder = SseDecoder::new();
            while let Some(bytes) = body.next().await {
                match bytes {
                    Ok(bytes) => {
                        for event in decoder.feed(&bytes) {
                            yield parse_event(&event);
                        }
                    }
                    Err(e) => {
                        yield Err(AppError::from(e));
                        return;
                    }
                }
            }
            if let Some(event) = decoder.finish() {
                yield parse_event(&event);
            }
        };

        Ok(Box::pin(chunks))
    }
}

fn stream_endpoint(api_base: &str, model: &str) -> String {
    format!(
        "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
        api_base, model
    )
}

/// Convert one streamed response into a chunk. Responses that carry no
/// inline audio become an empty chunk, which the assembler skips.
fn parse_event(event: &str) -> Result<AudioChunk, AppError> {
    let response: GenerateResponse = serde_json::from_str(event)?;

    if let Some(error) = response.error {
        return Err(AppError::TtsError(error.to_string()));
    }

    let inline = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.inline_data);

    let Some(inline) = inline else {
        return Ok(AudioChunk::default());
    };

    let data = match inline.data.as_deref() {
        Some(encoded) if !encoded.is_empty() => general_purpose::STANDARD
            .decode(encoded)
            .map_err(|e| AppError::TtsError(format!("Invalid audio payload: {}", e)))?,
        _ => Vec::new(),
    };

    Ok(AudioChunk::new(data, inline.mime_type.unwrap_or_default()))
}

fn upstream_message(body: &str) -> String {
    match serde_json::from_str::<GenerateResponse>(body) {
        Ok(GenerateResponse {
            error: Some(error), ..
        }) => error.to_string(),
        _ => body.trim().to_string(),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    temperature: f32,
    response_modalities: [&'a str; 1],
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(request: &'a SpeechRequest) -> Self {
        Self {
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart {
                    text: &request.text,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: request.temperature,
                response_modalities: ["audio"],
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig {
                            voice_name: &request.voice,
                        },
                    },
                },
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    parts: Option<Vec<ResponsePart>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: Option<String>,
    data: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    code: Option<u16>,
    message: Option<String>,
    status: Option<String>,
}

impl std::fmt::Display for GeminiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = self.message.as_deref().unwrap_or("unknown error");
        match (&self.status, self.code) {
            (Some(status), Some(code)) => write!(f, "{} ({} {})", message, code, status),
            (Some(status), None) => write!(f, "{} ({})", message, status),
            (None, Some(code)) => write!(f, "{} ({})", message, code),
            (None, None) => write!(f, "{}", message),
        }
    }
}
