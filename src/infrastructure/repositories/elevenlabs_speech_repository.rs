use super::speech_repository::{split_into_batches, SpeechRepository, SynthesisError};
use crate::domain::language::SynthesisBackend;
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// ElevenLabs accepts up to 5000 characters per request on multilingual models
const MAX_BATCH_SIZE: usize = 5000;
const XI_API_KEY_HEADER: &str = "xi-api-key";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct TextToSpeechRequest<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs implementation of the speech repository
pub struct ElevenLabsSpeechRepository {
    api_key: String,
    model_id: String,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl ElevenLabsSpeechRepository {
    pub fn new(api_key: String, model_id: String, api_base_url: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            api_key,
            model_id,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    /// Call ElevenLabs to synthesize a single text batch
    async fn call_elevenlabs(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        let url = format!(
            "{}/v1/text-to-speech/{}",
            self.api_base_url,
            urlencoding::encode(voice_id)
        );

        tracing::info!(
            model = %self.model_id,
            voice_id = voice_id,
            text_length = text.len(),
            "Calling ElevenLabs text-to-speech"
        );

        let response = self
            .http_client
            .post(&url)
            .header(XI_API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&TextToSpeechRequest {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, voice_id = voice_id, "ElevenLabs request failed");
                SynthesisError::Provider(format!("ElevenLabs request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                status = status.as_u16(),
                body = %body,
                voice_id = voice_id,
                "ElevenLabs rejected synthesis request"
            );
            return Err(SynthesisError::Provider(format!(
                "ElevenLabs returned {}: {}",
                status.as_u16(),
                body
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| SynthesisError::Provider(format!("Failed to read ElevenLabs audio: {}", e)))?;

        tracing::debug!(audio_size = audio.len(), "ElevenLabs audio received");
        Ok(audio.to_vec())
    }
}

#[async_trait]
impl SpeechRepository for ElevenLabsSpeechRepository {
    fn backend(&self) -> SynthesisBackend {
        SynthesisBackend::ElevenLabs
    }

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio = self.call_elevenlabs(batch, voice_id).await?;
            merged_audio.extend(audio);
            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "elevenlabs",
            model = %self.model_id,
            voice_id = voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
