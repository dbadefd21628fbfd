use super::speech_repository::{split_into_batches, SpeechRepository, SynthesisError};
use crate::domain::language::SynthesisBackend;
use async_trait::async_trait;
use aws_sdk_polly::{
    types::{Engine, OutputFormat, VoiceId},
    Client as PollyClient,
};
use std::sync::Arc;

/// AWS Polly has a limit of 3000 characters per request
const MAX_BATCH_SIZE: usize = 3000;

/// AWS Polly implementation of the speech repository.
/// `voice_id` is a Polly voice name such as `Kajal`.
pub struct PollySpeechRepository {
    polly_client: Arc<PollyClient>,
}

impl PollySpeechRepository {
    pub fn new(polly_client: Arc<PollyClient>) -> Self {
        Self { polly_client }
    }

    async fn call_polly(&self, text: &str, voice_name: &str) -> Result<Vec<u8>, SynthesisError> {
        let voice_id = VoiceId::from(voice_name);
        let engine = Engine::Neural;

        tracing::info!(
            voice = voice_name,
            engine = ?engine,
            output_format = "Mp3",
            text_length = text.len(),
            "Calling AWS Polly synthesize_speech"
        );

        let result = self
            .polly_client
            .synthesize_speech()
            .text(text)
            .voice_id(voice_id)
            .output_format(OutputFormat::Mp3)
            .engine(engine)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = ?e,
                    voice = voice_name,
                    text_length = text.len(),
                    "AWS Polly synthesize_speech failed"
                );
                SynthesisError::Provider(format!("AWS Polly error: {}", e))
            })?;

        let audio_stream = result.audio_stream.collect().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to collect audio stream from Polly response");
            SynthesisError::Provider(format!("Failed to read audio stream: {}", e))
        })?;

        Ok(audio_stream.into_bytes().to_vec())
    }
}

#[async_trait]
impl SpeechRepository for PollySpeechRepository {
    fn backend(&self) -> SynthesisBackend {
        SynthesisBackend::Polly
    }

    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        let start_time = std::time::Instant::now();
        let batches = split_into_batches(text, MAX_BATCH_SIZE);

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            merged_audio.extend(self.call_polly(batch, voice_id).await?);
            tracing::debug!(
                batch_index = index,
                total_audio_size = merged_audio.len(),
                "Batch synthesized and merged"
            );
        }

        tracing::info!(
            provider = "polly",
            voice = voice_id,
            latency_ms = start_time.elapsed().as_millis(),
            characters_count = text.len(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
