use super::error::AudioPreparationError;
use super::model::RenderMode;
use crate::domain::audio::{ArtifactKey, AudioArtifact, AudioArtifactCache};
use crate::domain::language::LanguageProfile;
use crate::infrastructure::repositories::{AudioPublisher, SpeechRepository};
use std::sync::Arc;

/// Rendering chosen for a whole dispatch
#[derive(Debug, Clone)]
pub struct RenderDecision {
    pub mode: RenderMode,
    /// Set when the call plays published audio
    pub artifact: Option<AudioArtifact>,
    /// Set when a synthesized language fell back to spoken text
    pub fallback_reason: Option<String>,
}

/// Chooses between provider speech and pre-synthesized audio per language
pub struct VoiceProviderRouter {
    speech_repo: Arc<dyn SpeechRepository>,
    publisher: Arc<dyn AudioPublisher>,
}

impl VoiceProviderRouter {
    pub fn new(speech_repo: Arc<dyn SpeechRepository>, publisher: Arc<dyn AudioPublisher>) -> Self {
        Self {
            speech_repo,
            publisher,
        }
    }

    /// Decide how `message` is rendered in `profile`. Never fails: any synthesis
    /// or publishing problem yields spoken text with the profile's native voice.
    pub async fn resolve(
        &self,
        profile: &LanguageProfile,
        message: &str,
        cache: &AudioArtifactCache,
    ) -> RenderDecision {
        if !profile.is_synthesized() {
            return RenderDecision {
                mode: spoken_text(profile, message),
                artifact: None,
                fallback_reason: None,
            };
        }

        match self.obtain_artifact(profile, message, cache).await {
            Ok(artifact) => RenderDecision {
                mode: RenderMode::PlayAudio {
                    url: artifact.url.clone(),
                },
                artifact: Some(artifact),
                fallback_reason: None,
            },
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    language = profile.code,
                    fallback_voice = profile.native_voice(),
                    "Synthesized audio unavailable, falling back to provider speech"
                );
                RenderDecision {
                    mode: spoken_text(profile, message),
                    artifact: None,
                    fallback_reason: Some(e.to_string()),
                }
            }
        }
    }

    /// Cached artifact for (message, language, voice), or synthesize and publish
    /// a new one and remember it.
    pub async fn obtain_artifact(
        &self,
        profile: &LanguageProfile,
        message: &str,
        cache: &AudioArtifactCache,
    ) -> Result<AudioArtifact, AudioPreparationError> {
        if !profile.is_synthesized() {
            return Err(AudioPreparationError::NativeLanguage(profile.name.to_string()));
        }

        let backend = self.speech_repo.backend();
        let voice_id = profile
            .synthesis_voice(backend)
            .ok_or_else(|| AudioPreparationError::NoVoice {
                backend,
                language: profile.code.to_string(),
            })?;

        let key = ArtifactKey::new(message, profile.code, voice_id);
        if let Some(artifact) = cache.get(&key).await {
            tracing::info!(
                language = profile.code,
                voice_id = voice_id,
                url = %artifact.url,
                "Audio cache hit - reusing published audio"
            );
            return Ok(artifact);
        }

        tracing::info!(
            language = profile.code,
            voice_id = voice_id,
            text_length = message.len(),
            "Audio cache miss - synthesizing message"
        );

        let audio = self.speech_repo.synthesize(message, voice_id).await?;
        let url = self.publisher.publish(audio).await?;

        let artifact = AudioArtifact {
            source_text: message.to_string(),
            language: profile.code.to_string(),
            voice_id: voice_id.to_string(),
            url,
        };
        cache.put(artifact.clone()).await;

        Ok(artifact)
    }
}

fn spoken_text(profile: &LanguageProfile, message: &str) -> RenderMode {
    RenderMode::SpokenText {
        text: message.to_string(),
        voice: profile.native_voice().to_string(),
        language_code: profile.code.to_string(),
    }
}
