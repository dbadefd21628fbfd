use crate::domain::audio::{AudioArtifact, AudioArtifactCache};
use crate::domain::language::{default_language, LanguageProfile};
use crate::domain::recipients::{PhoneNumber, RecipientList};

/// Everything one operator session is preparing to send
pub struct Campaign {
    recipients: RecipientList,
    language: &'static LanguageProfile,
    raw_message: String,
    translated_message: Option<String>,
    audio_artifact: Option<AudioArtifact>,
    audio_cache: AudioArtifactCache,
}

impl Campaign {
    pub fn new(default_message: String, audio_cache: AudioArtifactCache) -> Self {
        Self {
            recipients: RecipientList::new(),
            language: default_language(),
            raw_message: default_message,
            translated_message: None,
            audio_artifact: None,
            audio_cache,
        }
    }

    pub fn recipients(&self) -> &RecipientList {
        &self.recipients
    }

    pub fn recipients_mut(&mut self) -> &mut RecipientList {
        &mut self.recipients
    }

    pub fn language(&self) -> &'static LanguageProfile {
        self.language
    }

    pub fn raw_message(&self) -> &str {
        &self.raw_message
    }

    pub fn translated_message(&self) -> Option<&str> {
        self.translated_message.as_deref()
    }

    pub fn audio_artifact(&self) -> Option<&AudioArtifact> {
        self.audio_artifact.as_ref()
    }

    pub fn audio_cache(&self) -> &AudioArtifactCache {
        &self.audio_cache
    }

    /// Text that will actually be delivered
    pub fn effective_message(&self) -> &str {
        self.translated_message
            .as_deref()
            .unwrap_or(&self.raw_message)
    }

    /// Replace the message. Returns false when the text is unchanged.
    pub fn set_message(&mut self, message: String) -> bool {
        if message == self.raw_message {
            return false;
        }
        self.raw_message = message;
        self.translated_message = None;
        self.discard_audio();
        true
    }

    /// Switch the target language. Returns false when it is already selected.
    pub fn select_language(&mut self, profile: &'static LanguageProfile) -> bool {
        if profile.code == self.language.code {
            return false;
        }
        self.language = profile;
        self.translated_message = None;
        self.discard_audio();
        true
    }

    /// Store a translation. Prepared audio is dropped only when the delivered
    /// text changes; returns whether it did.
    pub fn set_translation(&mut self, translated: Option<String>) -> bool {
        let translated = translated.filter(|text| *text != self.raw_message);
        if translated == self.translated_message {
            return false;
        }
        self.translated_message = translated;
        self.discard_audio();
        true
    }

    /// Record audio prepared for the current effective message
    pub fn attach_audio(&mut self, artifact: AudioArtifact) {
        self.audio_artifact = Some(artifact);
    }

    /// Back to the pre-send state after a completed dispatch. The message, the
    /// language and the audio cache survive; the translation and the artifact
    /// reference do not.
    pub fn reset_after_dispatch(&mut self) {
        self.recipients.clear();
        self.translated_message = None;
        self.audio_artifact = None;
    }

    /// Drop only the recipients a cancelled dispatch already called
    pub fn consume_recipients(&mut self, attempted: &[PhoneNumber]) {
        self.recipients.remove_all(attempted);
    }

    fn discard_audio(&mut self) {
        self.audio_artifact = None;
        self.audio_cache.invalidate();
    }
}
