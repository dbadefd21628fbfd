use crate::domain::language::SynthesisBackend;
use crate::infrastructure::repositories::{PublishError, SynthesisError};

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Please add at least one phone number to the list")]
    NoRecipients,
}

/// Why pre-synthesized audio could not be produced for a message
#[derive(Debug, thiserror::Error)]
pub enum AudioPreparationError {
    #[error("{0} is spoken by the telephony provider and needs no generated audio")]
    NativeLanguage(String),
    #[error("no {backend} voice available for {language}")]
    NoVoice {
        backend: SynthesisBackend,
        language: String,
    },
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),
    #[error(transparent)]
    Publish(#[from] PublishError),
}
