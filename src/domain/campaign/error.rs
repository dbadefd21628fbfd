use crate::domain::dispatch::{AudioPreparationError, DispatchError};
use crate::domain::recipients::RecipientError;
use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum CampaignServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    Duplicate(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    NoRecipients(String),
    #[error("a dispatch is already in progress")]
    DispatchInProgress,
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<RecipientError> for CampaignServiceError {
    fn from(err: RecipientError) -> Self {
        match err {
            RecipientError::Validation(msg) => CampaignServiceError::Invalid(msg),
            RecipientError::Duplicate(_) => CampaignServiceError::Duplicate(err.to_string()),
            RecipientError::NotFound(_) => CampaignServiceError::NotFound(err.to_string()),
        }
    }
}

impl From<DispatchError> for CampaignServiceError {
    fn from(err: DispatchError) -> Self {
        match err {
            DispatchError::NoRecipients => CampaignServiceError::NoRecipients(err.to_string()),
        }
    }
}

impl From<AudioPreparationError> for CampaignServiceError {
    fn from(err: AudioPreparationError) -> Self {
        match err {
            AudioPreparationError::NativeLanguage(_) | AudioPreparationError::NoVoice { .. } => {
                CampaignServiceError::Invalid(err.to_string())
            }
            AudioPreparationError::Synthesis(_) | AudioPreparationError::Publish(_) => {
                CampaignServiceError::Dependency(err.to_string())
            }
        }
    }
}

impl From<CampaignServiceError> for AppError {
    fn from(err: CampaignServiceError) -> Self {
        match err {
            CampaignServiceError::Invalid(msg) => AppError::BadRequest(msg),
            CampaignServiceError::Duplicate(msg) => AppError::Conflict(msg),
            CampaignServiceError::NotFound(msg) => AppError::NotFound(msg),
            CampaignServiceError::NoRecipients(msg) => AppError::PreconditionFailed(msg),
            CampaignServiceError::DispatchInProgress => AppError::Conflict(err.to_string()),
            CampaignServiceError::Dependency(msg) => AppError::ExternalService(msg),
            CampaignServiceError::Other(e) => AppError::Internal(e.to_string()),
        }
    }
}
