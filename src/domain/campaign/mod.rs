pub mod error;
pub mod model;
pub mod service;

pub use error::CampaignServiceError;
pub use model::Campaign;
pub use service::{CampaignService, CampaignServiceApi};

use crate::domain::audio::AudioArtifact;
use crate::domain::dispatch::DispatchStatus;
use crate::domain::language::LanguageProfile;
use crate::domain::recipients::PhoneNumber;
use serde::{Deserialize, Serialize};

/// Response for GET /api/campaign
#[derive(Debug, Clone, Serialize)]
pub struct CampaignView {
    pub recipients: Vec<PhoneNumber>,
    pub language: &'static LanguageProfile,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_artifact: Option<AudioArtifact>,
    pub dispatch: DispatchStatus,
}

/// Request for PUT /api/campaign/message
#[derive(Debug, Serialize, Deserialize)]
pub struct SetMessageRequest {
    pub message: String,
}

/// Request for PUT /api/campaign/language
#[derive(Debug, Serialize, Deserialize)]
pub struct SelectLanguageRequest {
    pub code: String,
}

/// Response for POST /api/campaign/translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationResponse {
    /// The message calls will now deliver
    pub message: String,
    pub translated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}
