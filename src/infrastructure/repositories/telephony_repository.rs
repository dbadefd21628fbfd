use crate::domain::dispatch::RenderMode;
use async_trait::async_trait;
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum PlacementError {
    #[error("telephony provider is not configured")]
    NotConfigured,
    #[error("telephony request failed: {0}")]
    Transport(String),
    #[error("telephony provider rejected the call ({status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Provider acknowledgement of a placed call
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedCall {
    pub provider_call_id: String,
    pub provider_status: String,
}

/// Places outbound voice calls from the configured sender number
#[async_trait]
pub trait TelephonyRepository: Send + Sync {
    /// Place one call to `to` (E.164) rendering `render`
    async fn place_call(&self, to: &str, render: &RenderMode) -> Result<PlacedCall, PlacementError>;
}
