use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::sync::Arc;

use crate::domain::audio::AudioArtifact;
use crate::domain::campaign::{
    CampaignService, CampaignServiceApi, CampaignView, SelectLanguageRequest, SetMessageRequest,
    TranslationResponse,
};
use crate::domain::dispatch::{DispatchStatus, DispatchSummary};
use crate::domain::language::LanguageProfile;
use crate::domain::recipients::{AddRecipientRequest, PhoneNumber};
use crate::error::AppResult;
use crate::infrastructure::http::RequestId;

pub struct CampaignController {
    campaign_service: Arc<CampaignService>,
}

impl CampaignController {
    pub fn new(campaign_service: Arc<CampaignService>) -> Self {
        Self { campaign_service }
    }

    /// GET /api/campaign - Current campaign state
    pub async fn get_campaign(
        State(controller): State<Arc<CampaignController>>,
    ) -> Json<CampaignView> {
        Json(controller.campaign_service.snapshot().await)
    }

    /// POST /api/campaign/recipients - Add a recipient
    pub async fn add_recipient(
        State(controller): State<Arc<CampaignController>>,
        Json(request): Json<AddRecipientRequest>,
    ) -> AppResult<(StatusCode, Json<PhoneNumber>)> {
        let added = controller
            .campaign_service
            .add_recipient(&request.country_code, &request.number)
            .await?;
        Ok((StatusCode::CREATED, Json(added)))
    }

    /// DELETE /api/campaign/recipients/{number} - Remove a recipient
    pub async fn remove_recipient(
        State(controller): State<Arc<CampaignController>>,
        Path(number): Path<String>,
    ) -> AppResult<StatusCode> {
        controller.campaign_service.remove_recipient(&number).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// PUT /api/campaign/message - Replace the reminder message
    pub async fn set_message(
        State(controller): State<Arc<CampaignController>>,
        Json(request): Json<SetMessageRequest>,
    ) -> AppResult<StatusCode> {
        controller
            .campaign_service
            .set_message(request.message)
            .await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// PUT /api/campaign/language - Select the call language
    pub async fn select_language(
        State(controller): State<Arc<CampaignController>>,
        Json(request): Json<SelectLanguageRequest>,
    ) -> AppResult<Json<&'static LanguageProfile>> {
        let profile = controller
            .campaign_service
            .select_language(&request.code)
            .await?;
        Ok(Json(profile))
    }

    /// POST /api/campaign/translate - Translate the message into the selected language
    pub async fn translate(
        State(controller): State<Arc<CampaignController>>,
    ) -> Json<TranslationResponse> {
        Json(controller.campaign_service.translate().await)
    }

    /// POST /api/campaign/audio - Synthesize and publish audio ahead of dispatch
    pub async fn generate_audio(
        State(controller): State<Arc<CampaignController>>,
    ) -> AppResult<Json<AudioArtifact>> {
        let artifact = controller.campaign_service.generate_audio().await?;
        Ok(Json(artifact))
    }

    /// POST /api/campaign/dispatch - Call every recipient
    pub async fn dispatch(
        State(controller): State<Arc<CampaignController>>,
        Extension(request_id): Extension<RequestId>,
    ) -> AppResult<Json<DispatchSummary>> {
        tracing::info!(request_id = %request_id.0, "Dispatch requested");

        let summary = controller.campaign_service.dispatch().await?;
        Ok(Json(summary))
    }

    /// GET /api/campaign/dispatch/status - Dispatch state and progress
    pub async fn dispatch_status(
        State(controller): State<Arc<CampaignController>>,
    ) -> Json<DispatchStatus> {
        Json(controller.campaign_service.dispatch_status())
    }

    /// POST /api/campaign/dispatch/cancel - Stop the running dispatch before its next call
    pub async fn cancel_dispatch(State(controller): State<Arc<CampaignController>>) -> StatusCode {
        if controller.campaign_service.cancel_dispatch() {
            StatusCode::ACCEPTED
        } else {
            StatusCode::NO_CONTENT
        }
    }
}
