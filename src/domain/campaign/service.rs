use super::error::CampaignServiceError;
use super::model::Campaign;
use super::{CampaignView, TranslationResponse};
use crate::domain::audio::AudioArtifact;
use crate::domain::dispatch::{CallDispatcher, DispatchState, DispatchStatus, DispatchSummary};
use crate::domain::language::{find_language, LanguageProfile};
use crate::domain::recipients::PhoneNumber;
use crate::infrastructure::repositories::TranslationRepository;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;

/// Owns the single live campaign and serializes every mutation of it.
/// Readers get the last published view and never wait behind a dispatch.
pub struct CampaignService {
    campaign: Mutex<Campaign>,
    dispatcher: CallDispatcher,
    translation_repo: Arc<dyn TranslationRepository>,
    dispatch_gate: Mutex<()>,
    status: watch::Sender<DispatchStatus>,
    view: watch::Sender<CampaignView>,
    running: parking_lot::Mutex<Option<CancellationToken>>,
}

impl CampaignService {
    pub fn new(
        campaign: Campaign,
        dispatcher: CallDispatcher,
        translation_repo: Arc<dyn TranslationRepository>,
    ) -> Self {
        let (status, _) = watch::channel(DispatchStatus::idle());
        let (view, _) = watch::channel(view_of(&campaign, DispatchStatus::idle()));

        Self {
            campaign: Mutex::new(campaign),
            dispatcher,
            translation_repo,
            dispatch_gate: Mutex::new(()),
            status,
            view,
            running: parking_lot::Mutex::new(None),
        }
    }

    /// Called with the campaign lock held, after every mutation
    fn publish_view(&self, campaign: &Campaign) {
        self.view.send_replace(view_of(campaign, self.dispatch_status()));
    }
}

fn view_of(campaign: &Campaign, dispatch: DispatchStatus) -> CampaignView {
    CampaignView {
        recipients: campaign.recipients().snapshot(),
        language: campaign.language(),
        message: campaign.raw_message().to_string(),
        translated_message: campaign.translated_message().map(str::to_string),
        audio_artifact: campaign.audio_artifact().cloned(),
        dispatch,
    }
}

#[async_trait]
pub trait CampaignServiceApi: Send + Sync {
    /// Current recipients, message, language, audio and dispatch progress
    async fn snapshot(&self) -> CampaignView;

    async fn add_recipient(
        &self,
        country_code: &str,
        number: &str,
    ) -> Result<PhoneNumber, CampaignServiceError>;

    /// Remove by full number, e.g. `+911234567890`
    async fn remove_recipient(&self, full_number: &str)
        -> Result<PhoneNumber, CampaignServiceError>;

    /// Replace the message. Clears any translation and prepared audio.
    async fn set_message(&self, message: String) -> Result<(), CampaignServiceError>;

    async fn select_language(
        &self,
        code: &str,
    ) -> Result<&'static LanguageProfile, CampaignServiceError>;

    /// Translate the message into the selected language.
    ///
    /// Never fails: a translation backend error keeps the original text and
    /// reports why in `fallback_reason`.
    async fn translate(&self) -> TranslationResponse;

    /// Synthesize and publish the effective message ahead of dispatch.
    /// Only valid for languages rendered from synthesized audio.
    async fn generate_audio(&self) -> Result<AudioArtifact, CampaignServiceError>;

    /// Call every recipient once. Rejected while another dispatch runs.
    async fn dispatch(&self) -> Result<DispatchSummary, CampaignServiceError>;

    fn dispatch_status(&self) -> DispatchStatus;

    /// Ask the running dispatch to stop before its next recipient.
    /// Returns false when nothing is running.
    fn cancel_dispatch(&self) -> bool;
}

#[async_trait]
impl CampaignServiceApi for CampaignService {
    async fn snapshot(&self) -> CampaignView {
        let mut view = self.view.borrow().clone();
        view.dispatch = self.dispatch_status();
        view
    }

    async fn add_recipient(
        &self,
        country_code: &str,
        number: &str,
    ) -> Result<PhoneNumber, CampaignServiceError> {
        let mut campaign = self.campaign.lock().await;
        let added = campaign
            .recipients_mut()
            .add(country_code.trim(), number.trim())?;

        tracing::info!(
            recipient = %added,
            recipients = campaign.recipients().len(),
            "Recipient added"
        );
        self.publish_view(&campaign);

        Ok(added)
    }

    async fn remove_recipient(
        &self,
        full_number: &str,
    ) -> Result<PhoneNumber, CampaignServiceError> {
        let mut campaign = self.campaign.lock().await;
        let removed = campaign.recipients_mut().remove(full_number)?;

        tracing::info!(recipient = %removed, "Recipient removed");
        self.publish_view(&campaign);

        Ok(removed)
    }

    async fn set_message(&self, message: String) -> Result<(), CampaignServiceError> {
        if message.trim().is_empty() {
            return Err(CampaignServiceError::Invalid(
                "Please enter a message".to_string(),
            ));
        }

        let mut campaign = self.campaign.lock().await;
        if campaign.set_message(message) {
            tracing::info!(
                message_length = campaign.raw_message().len(),
                "Message updated, translation and audio discarded"
            );
            self.publish_view(&campaign);
        }

        Ok(())
    }

    async fn select_language(
        &self,
        code: &str,
    ) -> Result<&'static LanguageProfile, CampaignServiceError> {
        let profile = find_language(code).ok_or_else(|| {
            CampaignServiceError::Invalid(format!("Unsupported language: {}", code))
        })?;

        let mut campaign = self.campaign.lock().await;
        if campaign.select_language(profile) {
            tracing::info!(
                language = profile.code,
                synthesized = profile.is_synthesized(),
                "Language selected"
            );
            self.publish_view(&campaign);
        }

        Ok(profile)
    }

    async fn translate(&self) -> TranslationResponse {
        let mut campaign = self.campaign.lock().await;
        let profile = campaign.language();

        if profile.is_english() {
            campaign.set_translation(None);
            self.publish_view(&campaign);
            return TranslationResponse {
                message: campaign.raw_message().to_string(),
                translated: false,
                fallback_reason: None,
            };
        }

        let start = Instant::now();
        let source = campaign.raw_message().to_string();
        let result = self
            .translation_repo
            .translate(&source, profile.code, profile.name)
            .await;

        let response = match result {
            Ok(text) if text != source => {
                tracing::info!(
                    language = profile.code,
                    source_length = source.len(),
                    translated_length = text.len(),
                    latency_ms = start.elapsed().as_millis() as u64,
                    "Message translated"
                );
                campaign.set_translation(Some(text.clone()));
                TranslationResponse {
                    message: text,
                    translated: true,
                    fallback_reason: None,
                }
            }
            Ok(_) => {
                campaign.set_translation(None);
                TranslationResponse {
                    message: source,
                    translated: false,
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    language = profile.code,
                    "Translation failed, keeping original message"
                );
                campaign.set_translation(None);
                TranslationResponse {
                    message: source,
                    translated: false,
                    fallback_reason: Some(e.to_string()),
                }
            }
        };

        self.publish_view(&campaign);
        response
    }

    async fn generate_audio(&self) -> Result<AudioArtifact, CampaignServiceError> {
        let mut campaign = self.campaign.lock().await;
        let message = campaign.effective_message().to_string();

        let artifact = self
            .dispatcher
            .router()
            .obtain_artifact(campaign.language(), &message, campaign.audio_cache())
            .await?;
        campaign.attach_audio(artifact.clone());
        self.publish_view(&campaign);

        Ok(artifact)
    }

    async fn dispatch(&self) -> Result<DispatchSummary, CampaignServiceError> {
        let _running = self
            .dispatch_gate
            .try_lock()
            .map_err(|_| CampaignServiceError::DispatchInProgress)?;

        // Cancellable from here on, even while waiting for the campaign
        let token = CancellationToken::new();
        *self.running.lock() = Some(token.clone());

        let mut campaign = self.campaign.lock().await;
        let publish = |status: DispatchStatus| {
            self.status.send_replace(status);
        };
        let result = self.dispatcher.dispatch(&mut campaign, &publish, &token).await;

        *self.running.lock() = None;

        if let Ok(summary) = &result {
            let total = self.status.borrow().total;
            self.status.send_replace(DispatchStatus {
                state: DispatchState::Idle,
                completed: summary.attempted,
                total,
            });
        }
        self.publish_view(&campaign);

        Ok(result?)
    }

    fn dispatch_status(&self) -> DispatchStatus {
        *self.status.borrow()
    }

    fn cancel_dispatch(&self) -> bool {
        match self.running.lock().as_ref() {
            Some(token) => {
                tracing::info!("Dispatch cancellation requested");
                token.cancel();
                true
            }
            None => false,
        }
    }
}
