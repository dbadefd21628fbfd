use super::error::DispatchError;
use super::model::{
    CallAttempt, CallOutcome, DispatchState, DispatchStatus, DispatchSummary,
};
use super::router::VoiceProviderRouter;
use crate::domain::campaign::Campaign;
use crate::domain::recipients::CountryCode;
use crate::infrastructure::repositories::TelephonyRepository;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Places one call per recipient, in list order, with a single rendering
/// chosen up front for the whole batch.
pub struct CallDispatcher {
    router: VoiceProviderRouter,
    telephony_repo: Arc<dyn TelephonyRepository>,
    outbound_country_code: CountryCode,
}

impl CallDispatcher {
    pub fn new(
        router: VoiceProviderRouter,
        telephony_repo: Arc<dyn TelephonyRepository>,
        outbound_country_code: CountryCode,
    ) -> Self {
        Self {
            router,
            telephony_repo,
            outbound_country_code,
        }
    }

    pub fn router(&self) -> &VoiceProviderRouter {
        &self.router
    }

    /// Run a dispatch over the campaign's recipients.
    ///
    /// A failed placement is recorded and the loop moves on. Cancellation is
    /// checked between recipients; a cancelled run removes only the numbers it
    /// already attempted, a completed run resets the campaign.
    pub async fn dispatch(
        &self,
        campaign: &mut Campaign,
        progress: &(dyn Fn(DispatchStatus) + Send + Sync),
        cancel: &CancellationToken,
    ) -> Result<DispatchSummary, DispatchError> {
        if campaign.recipients().is_empty() {
            return Err(DispatchError::NoRecipients);
        }

        let recipients = campaign.recipients().snapshot();
        let total = recipients.len();
        let start = Instant::now();

        progress(DispatchStatus {
            state: DispatchState::Preparing,
            completed: 0,
            total,
        });

        let message = campaign.effective_message().to_string();
        let decision = self
            .router
            .resolve(campaign.language(), &message, campaign.audio_cache())
            .await;
        if let Some(artifact) = decision.artifact.clone() {
            campaign.attach_audio(artifact);
        }

        tracing::info!(
            recipients = total,
            language = campaign.language().code,
            render_mode = decision.mode.kind(),
            outbound_country_code = %self.outbound_country_code,
            "Starting call dispatch"
        );

        progress(DispatchStatus {
            state: DispatchState::Dispatching,
            completed: 0,
            total,
        });

        let mut attempts = Vec::with_capacity(total);
        let mut cancelled = false;

        for recipient in recipients {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }

            let dialed_number = recipient.dial_target(self.outbound_country_code);
            let outcome = match self
                .telephony_repo
                .place_call(&dialed_number, &decision.mode)
                .await
            {
                Ok(placed) => {
                    tracing::info!(
                        recipient = %recipient,
                        dialed_number = %dialed_number,
                        provider_call_id = %placed.provider_call_id,
                        provider_status = %placed.provider_status,
                        "Call attempt succeeded"
                    );
                    CallOutcome::Success {
                        provider_call_id: placed.provider_call_id,
                        provider_status: placed.provider_status,
                    }
                }
                Err(e) => {
                    tracing::warn!(
                        recipient = %recipient,
                        dialed_number = %dialed_number,
                        error = %e,
                        "Call attempt failed"
                    );
                    CallOutcome::Failure {
                        reason: e.to_string(),
                    }
                }
            };

            attempts.push(CallAttempt {
                recipient,
                dialed_number,
                outcome,
                attempted_at: Utc::now(),
            });

            progress(DispatchStatus {
                state: DispatchState::Dispatching,
                completed: attempts.len(),
                total,
            });
        }

        let summary = DispatchSummary::new(
            attempts,
            &decision.mode,
            decision.fallback_reason,
            cancelled,
        );

        tracing::info!(
            attempted = summary.attempted,
            succeeded = summary.succeeded,
            failed = summary.failed,
            cancelled = summary.cancelled,
            latency_ms = start.elapsed().as_millis() as u64,
            "Call dispatch finished"
        );

        progress(DispatchStatus {
            state: DispatchState::Completed,
            completed: summary.attempted,
            total,
        });

        if cancelled {
            let attempted: Vec<_> = summary.attempts.iter().map(|a| a.recipient.clone()).collect();
            campaign.consume_recipients(&attempted);
        } else {
            campaign.reset_after_dispatch();
        }

        Ok(summary)
    }
}
