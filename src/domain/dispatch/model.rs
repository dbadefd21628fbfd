use crate::domain::recipients::PhoneNumber;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// How every call of one dispatch is rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderMode {
    /// The provider reads `text` aloud with one of its built-in voices
    SpokenText {
        text: String,
        voice: String,
        language_code: String,
    },
    /// The provider plays pre-synthesized audio fetched from `url`
    PlayAudio { url: String },
}

impl RenderMode {
    pub fn kind(&self) -> &'static str {
        match self {
            RenderMode::SpokenText { .. } => "spoken_text",
            RenderMode::PlayAudio { .. } => "play_audio",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum CallOutcome {
    Success {
        provider_call_id: String,
        provider_status: String,
    },
    Failure {
        reason: String,
    },
}

/// Result of one placement request. Never mutated once recorded.
#[derive(Debug, Clone, Serialize)]
pub struct CallAttempt {
    pub recipient: PhoneNumber,
    pub dialed_number: String,
    pub outcome: CallOutcome,
    pub attempted_at: DateTime<Utc>,
}

impl CallAttempt {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, CallOutcome::Success { .. })
    }
}

/// Outcome of one dispatch, attempts in recipient order
#[derive(Debug, Clone, Serialize)]
pub struct DispatchSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: bool,
    pub render_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
    pub attempts: Vec<CallAttempt>,
}

impl DispatchSummary {
    pub fn new(
        attempts: Vec<CallAttempt>,
        render: &RenderMode,
        fallback_reason: Option<String>,
        cancelled: bool,
    ) -> Self {
        let succeeded = attempts.iter().filter(|a| a.is_success()).count();
        Self {
            attempted: attempts.len(),
            succeeded,
            failed: attempts.len() - succeeded,
            cancelled,
            render_mode: render.kind(),
            fallback_reason,
            attempts,
        }
    }

    /// Single line shown to the operator after a run
    pub fn status_message(&self) -> String {
        let mut message = format!(
            "Successfully initiated calls to {} of {} numbers.",
            self.succeeded, self.attempted
        );
        if self.failed > 0 {
            message.push_str(&format!(" {} failed.", self.failed));
        }
        if self.cancelled {
            message.push_str(" Dispatch was cancelled before all numbers were called.");
        }
        message
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchState {
    Idle,
    Preparing,
    Dispatching,
    Completed,
}

/// Progress snapshot: `completed` never decreases within a dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchStatus {
    pub state: DispatchState,
    pub completed: usize,
    pub total: usize,
}

impl DispatchStatus {
    pub fn idle() -> Self {
        Self {
            state: DispatchState::Idle,
            completed: 0,
            total: 0,
        }
    }
}
