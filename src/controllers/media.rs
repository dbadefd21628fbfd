use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::HostedAudioPublisher;

pub struct MediaController {
    publisher: Arc<HostedAudioPublisher>,
}

impl MediaController {
    pub fn new(publisher: Arc<HostedAudioPublisher>) -> Self {
        Self { publisher }
    }

    /// GET /media/{id} - Serve published audio to the telephony provider
    pub async fn get_audio(
        State(controller): State<Arc<MediaController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<impl IntoResponse> {
        let audio = controller
            .publisher
            .fetch(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("audio {}", id)))?;

        tracing::debug!(audio_id = %id, audio_size = audio.len(), "Serving published audio");

        let cache_control = format!("public, max-age={}", controller.publisher.ttl().as_secs());

        Ok((
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "audio/mpeg".to_string()),
                (header::CACHE_CONTROL, cache_control),
            ],
            audio,
        ))
    }
}
