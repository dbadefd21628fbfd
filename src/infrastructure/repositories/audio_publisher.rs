use async_trait::async_trait;
use axum::body::Bytes;
use moka::future::Cache;
use moka::policy::EvictionPolicy;
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    #[error("audio publishing is not configured (PUBLIC_BASE_URL missing)")]
    NotConfigured,
    #[error("cannot publish empty audio")]
    EmptyAudio,
    #[error("audio of {size} bytes exceeds the {limit} byte media store")]
    TooLarge { size: usize, limit: u64 },
}

/// Upper bound on the bytes of audio held for playback at once
const DEFAULT_MEDIA_CAPACITY_BYTES: u64 = 256 * 1024 * 1024;

/// Stores audio somewhere the telephony provider can fetch it
#[async_trait]
pub trait AudioPublisher: Send + Sync {
    /// Returns a URL serving `audio` as MP3
    async fn publish(&self, audio: Vec<u8>) -> Result<String, PublishError>;
}

/// Hosts published audio from this service under `/media/{id}` for a bounded time
pub struct HostedAudioPublisher {
    public_base_url: Option<String>,
    media: Cache<Uuid, Bytes>,
    ttl: Duration,
    capacity_bytes: u64,
}

impl HostedAudioPublisher {
    pub fn new(public_base_url: Option<String>, ttl: Duration) -> Self {
        Self::with_capacity(public_base_url, ttl, DEFAULT_MEDIA_CAPACITY_BYTES)
    }

    /// The store is weighed in bytes and evicts least recently used audio, so
    /// the clip published last is always admitted
    pub fn with_capacity(
        public_base_url: Option<String>,
        ttl: Duration,
        capacity_bytes: u64,
    ) -> Self {
        let media = Cache::builder()
            .max_capacity(capacity_bytes)
            .weigher(|_id: &Uuid, audio: &Bytes| u32::try_from(audio.len()).unwrap_or(u32::MAX))
            .eviction_policy(EvictionPolicy::lru())
            .time_to_live(ttl)
            .build();

        Self {
            public_base_url: public_base_url.map(|url| url.trim_end_matches('/').to_string()),
            media,
            ttl,
            capacity_bytes,
        }
    }

    /// How long a published URL stays fetchable
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn is_configured(&self) -> bool {
        self.public_base_url.is_some()
    }

    pub async fn fetch(&self, id: Uuid) -> Option<Bytes> {
        self.media.get(&id).await
    }
}

#[async_trait]
impl AudioPublisher for HostedAudioPublisher {
    async fn publish(&self, audio: Vec<u8>) -> Result<String, PublishError> {
        let base_url = self
            .public_base_url
            .as_deref()
            .ok_or(PublishError::NotConfigured)?;

        if audio.is_empty() {
            return Err(PublishError::EmptyAudio);
        }
        if audio.len() as u64 > self.capacity_bytes {
            return Err(PublishError::TooLarge {
                size: audio.len(),
                limit: self.capacity_bytes,
            });
        }

        let id = Uuid::new_v4();
        let size = audio.len();
        self.media.insert(id, Bytes::from(audio)).await;

        let url = format!("{}/media/{}", base_url, id);
        tracing::info!(
            media_id = %id,
            audio_size_bytes = size,
            ttl_secs = self.ttl.as_secs(),
            url = %url,
            "Audio published"
        );

        Ok(url)
    }
}
