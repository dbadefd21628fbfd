use moka::future::Cache;
use moka::policy::EvictionPolicy;
use serde::Serialize;
use std::time::Duration;

/// A synthesized-and-published message, tied to the inputs that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioArtifact {
    pub source_text: String,
    pub language: String,
    pub voice_id: String,
    pub url: String,
}

impl AudioArtifact {
    pub fn key(&self) -> ArtifactKey {
        ArtifactKey {
            source_text: self.source_text.clone(),
            language: self.language.clone(),
            voice_id: self.voice_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArtifactKey {
    pub source_text: String,
    pub language: String,
    pub voice_id: String,
}

impl ArtifactKey {
    pub fn new(source_text: &str, language: &str, voice_id: &str) -> Self {
        Self {
            source_text: source_text.to_string(),
            language: language.to_string(),
            voice_id: voice_id.to_string(),
        }
    }
}

/// Memoizes published audio so a message is synthesized once per
/// (text, language, voice). Entries expire with the hosted audio they point to.
#[derive(Clone)]
pub struct AudioArtifactCache {
    entries: Cache<ArtifactKey, AudioArtifact>,
}

impl AudioArtifactCache {
    pub fn new(ttl: Duration) -> Self {
        let entries = Cache::builder()
            .max_capacity(32)
            .eviction_policy(EvictionPolicy::lru())
            .time_to_live(ttl)
            .build();

        Self { entries }
    }

    pub async fn get(&self, key: &ArtifactKey) -> Option<AudioArtifact> {
        self.entries.get(key).await
    }

    pub async fn put(&self, artifact: AudioArtifact) {
        self.entries.insert(artifact.key(), artifact).await;
    }

    /// Drop every artifact. Called whenever message, translation or language changes.
    pub fn invalidate(&self) {
        self.entries.invalidate_all();
    }
}
