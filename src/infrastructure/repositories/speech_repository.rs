use crate::domain::language::SynthesisBackend;
use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("speech synthesis is not configured")]
    NotConfigured,
    #[error("speech synthesis failed: {0}")]
    Provider(String),
}

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider (ElevenLabs, AWS Polly, ...)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single audio stream
#[async_trait]
pub trait SpeechRepository: Send + Sync {
    /// Which voice set of a language profile this repository understands
    fn backend(&self) -> SynthesisBackend;

    /// Synthesize `text` with the provider voice `voice_id`.
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    async fn synthesize(&self, text: &str, voice_id: &str) -> Result<Vec<u8>, SynthesisError>;
}

/// Stand-in when no synthesis credentials are present. Always fails so callers
/// take their spoken-text fallback.
pub struct DisabledSpeechRepository {
    backend: SynthesisBackend,
}

impl DisabledSpeechRepository {
    pub fn new(backend: SynthesisBackend) -> Self {
        Self { backend }
    }
}

#[async_trait]
impl SpeechRepository for DisabledSpeechRepository {
    fn backend(&self) -> SynthesisBackend {
        self.backend
    }

    async fn synthesize(&self, _text: &str, _voice_id: &str) -> Result<Vec<u8>, SynthesisError> {
        Err(SynthesisError::NotConfigured)
    }
}

/// Split text into batches that respect sentence boundaries.
/// Each batch is at most `max_batch_size` bytes; text without sentence
/// boundaries is cut on character boundaries.
pub fn split_into_batches(text: &str, max_batch_size: usize) -> Vec<String> {
    if text.len() <= max_batch_size {
        return vec![text.to_string()];
    }

    let mut batches = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if !current.is_empty() && current.len() + sentence.len() > max_batch_size {
            batches.push(current.trim().to_string());
            current.clear();
        }

        if sentence.len() > max_batch_size {
            batches.extend(chunk_by_chars(sentence, max_batch_size));
        } else {
            current.push_str(sentence);
        }
    }

    if !current.trim().is_empty() {
        batches.push(current.trim().to_string());
    }

    batches
}

fn split_sentences(text: &str) -> Vec<&str> {
    let Ok(boundary) = regex::Regex::new(r"[.!?]+\s+") else {
        return vec![text];
    };

    let mut sentences = Vec::new();
    let mut last_end = 0;
    for mat in boundary.find_iter(text) {
        sentences.push(&text[last_end..mat.end()]);
        last_end = mat.end();
    }
    if last_end < text.len() {
        sentences.push(&text[last_end..]);
    }
    sentences
}

fn chunk_by_chars(text: &str, max_batch_size: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    for c in text.chars() {
        if chunk.len() + c.len_utf8() > max_batch_size {
            chunks.push(std::mem::take(&mut chunk));
        }
        chunk.push(c);
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}
