use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    #[error("translation backend error: {0}")]
    Backend(String),
    #[error("translation backend returned no text")]
    EmptyResponse,
}

/// Repository for message translation.
/// Abstracts the underlying translation provider.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate `text` into the language identified by `target_language_code`
    /// (BCP-47 style, e.g. `hi-IN`). `target_language_name` is the human readable
    /// name for providers that work from prompts.
    async fn translate(
        &self,
        text: &str,
        target_language_code: &str,
        target_language_name: &str,
    ) -> Result<String, TranslationError>;
}

/// Used when no translation backend is configured: every message stays as written
pub struct PassthroughTranslationRepository;

#[async_trait]
impl TranslationRepository for PassthroughTranslationRepository {
    async fn translate(
        &self,
        text: &str,
        target_language_code: &str,
        _target_language_name: &str,
    ) -> Result<String, TranslationError> {
        tracing::debug!(
            target_language = target_language_code,
            "Translation not configured, keeping original text"
        );
        Ok(text.to_string())
    }
}
