use super::translation_repository::{TranslationError, TranslationRepository};
use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;

/// OpenAI chat-completion implementation of the translation repository
pub struct OpenAiTranslationRepository {
    client: Arc<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTranslationRepository {
    pub fn new(client: Arc<Client<OpenAIConfig>>, model: String) -> Self {
        Self { client, model }
    }

    fn instructions(target_language_code: &str, target_language_name: &str) -> String {
        format!(
            "Translate the user's message into {} ({}). The text will be read aloud on a phone call. \
             Keep numbers, amounts, dates, account numbers and phone numbers exact. \
             Reply with the translation only, without quotes or commentary.",
            target_language_name, target_language_code
        )
    }
}

#[async_trait]
impl TranslationRepository for OpenAiTranslationRepository {
    async fn translate(
        &self,
        text: &str,
        target_language_code: &str,
        target_language_name: &str,
    ) -> Result<String, TranslationError> {
        let start_time = std::time::Instant::now();
        let backend_error = |e: async_openai::error::OpenAIError| TranslationError::Backend(e.to_string());

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(0.0)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(Self::instructions(target_language_code, target_language_name))
                    .build()
                    .map_err(backend_error)?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(text)
                    .build()
                    .map_err(backend_error)?
                    .into(),
            ])
            .build()
            .map_err(backend_error)?;

        let response = self.client.chat().create(request).await.map_err(|e| {
            tracing::error!(
                error = %e,
                model = %self.model,
                target_language = target_language_code,
                "OpenAI translation call failed"
            );
            TranslationError::Backend(e.to_string())
        })?;

        let translated = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(TranslationError::EmptyResponse)?;

        tracing::info!(
            provider = "openai",
            model = %self.model,
            target_language = target_language_code,
            latency_ms = start_time.elapsed().as_millis(),
            source_length = text.len(),
            translated_length = translated.len(),
            "Translation completed"
        );

        Ok(translated)
    }
}
