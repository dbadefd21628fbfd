use async_openai::{config::OpenAIConfig, Client as OpenAIClient};
use reminder_caller::controllers::{
    campaign::CampaignController, health::ProviderReadiness, media::MediaController,
};
use reminder_caller::domain::audio::AudioArtifactCache;
use reminder_caller::domain::campaign::{Campaign, CampaignService};
use reminder_caller::domain::dispatch::{CallDispatcher, VoiceProviderRouter};
use reminder_caller::domain::language::SynthesisBackend;
use reminder_caller::infrastructure::config::{Config, LogFormat};
use reminder_caller::infrastructure::http::{build_router, start_http_server};
use reminder_caller::infrastructure::repositories::{
    DisabledSpeechRepository, ElevenLabsSpeechRepository, HostedAudioPublisher,
    OpenAiTranslationRepository, PassthroughTranslationRepository, PollySpeechRepository,
    SpeechRepository, TranslationRepository, TwilioCallRepository,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Reminder Caller on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate provider repositories
    tracing::info!("Instantiating repositories...");
    let telephony_repo = Arc::new(TwilioCallRepository::new(
        config.twilio_credentials(),
        config.twilio_api_base_url.clone(),
    ));
    if !telephony_repo.is_configured() {
        tracing::warn!("Twilio credentials not found. Every call placement will fail until TWILIO_ACCOUNT_SID, TWILIO_AUTH_TOKEN and TWILIO_PHONE_NUMBER are set");
    }

    let translation_repo = build_translation_repository(&config);
    let (speech_repo, synthesis_configured) = build_speech_repository(&config).await;

    let publisher = Arc::new(HostedAudioPublisher::new(
        config.public_base_url.clone(),
        config.audio_ttl(),
    ));
    if !publisher.is_configured() {
        tracing::warn!("PUBLIC_BASE_URL not set. Synthesized languages will fall back to provider speech");
    }

    // 2. Instantiate domain services
    tracing::info!("Instantiating services...");
    let campaign = Campaign::new(
        config.default_message.clone(),
        AudioArtifactCache::new(config.audio_ttl()),
    );
    let dispatcher = CallDispatcher::new(
        VoiceProviderRouter::new(speech_repo.clone(), publisher.clone()),
        telephony_repo.clone(),
        config.outbound_country_code,
    );
    let campaign_service = Arc::new(CampaignService::new(
        campaign,
        dispatcher,
        translation_repo,
    ));

    // 3. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let campaign_controller = Arc::new(CampaignController::new(campaign_service));
    let media_controller = Arc::new(MediaController::new(publisher.clone()));
    let readiness = Arc::new(ProviderReadiness {
        telephony: telephony_repo.is_configured(),
        translation: config.openai_api_key.is_some(),
        synthesis: synthesis_configured.then(|| speech_repo.backend().to_string()),
        publishing: publisher.is_configured(),
    });

    // Start HTTP server with all routes
    let app = build_router(campaign_controller, media_controller, readiness);
    start_http_server(config, app).await?;

    Ok(())
}

fn build_translation_repository(config: &Config) -> Arc<dyn TranslationRepository> {
    match &config.openai_api_key {
        Some(api_key) => {
            tracing::info!(model = %config.translation_model, "OpenAI translation enabled");
            let client = OpenAIClient::with_config(OpenAIConfig::new().with_api_key(api_key));
            Arc::new(OpenAiTranslationRepository::new(
                Arc::new(client),
                config.translation_model.clone(),
            ))
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set. Messages will be sent untranslated");
            Arc::new(PassthroughTranslationRepository)
        }
    }
}

async fn build_speech_repository(config: &Config) -> (Arc<dyn SpeechRepository>, bool) {
    match config.synthesis_provider {
        SynthesisBackend::ElevenLabs => match &config.elevenlabs_api_key {
            Some(api_key) => {
                tracing::info!(model = %config.elevenlabs_model_id, "ElevenLabs synthesis enabled");
                (
                    Arc::new(ElevenLabsSpeechRepository::new(
                        api_key.clone(),
                        config.elevenlabs_model_id.clone(),
                        config.elevenlabs_api_base_url.clone(),
                    )),
                    true,
                )
            }
            None => {
                tracing::warn!("ELEVENLABS_API_KEY not set. Speech synthesis disabled");
                (
                    Arc::new(DisabledSpeechRepository::new(SynthesisBackend::ElevenLabs)),
                    false,
                )
            }
        },
        SynthesisBackend::Polly => {
            tracing::info!("Initializing AWS Polly client with region: {}", config.aws_region);

            let has_access_key = std::env::var("AWS_ACCESS_KEY_ID").is_ok();
            let has_secret_key = std::env::var("AWS_SECRET_ACCESS_KEY").is_ok();
            if !has_access_key || !has_secret_key {
                tracing::warn!("AWS credentials not found in environment variables. Will attempt to use other credential providers (instance metadata, etc.)");
            }

            let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(config.aws_region.clone()))
                .load()
                .await;
            let polly_client = aws_sdk_polly::Client::new(&aws_config);

            (
                Arc::new(PollySpeechRepository::new(Arc::new(polly_client))),
                true,
            )
        }
    }
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "reminder_caller=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "reminder_caller=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
