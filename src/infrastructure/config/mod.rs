use crate::domain::language::SynthesisBackend;
use crate::domain::recipients::CountryCode;
use crate::infrastructure::repositories::TwilioCredentials;
use std::env;
use std::time::Duration;

const DEFAULT_MESSAGE: &str = "Hello, this is an automated payment reminder from Prime Financial Bank. \
Your loan account number PF123456789 has an upcoming EMI payment due on 15th November 2025. \
The EMI amount is Rupees 25,000. Your outstanding loan balance is Rupees 4,50,000. \
Please ensure the payment is made on or before the due date to avoid late payment charges of Rupees 500 \
and impact on your credit score. You can make the payment through our mobile app, internet banking, \
or visit the nearest branch. For any queries, please call our customer care at 1800-555-0123. \
Thank you for banking with Prime Financial Bank.";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Twilio
    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_phone_number: Option<String>,
    pub twilio_api_base_url: String,
    pub outbound_country_code: CountryCode,
    // Translation
    pub openai_api_key: Option<String>,
    pub translation_model: String,
    // Synthesis
    pub synthesis_provider: SynthesisBackend,
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_model_id: String,
    pub elevenlabs_api_base_url: String,
    pub aws_region: String,
    // Audio hosting
    pub public_base_url: Option<String>,
    pub audio_ttl_secs: u64,
    pub default_message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();
        Self::from_process_env()
    }

    /// Read configuration from the current process environment only
    pub fn from_process_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            twilio_account_sid: optional("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: optional("TWILIO_AUTH_TOKEN"),
            twilio_phone_number: optional("TWILIO_PHONE_NUMBER"),
            twilio_api_base_url: env::var("TWILIO_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.twilio.com".to_string()),
            outbound_country_code: env::var("OUTBOUND_COUNTRY_CODE")
                .unwrap_or_else(|_| "+91".to_string())
                .parse::<CountryCode>()?,
            openai_api_key: optional("OPENAI_API_KEY"),
            translation_model: env::var("TRANSLATION_MODEL")
                .unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            synthesis_provider: match env::var("SYNTHESIS_PROVIDER")
                .unwrap_or_else(|_| "elevenlabs".to_string())
                .to_lowercase()
                .as_str()
            {
                "elevenlabs" => SynthesisBackend::ElevenLabs,
                "polly" => SynthesisBackend::Polly,
                other => return Err(format!("Unknown SYNTHESIS_PROVIDER: {}", other).into()),
            },
            elevenlabs_api_key: optional("ELEVENLABS_API_KEY"),
            elevenlabs_model_id: env::var("ELEVENLABS_MODEL_ID")
                .unwrap_or_else(|_| "eleven_multilingual_v2".to_string()),
            elevenlabs_api_base_url: env::var("ELEVENLABS_API_BASE_URL")
                .unwrap_or_else(|_| "https://api.elevenlabs.io".to_string()),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "ap-south-1".to_string()),
            public_base_url: optional("PUBLIC_BASE_URL"),
            audio_ttl_secs: env::var("AUDIO_TTL_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()?,
            default_message: optional("DEFAULT_MESSAGE")
                .unwrap_or_else(|| DEFAULT_MESSAGE.to_string()),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Present only when all three Twilio values are set
    pub fn twilio_credentials(&self) -> Option<TwilioCredentials> {
        Some(TwilioCredentials {
            account_sid: self.twilio_account_sid.clone()?,
            auth_token: self.twilio_auth_token.clone()?,
            from_number: self.twilio_phone_number.clone()?,
        })
    }

    pub fn audio_ttl(&self) -> Duration {
        Duration::from_secs(self.audio_ttl_secs)
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
