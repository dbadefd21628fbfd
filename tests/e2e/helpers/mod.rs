use reminder_caller::controllers::{
    campaign::CampaignController, health::ProviderReadiness, media::MediaController,
};
use reminder_caller::domain::audio::AudioArtifactCache;
use reminder_caller::domain::campaign::{Campaign, CampaignService};
use reminder_caller::domain::dispatch::{CallDispatcher, VoiceProviderRouter};
use reminder_caller::domain::recipients::CountryCode;
use reminder_caller::infrastructure::http::build_router;
use reminder_caller::infrastructure::repositories::{
    HostedAudioPublisher, TwilioCallRepository, TwilioCredentials,
};
use std::sync::Arc;
use std::time::Duration;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;

use api_client::TestClient;
use fake_twilio::FakeTwilio;
use providers::{CountingSpeech, TaggingTranslator};

pub const TEST_ACCOUNT_SID: &str = "ACtest00000000000000000000000000";
pub const TEST_FROM_NUMBER: &str = "+15005550006";
pub const TEST_MESSAGE: &str = "Your EMI of Rupees 25,000 is due on 15th November.";

/// A running app wired to a fake Twilio, a counting synthesizer and a
/// tagging translator. Audio is published under the app's own base URL.
pub struct TestContext {
    pub client: TestClient,
    pub base_url: String,
    pub twilio: FakeTwilio,
    pub speech: Arc<CountingSpeech>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let twilio = FakeTwilio::start().await;

            // Bind first so published audio URLs can point back at this server
            let listener = TcpListener::bind("127.0.0.1:0")
                .await
                .expect("Failed to bind listener");
            let addr = listener.local_addr().expect("Failed to get local addr");
            let base_url = format!("http://{}", addr);

            let speech = Arc::new(CountingSpeech::default());
            let telephony_repo = Arc::new(TwilioCallRepository::new(
                Some(TwilioCredentials {
                    account_sid: TEST_ACCOUNT_SID.to_string(),
                    auth_token: "test-auth-token".to_string(),
                    from_number: TEST_FROM_NUMBER.to_string(),
                }),
                twilio.base_url.clone(),
            ));
            let publisher = Arc::new(HostedAudioPublisher::new(
                Some(base_url.clone()),
                Duration::from_secs(600),
            ));

            let campaign = Campaign::new(
                TEST_MESSAGE.to_string(),
                AudioArtifactCache::new(Duration::from_secs(600)),
            );
            let dispatcher = CallDispatcher::new(
                VoiceProviderRouter::new(speech.clone(), publisher.clone()),
                telephony_repo,
                CountryCode::India,
            );
            let campaign_service = Arc::new(CampaignService::new(
                campaign,
                dispatcher,
                Arc::new(TaggingTranslator),
            ));

            let app = build_router(
                Arc::new(CampaignController::new(campaign_service)),
                Arc::new(MediaController::new(publisher)),
                Arc::new(ProviderReadiness {
                    telephony: true,
                    translation: true,
                    synthesis: Some("elevenlabs".to_string()),
                    publishing: true,
                }),
            );

            tokio::spawn(async move {
                axum::serve(listener, app).await.unwrap();
            });

            Self {
                client: TestClient::new(&base_url),
                base_url,
                twilio,
                speech,
            }
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {}
    }
}

impl TestContext {
    /// Add a recipient and assert it was accepted
    pub async fn add_recipient(&self, country_code: &str, number: &str) {
        let response = self
            .client
            .post(
                "/api/campaign/recipients",
                &serde_json::json!({ "country_code": country_code, "number": number }),
            )
            .await
            .unwrap();
        response.assert_status(hyper::StatusCode::CREATED);
    }

    pub async fn select_language(&self, code: &str) {
        let response = self
            .client
            .put("/api/campaign/language", &serde_json::json!({ "code": code }))
            .await
            .unwrap();
        response.assert_status(hyper::StatusCode::OK);
    }
}
