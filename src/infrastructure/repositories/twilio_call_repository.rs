use super::telephony_repository::{PlacedCall, PlacementError, TelephonyRepository};
use crate::domain::dispatch::RenderMode;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Account credentials and sender number for the Twilio REST API
#[derive(Debug, Clone)]
pub struct TwilioCredentials {
    pub account_sid: String,
    pub auth_token: String,
    pub from_number: String,
}

#[derive(Debug, Deserialize)]
struct TwilioCallResponse {
    sid: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct TwilioErrorResponse {
    message: String,
}

/// Twilio implementation of the telephony repository
pub struct TwilioCallRepository {
    credentials: Option<TwilioCredentials>,
    api_base_url: String,
    http_client: reqwest::Client,
}

impl TwilioCallRepository {
    pub fn new(credentials: Option<TwilioCredentials>, api_base_url: String) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            credentials,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            http_client,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn calls_url(&self, account_sid: &str) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Calls.json",
            self.api_base_url,
            urlencoding::encode(account_sid)
        )
    }
}

#[async_trait]
impl TelephonyRepository for TwilioCallRepository {
    async fn place_call(&self, to: &str, render: &RenderMode) -> Result<PlacedCall, PlacementError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(PlacementError::NotConfigured)?;

        let twiml = build_twiml(render);
        let params = [
            ("To", to),
            ("From", credentials.from_number.as_str()),
            ("Twiml", twiml.as_str()),
        ];

        let start_time = std::time::Instant::now();
        let response = self
            .http_client
            .post(self.calls_url(&credentials.account_sid))
            .basic_auth(&credentials.account_sid, Some(&credentials.auth_token))
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, to = to, "Twilio call request failed");
                PlacementError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<TwilioErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            tracing::warn!(
                status = status.as_u16(),
                error_message = %message,
                to = to,
                "Twilio rejected call"
            );
            return Err(PlacementError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let call: TwilioCallResponse = response
            .json()
            .await
            .map_err(|e| PlacementError::Transport(format!("Failed to parse Twilio response: {}", e)))?;

        tracing::info!(
            provider = "twilio",
            to = to,
            call_sid = %call.sid,
            call_status = %call.status,
            latency_ms = start_time.elapsed().as_millis(),
            "Call placed"
        );

        Ok(PlacedCall {
            provider_call_id: call.sid,
            provider_status: call.status,
        })
    }
}

/// Voice markup for one call
pub fn build_twiml(render: &RenderMode) -> String {
    match render {
        RenderMode::SpokenText {
            text,
            voice,
            language_code,
        } => format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Say voice="{}" language="{}">{}</Say></Response>"#,
            escape_xml(voice),
            escape_xml(language_code),
            escape_xml(text)
        ),
        RenderMode::PlayAudio { url } => format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><Response><Play>{}</Play></Response>"#,
            escape_xml(url)
        ),
    }
}

fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
