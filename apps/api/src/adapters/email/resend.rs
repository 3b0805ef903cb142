use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{
    app_error::{AppError, AppResult},
    infra::http_client,
    use_cases::user::CodeSender,
};

const RESEND_URL: &str = "https://api.resend.com/emails";

/// Delivers codes by email through the Resend HTTP API.
#[derive(Clone)]
pub struct ResendCodeSender {
    client: Client,
    api_key: SecretString,
    from: String,
}

impl ResendCodeSender {
    pub fn new(api_key: SecretString, from: String) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: http_client::try_build_client()?,
            api_key,
            from,
        })
    }
}

#[derive(Serialize)]
struct ResendReq<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    html: String,
}

fn render_body(code: &str) -> String {
    format!(
        "<p>Your verification code is <strong>{code}</strong>.</p>\
         <p>It expires in a few minutes. If you did not request it, ignore this email.</p>"
    )
}

#[async_trait]
impl CodeSender for ResendCodeSender {
    async fn send(&self, destination: &str, code: &str) -> AppResult<()> {
        let body = ResendReq {
            from: &self.from,
            to: [destination],
            subject: "Your verification code",
            html: render_body(code),
        };

        self.client
            .post(RESEND_URL)
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::DependencyUnavailable(format!("Failed to send email: {e}")))?
            .error_for_status()
            .map_err(|e| AppError::DependencyUnavailable(format!("Email API error: {e}")))?;

        Ok(())
    }
}
