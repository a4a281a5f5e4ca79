use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::SmsSender;
use crate::config::TwilioConfig;
use crate::error::{AppError, AppResult};
use crate::utils::{mask_mobile, to_e164};

#[derive(Debug, Deserialize)]
pub struct SendSmsResponse {
    pub sid: String,
    pub status: String,
    pub error_code: Option<i64>,
    pub error_message: Option<String>,
}

#[derive(Clone)]
pub struct TwilioService {
    client: Client,
    config: TwilioConfig,
}

impl TwilioService {
    pub fn new(config: TwilioConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "https://api.twilio.com/2010-04-01/Accounts/{}/Messages.json",
            self.config.account_sid
        )
    }
}

pub fn otp_message_body(code: &str, expires_in_secs: i64) -> String {
    format!(
        "Your WikiKisan verification code is {code}. It is valid for {} minutes. Do not share it with anyone.",
        (expires_in_secs / 60).max(1)
    )
}

#[async_trait]
impl SmsSender for TwilioService {
    async fn send_otp(&self, mobile: &str, code: &str, expires_in_secs: i64) -> AppResult<()> {
        let to = to_e164(mobile, &self.config.country_code);
        let body = otp_message_body(code, expires_in_secs);

        let params = [
            ("To", to.as_str()),
            ("From", self.config.from_phone.as_str()),
            ("Body", body.as_str()),
        ];

        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&params)
            .send()
            .await?;

        if response.status().is_success() {
            let sms: SendSmsResponse = response.json().await?;
            log::info!(
                "OTP SMS queued: {}, sid={}, status={}",
                mask_mobile(mobile),
                sms.sid,
                sms.status
            );
            if let Some(err) = sms.error_message {
                log::warn!("Twilio reported error {:?}: {err}", sms.error_code);
            }
            Ok(())
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log::error!(
                "OTP SMS failed to send: {}, Error: {}",
                mask_mobile(mobile),
                error_text
            );
            Err(AppError::ExternalApiError(format!(
                "SMS sending failed: {error_text}"
            )))
        }
    }
}
