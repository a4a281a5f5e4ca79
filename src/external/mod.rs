pub mod console;
pub mod twilio;

pub use console::*;
pub use twilio::*;

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{SmsConfig, SmsProvider, TwilioConfig};
use crate::error::AppResult;

/// Out-of-band delivery channel for passcodes.
#[async_trait]
pub trait SmsSender: Send + Sync {
    async fn send_otp(&self, mobile: &str, code: &str, expires_in_secs: i64) -> AppResult<()>;
}

pub fn build_sms_sender(sms: &SmsConfig, twilio: &TwilioConfig) -> Arc<dyn SmsSender> {
    match sms.provider {
        SmsProvider::Console => Arc::new(ConsoleSmsSender::new(std::time::Duration::from_millis(
            sms.delivery_delay_ms,
        ))),
        SmsProvider::Twilio => Arc::new(TwilioService::new(twilio.clone())),
    }
}
