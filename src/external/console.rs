use async_trait::async_trait;
use std::time::Duration;

use super::SmsSender;
use crate::error::AppResult;

/// Development sender: waits like a real gateway would, then writes the code to the log.
#[derive(Clone, Debug)]
pub struct ConsoleSmsSender {
    delay: Duration,
}

impl ConsoleSmsSender {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl SmsSender for ConsoleSmsSender {
    async fn send_otp(&self, mobile: &str, code: &str, expires_in_secs: i64) -> AppResult<()> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        log::info!("WikiKisan OTP for {mobile}: {code} (valid for {expires_in_secs}s)");
        Ok(())
    }
}
