//! Background tasks.
//!
//! Call `spawn_all` once during startup.

use std::time::Duration;

use crate::services::OtpService;

/// Spawn all background tasks. Detaches them via `tokio::spawn`; does not block.
pub fn spawn_all(otp_service: OtpService, sweep_interval: Duration) {
    spawn_otp_sweeper(otp_service, sweep_interval);
}

/// Periodically purge passcode records that are expired and past their issuance window.
pub fn spawn_otp_sweeper(otp_service: OtpService, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // 首个 tick 立即返回，跳过
        ticker.tick().await;
        loop {
            ticker.tick().await;
            match otp_service.sweep_stale().await {
                Ok(n) if n > 0 => log::info!("Stale OTP records purged: {n}"),
                Ok(_) => {}
                Err(e) => log::error!("Failed to purge stale OTP records: {e:?}"),
            }
        }
    })
}
