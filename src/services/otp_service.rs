use chrono::Duration;
use std::sync::Arc;

use crate::config::OtpConfig;
use crate::error::{AppError, AppResult};
use crate::external::SmsSender;
use crate::models::*;
use crate::store::PasscodeStore;
use crate::utils::*;

/// Ceilings and time windows applied to every phone number.
#[derive(Debug, Clone, Copy)]
pub struct OtpPolicy {
    pub code_ttl: Duration,
    pub max_issuance_attempts: u32,
    pub max_verification_attempts: u32,
    pub issuance_window: Duration,
}

impl Default for OtpPolicy {
    fn default() -> Self {
        Self::from(&OtpConfig::default())
    }
}

impl From<&OtpConfig> for OtpPolicy {
    fn from(config: &OtpConfig) -> Self {
        Self {
            code_ttl: Duration::seconds(config.code_ttl_secs),
            max_issuance_attempts: config.max_issuance_attempts,
            max_verification_attempts: config.max_verification_attempts,
            issuance_window: Duration::seconds(config.issuance_window_secs),
        }
    }
}

/// Issues and verifies one-time passcodes.
///
/// Every read-modify-write on a phone number's record runs under that number's
/// lock. SMS delivery happens after the lock is released.
#[derive(Clone)]
pub struct OtpService {
    store: Arc<dyn PasscodeStore>,
    sms_sender: Arc<dyn SmsSender>,
    clock: Arc<dyn Clock>,
    locks: KeyedLock,
    policy: OtpPolicy,
}

impl OtpService {
    pub fn new(
        store: Arc<dyn PasscodeStore>,
        sms_sender: Arc<dyn SmsSender>,
        clock: Arc<dyn Clock>,
        policy: OtpPolicy,
    ) -> Self {
        Self {
            store,
            sms_sender,
            clock,
            locks: KeyedLock::new(),
            policy,
        }
    }

    pub async fn send_otp(&self, mobile: &str) -> AppResult<SendOtpResponse> {
        validate_indian_mobile(mobile)?;

        let expires_in_seconds = self.policy.code_ttl.num_seconds();

        let (code, attempts) = {
            let _guard = self.locks.lock(mobile).await;
            let now = self.clock.now();

            // 发送窗口结束后计数重新开始
            let existing = self
                .store
                .get(mobile)
                .await?
                .filter(|r| !r.issuance_window_elapsed(now, self.policy.issuance_window));

            if let Some(record) = &existing
                && record.issuance_attempts >= self.policy.max_issuance_attempts
            {
                log::warn!(
                    "OTP issuance ceiling reached for {} ({} attempts)",
                    mask_mobile(mobile),
                    record.issuance_attempts
                );
                return Err(AppError::RateLimited(
                    "Too many OTP requests. Please try later.".to_string(),
                ));
            }

            let code = generate_six_digit_code();
            let record = PasscodeRecord {
                code: code.clone(),
                expires_at: now + self.policy.code_ttl,
                issuance_attempts: existing.as_ref().map_or(0, |r| r.issuance_attempts) + 1,
                verification_attempts: 0,
                window_started_at: existing.as_ref().map_or(now, |r| r.window_started_at),
            };
            let attempts = record.issuance_attempts;
            self.store.set(mobile, record).await?;

            (code, attempts)
        };

        self.sms_sender
            .send_otp(mobile, &code, expires_in_seconds)
            .await?;

        log::info!(
            "OTP issued for {} (issuance {}/{})",
            mask_mobile(mobile),
            attempts,
            self.policy.max_issuance_attempts
        );

        Ok(SendOtpResponse {
            mobile: mobile.to_string(),
            expires_in_seconds,
        })
    }

    pub async fn verify_otp(&self, mobile: &str, otp: &str) -> AppResult<VerifyOtpResponse> {
        if mobile.is_empty() || otp.is_empty() {
            return Err(AppError::ValidationError(
                "Mobile number and OTP are required".to_string(),
            ));
        }
        validate_indian_mobile(mobile)?;
        if !is_well_formed_code(otp) {
            return Err(AppError::ValidationError(
                "OTP must be a 6-digit number".to_string(),
            ));
        }

        let _guard = self.locks.lock(mobile).await;
        let now = self.clock.now();

        let Some(mut record) = self.store.get(mobile).await? else {
            return Err(AppError::OtpNotFound);
        };

        if record.is_expired(now) {
            self.store.delete(mobile).await?;
            log::info!("Expired OTP removed for {}", mask_mobile(mobile));
            return Err(AppError::OtpExpired);
        }

        let max_attempts = self.policy.max_verification_attempts;

        if record.verification_attempts >= max_attempts {
            self.store.delete(mobile).await?;
            return Err(Self::too_many_attempts());
        }

        if record.code != otp {
            record.verification_attempts += 1;

            if record.verification_attempts >= max_attempts {
                self.store.delete(mobile).await?;
                log::warn!(
                    "OTP invalidated for {} after {} wrong attempts",
                    mask_mobile(mobile),
                    record.verification_attempts
                );
                return Err(Self::too_many_attempts());
            }

            let attempts_left = max_attempts - record.verification_attempts;
            self.store.set(mobile, record).await?;
            return Err(AppError::InvalidOtp { attempts_left });
        }

        self.store.delete(mobile).await?;
        log::info!("OTP verified for {}", mask_mobile(mobile));

        Ok(VerifyOtpResponse {
            mobile: mobile.to_string(),
            verified: true,
        })
    }

    /// Purge records that are expired and outside their issuance window.
    pub async fn sweep_stale(&self) -> AppResult<usize> {
        self.store
            .delete_stale(self.clock.now(), self.policy.issuance_window)
            .await
    }

    pub async fn outstanding(&self) -> AppResult<usize> {
        self.store.count().await
    }

    fn too_many_attempts() -> AppError {
        AppError::RateLimited("Too many attempts. Please request a new OTP".to_string())
    }
}
