use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One outstanding passcode issuance for a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasscodeRecord {
    pub code: String,
    pub expires_at: DateTime<Utc>,
    /// 当前发送窗口内的发送次数
    pub issuance_attempts: u32,
    /// 针对当前验证码的错误提交次数，重新发送时清零
    pub verification_attempts: u32,
    pub window_started_at: DateTime<Utc>,
}

impl PasscodeRecord {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn issuance_window_elapsed(&self, now: DateTime<Utc>, window: Duration) -> bool {
        now >= self.window_started_at + window
    }

    /// A stale record can no longer be verified nor hold back a new issuance.
    pub fn is_stale(&self, now: DateTime<Utc>, window: Duration) -> bool {
        self.is_expired(now) && self.issuance_window_elapsed(now, window)
    }
}

// 字段为 Option：缺失字段应返回业务校验错误而不是反序列化错误
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    #[schema(example = "9876543210")]
    pub mobile: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    #[schema(example = "9876543210")]
    pub mobile: Option<String>,
    #[schema(example = "123456")]
    pub otp: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendOtpResponse {
    pub mobile: String,
    pub expires_in_seconds: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpResponse {
    pub mobile: String,
    pub verified: bool,
}
