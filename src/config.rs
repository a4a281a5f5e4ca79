use serde::{Deserialize, Serialize};
use std::env;

// 上限保证 chrono::Duration 与 now + ttl 不会溢出
const MAX_CODE_TTL_SECS: i64 = 24 * 60 * 60;
const MAX_ISSUANCE_WINDOW_SECS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub sms: SmsConfig,
    #[serde(default)]
    pub twilio: TwilioConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpConfig {
    pub code_ttl_secs: i64,
    pub max_issuance_attempts: u32,
    pub max_verification_attempts: u32,
    pub issuance_window_secs: i64,
    pub sweep_interval_secs: u64,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            code_ttl_secs: 300,
            max_issuance_attempts: 3,
            max_verification_attempts: 3,
            issuance_window_secs: 3600,
            sweep_interval_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    #[default]
    Console,
    Twilio,
}

impl std::str::FromStr for SmsProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "console" => Ok(SmsProvider::Console),
            "twilio" => Ok(SmsProvider::Twilio),
            other => Err(format!("unknown SMS provider: {other}")),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmsConfig {
    pub provider: SmsProvider,
    pub delivery_delay_ms: u64,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::Console,
            delivery_delay_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,
    pub from_phone: String,
    /// 本地10位号码发送前加上的国家码
    pub country_code: String,
}

impl Default for TwilioConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            from_phone: String::new(),
            country_code: "+91".to_string(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 配置文件不存在时完全依赖环境变量与默认值
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => Config {
                server: ServerConfig::default(),
                otp: OtpConfig::default(),
                sms: SmsConfig::default(),
                twilio: TwilioConfig::default(),
            },
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // 环境变量覆盖（即便文件存在时也覆盖）
        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("Failed to parse config file: {e}").into())
    }

    fn apply_env_overrides(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
            env::var(name).ok().and_then(|v| v.parse::<T>().ok())
        }

        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(p) = parse_env("SERVER_PORT") {
            self.server.port = p;
        }

        if let Some(n) = parse_env("OTP_CODE_TTL_SECS") {
            self.otp.code_ttl_secs = n;
        }
        if let Some(n) = parse_env("OTP_MAX_ISSUANCE_ATTEMPTS") {
            self.otp.max_issuance_attempts = n;
        }
        if let Some(n) = parse_env("OTP_MAX_VERIFICATION_ATTEMPTS") {
            self.otp.max_verification_attempts = n;
        }
        if let Some(n) = parse_env("OTP_ISSUANCE_WINDOW_SECS") {
            self.otp.issuance_window_secs = n;
        }
        if let Some(n) = parse_env("OTP_SWEEP_INTERVAL_SECS") {
            self.otp.sweep_interval_secs = n;
        }

        if let Ok(v) = env::var("SMS_PROVIDER") {
            self.sms.provider = v.parse()?;
        }
        if let Some(n) = parse_env("SMS_DELIVERY_DELAY_MS") {
            self.sms.delivery_delay_ms = n;
        }

        if let Ok(v) = env::var("TWILIO_ACCOUNT_SID") {
            self.twilio.account_sid = v;
        }
        if let Ok(v) = env::var("TWILIO_AUTH_TOKEN") {
            self.twilio.auth_token = v;
        }
        if let Ok(v) = env::var("TWILIO_FROM_PHONE") {
            self.twilio.from_phone = v;
        }
        if let Ok(v) = env::var("TWILIO_COUNTRY_CODE") {
            self.twilio.country_code = v;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.otp.code_ttl_secs <= 0 {
            return Err("otp.code_ttl_secs must be positive".into());
        }
        if self.otp.code_ttl_secs > MAX_CODE_TTL_SECS {
            return Err(format!("otp.code_ttl_secs must not exceed {MAX_CODE_TTL_SECS}").into());
        }
        if self.otp.max_issuance_attempts == 0 || self.otp.max_verification_attempts == 0 {
            return Err("otp attempt ceilings must be at least 1".into());
        }
        if self.otp.issuance_window_secs <= 0 {
            return Err("otp.issuance_window_secs must be positive".into());
        }
        if self.otp.issuance_window_secs > MAX_ISSUANCE_WINDOW_SECS {
            return Err(format!(
                "otp.issuance_window_secs must not exceed {MAX_ISSUANCE_WINDOW_SECS}"
            )
            .into());
        }
        if self.otp.sweep_interval_secs == 0 {
            return Err("otp.sweep_interval_secs must be positive".into());
        }
        if self.sms.provider == SmsProvider::Twilio
            && (self.twilio.account_sid.is_empty() || self.twilio.auth_token.is_empty())
        {
            return Err("twilio.account_sid and twilio.auth_token are required for the twilio provider".into());
        }
        Ok(())
    }
}
