use regex::Regex;
use std::sync::LazyLock;

use crate::error::{AppError, AppResult};

static INDIAN_MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("valid mobile regex"));

/// 验证印度手机号格式（10位，以6-9开头）
pub fn validate_indian_mobile(mobile: &str) -> AppResult<()> {
    if !INDIAN_MOBILE.is_match(mobile) {
        return Err(AppError::ValidationError("Invalid mobile number".to_string()));
    }

    Ok(())
}

/// 转换为 E.164 格式，供短信网关使用
pub fn to_e164(mobile: &str, country_code: &str) -> String {
    format!("{country_code}{mobile}")
}

/// 日志中隐藏号码中间部分
pub fn mask_mobile(mobile: &str) -> String {
    let chars: Vec<char> = mobile.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{head}{}{tail}", "*".repeat(chars.len() - 4))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_indian_mobile() {
        assert!(validate_indian_mobile("9876543210").is_ok());
        assert!(validate_indian_mobile("6000000000").is_ok());
        assert!(validate_indian_mobile("12345").is_err());
        assert!(validate_indian_mobile("5876543210").is_err()); // 不能以5开头
        assert!(validate_indian_mobile("98765432101").is_err()); // 11位
        assert!(validate_indian_mobile("+919876543210").is_err());
        assert!(validate_indian_mobile("98765 43210").is_err());
        assert!(validate_indian_mobile("").is_err());
    }

    #[test]
    fn test_validate_indian_mobile_rejects_non_ascii_digits() {
        // 天城体数字 ९८७६५४३२१०
        assert!(validate_indian_mobile("\u{096F}\u{096E}\u{096D}\u{096C}\u{096B}\u{096A}\u{0969}\u{0968}\u{0967}\u{0966}").is_err());
        // 首位 ASCII，其余为天城体数字
        assert!(validate_indian_mobile("9\u{096E}\u{096D}\u{096C}\u{096B}\u{096A}\u{0969}\u{0968}\u{0967}\u{0966}").is_err());
        // 阿拉伯-印度数字
        assert!(validate_indian_mobile("9\u{0668}\u{0667}\u{0666}\u{0665}\u{0664}\u{0663}\u{0662}\u{0661}\u{0660}").is_err());
    }

    #[test]
    fn test_to_e164() {
        assert_eq!(to_e164("9876543210", "+91"), "+919876543210");
    }

    #[test]
    fn test_mask_mobile() {
        assert_eq!(mask_mobile("9876543210"), "98******10");
        assert_eq!(mask_mobile("123"), "***");
    }
}
