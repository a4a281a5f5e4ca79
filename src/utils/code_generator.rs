use rand::Rng;

pub const OTP_LENGTH: usize = 6;

/// 生成6位数字验证码
pub fn generate_six_digit_code() -> String {
    let mut rng = rand::thread_rng();
    format!("{:06}", rng.gen_range(100000..=999999))
}

/// 检查提交的验证码格式（6位数字）
pub fn is_well_formed_code(code: &str) -> bool {
    code.len() == OTP_LENGTH && code.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_six_digit_code() {
        let code = generate_six_digit_code();
        assert_eq!(code.len(), OTP_LENGTH);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let code_num: u32 = code.parse().unwrap();
        assert!((100000..=999999).contains(&code_num));
    }

    #[test]
    fn test_generated_codes_are_well_formed() {
        for _ in 0..100 {
            assert!(is_well_formed_code(&generate_six_digit_code()));
        }
    }

    #[test]
    fn test_is_well_formed_code() {
        assert!(is_well_formed_code("012345"));
        assert!(!is_well_formed_code("12345"));
        assert!(!is_well_formed_code("12345a"));
        assert!(!is_well_formed_code("1234567"));
    }
}
