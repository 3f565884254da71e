//! Phone number validation and masking utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Regular expression for Chinese mobile numbers (local format)
///
/// Chinese mobile numbers start with 13-19, followed by 9 digits.
static CHINA_MOBILE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^1[3-9]\d{9}$").unwrap());

/// Validates a phone number against the supported mobile format
///
/// # Arguments
///
/// * `phone` - Phone number to validate (local format, e.g. "13800138000")
///
/// # Returns
///
/// * `bool` - True if the number is a valid mobile number
pub fn is_valid_phone_number(phone: &str) -> bool {
    CHINA_MOBILE_REGEX.is_match(phone)
}

/// Masks a phone number for safe logging
///
/// Keeps the first three and last two digits visible, replacing the rest
/// with asterisks. Short inputs are fully masked.
///
/// # Arguments
///
/// * `phone` - Phone number to mask
///
/// # Returns
///
/// * `String` - Masked representation, e.g. "138******00"
pub fn mask_phone(phone: &str) -> String {
    if phone.len() <= 5 {
        return "*".repeat(phone.len());
    }

    let start = &phone[..3];
    let end = &phone[phone.len() - 2..];
    let hidden = "*".repeat(phone.len() - 5);
    format!("{}{}{}", start, hidden, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_mobile_numbers() {
        assert!(is_valid_phone_number("13800138000"));
        assert!(is_valid_phone_number("15912345678"));
        assert!(is_valid_phone_number("19987654321"));
    }

    #[test]
    fn test_invalid_mobile_numbers() {
        assert!(!is_valid_phone_number(""));
        assert!(!is_valid_phone_number("12345678901")); // second digit out of range
        assert!(!is_valid_phone_number("1380013800")); // too short
        assert!(!is_valid_phone_number("138001380000")); // too long
        assert!(!is_valid_phone_number("abc00138000"));
        assert!(!is_valid_phone_number("+8613800138000")); // E.164 prefix not accepted
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone("13800138000"), "138******00");
        assert_eq!(mask_phone("123"), "***");
        assert_eq!(mask_phone(""), "");
    }
}
