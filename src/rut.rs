//! Chilean national ID (RUT) helpers
//!
//! A RUT is written `BODY-CHECKDIGIT`, e.g. `12.345.678-5`. The check digit
//! is a modulo-11 weighted checksum of the body where 10 is written `K`.

/// Normalize a RUT to `BODY-CHECKDIGIT`, uppercased.
///
/// Periods, hyphens and whitespace are removed and a hyphen is placed before
/// the last character. Already-normalized input comes back unchanged.
pub fn normalize_national_id(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '.' && *c != '-' && !c.is_whitespace())
        .collect();

    let mut chars = cleaned.chars();
    let formatted = match chars.next_back() {
        Some(check) if !chars.as_str().is_empty() => format!("{}-{}", chars.as_str(), check),
        _ => cleaned,
    };

    formatted.to_uppercase()
}

/// Compute the check character for a RUT body of ASCII digits.
///
/// Returns `None` if the body is empty or contains anything but digits.
pub fn compute_check_digit(body: &str) -> Option<char> {
    if body.is_empty() || !body.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let mut sum = 0u64;
    let mut weight = 2u64;
    for digit in body.bytes().rev() {
        sum += u64::from(digit - b'0') * weight;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }

    match 11 - (sum % 11) {
        11 => Some('0'),
        10 => Some('K'),
        n => char::from_digit(n as u32, 10),
    }
}

/// Check a RUT against its modulo-11 check digit.
///
/// Periods and hyphens are ignored; the check digit is compared
/// case-insensitively so `k` and `K` are equivalent.
pub fn validate_national_id(id: &str) -> bool {
    let cleaned: String = id.chars().filter(|c| *c != '.' && *c != '-').collect();

    let mut chars = cleaned.chars();
    let Some(check) = chars.next_back() else {
        return false;
    };

    match compute_check_digit(chars.as_str()) {
        Some(expected) => check.to_ascii_uppercase() == expected,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_separators() {
        assert_eq!(normalize_national_id("12.345.678-5"), "12345678-5");
        assert_eq!(normalize_national_id(" 12 345 678 5 "), "12345678-5");
        assert_eq!(normalize_national_id("123456785"), "12345678-5");
    }

    #[test]
    fn test_normalize_uppercases_check_digit() {
        assert_eq!(normalize_national_id("10.000.013-k"), "10000013-K");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_national_id("12.345.678-9");
        assert_eq!(once, "12345678-9");
        assert_eq!(normalize_national_id(&once), once);
    }

    #[test]
    fn test_normalize_short_values() {
        assert_eq!(normalize_national_id(""), "");
        assert_eq!(normalize_national_id("-"), "");
        assert_eq!(normalize_national_id("k"), "K");
    }

    #[test]
    fn test_compute_check_digit() {
        assert_eq!(compute_check_digit("12345678"), Some('5'));
        assert_eq!(compute_check_digit("10000013"), Some('K'));
        assert_eq!(compute_check_digit(""), None);
        assert_eq!(compute_check_digit("12a45"), None);
    }

    #[test]
    fn test_check_digit_zero() {
        // 11 - (sum % 11) == 11 maps to '0'
        let body = (1..100_000u32)
            .map(|n| n.to_string())
            .find(|b| compute_check_digit(b) == Some('0'))
            .unwrap();
        assert!(validate_national_id(&format!("{}-0", body)));
    }

    #[test]
    fn test_validate() {
        assert!(validate_national_id("12345678-5"));
        assert!(validate_national_id("12.345.678-5"));
        assert!(!validate_national_id("12345678-9"));
        assert!(validate_national_id("10000013-k"));
        assert!(validate_national_id("10000013-K"));
    }

    #[test]
    fn test_validate_rejects_malformed() {
        assert!(!validate_national_id(""));
        assert!(!validate_national_id("5"));
        assert!(!validate_national_id("12A45678-5"));
        assert!(!validate_national_id("12345678 -5"));
    }
}
