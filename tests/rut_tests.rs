//! RUT normalization and check-digit tests

use royalbit_nomina::rut::{compute_check_digit, normalize_national_id, validate_national_id};

#[test]
fn test_reference_vectors() {
    assert!(validate_national_id("12345678-5"));
    assert!(!validate_national_id("12345678-9"));
}

#[test]
fn test_formatted_and_lowercase_inputs() {
    assert!(validate_national_id("12.345.678-5"));
    assert!(validate_national_id("123456785"));
    assert!(validate_national_id("10.000.013-k"));
}

#[test]
fn test_normalization_is_idempotent() {
    for raw in ["12.345.678-5", "12345678-9", "10000013-k", " 9.876.543 - 3", "1-9"] {
        let once = normalize_national_id(raw);
        assert_eq!(normalize_national_id(&once), once, "{}", raw);
    }
}

#[test]
fn test_normalized_ids_validate_like_raw_ids() {
    for raw in ["12.345.678-5", "12345678-9", "10.000.013-k", "11.111.111-1"] {
        assert_eq!(
            validate_national_id(raw),
            validate_national_id(&normalize_national_id(raw)),
            "{}",
            raw
        );
    }
}

#[test]
fn test_every_computed_digit_validates() {
    for body in ["1", "11111111", "22222222", "5126663", "76086428", "99999999"] {
        let check = compute_check_digit(body).unwrap();
        assert!(validate_national_id(&format!("{}-{}", body, check)), "{}", body);
    }
}

#[test]
fn test_non_numeric_body_fails() {
    assert!(!validate_national_id("ABC-1"));
    assert!(!validate_national_id("-5"));
    assert!(!validate_national_id(""));
}
