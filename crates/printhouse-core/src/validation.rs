//! # Validation Module
//!
//! Input validation utilities for PrintHouse.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console (clap)                                               │
//! │  ├── Argument types, enum names, decimal strings                       │
//! │  └── Immediate operator feedback                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Domain constructors (Rust)                                   │
//! │  └── THIS MODULE: title, page count, EGN                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Payload decoding (serde try_from)                            │
//! │  └── Stored records re-run the same checks                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use printhouse_core::validation::{validate_egn, validate_title};
//!
//! validate_title("Rust Weekly").unwrap();
//! validate_egn("7501020018").unwrap();
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_PAGE_COUNT, MAX_TITLE_LENGTH, MIN_PAGE_COUNT, MIN_TITLE_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Edition Validators
// =============================================================================

/// Validates an edition title.
///
/// ## Rules
/// - Must not be blank
/// - Must be between 2 and 150 characters (counted as chars, not bytes)
///
/// ## Example
/// ```rust
/// use printhouse_core::validation::validate_title;
///
/// assert!(validate_title("Rust Weekly").is_ok());
/// assert!(validate_title("   ").is_err());
/// assert!(validate_title("X").is_err());
/// ```
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    let len = title.chars().count();

    if len < MIN_TITLE_LENGTH {
        return Err(ValidationError::TooShort {
            field: "title".to_string(),
            min: MIN_TITLE_LENGTH,
        });
    }

    if len > MAX_TITLE_LENGTH {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: MAX_TITLE_LENGTH,
        });
    }

    Ok(())
}

/// Validates an edition page count (3 to 1000 inclusive).
pub fn validate_page_count(page_count: u32) -> ValidationResult<()> {
    if !(MIN_PAGE_COUNT..=MAX_PAGE_COUNT).contains(&page_count) {
        return Err(ValidationError::OutOfRange {
            field: "page count".to_string(),
            min: i64::from(MIN_PAGE_COUNT),
            max: i64::from(MAX_PAGE_COUNT),
        });
    }

    Ok(())
}

// =============================================================================
// Identity Validators
// =============================================================================

const EGN_WEIGHTS: [u32; 9] = [2, 4, 8, 5, 10, 9, 7, 3, 6];

/// Validates a Bulgarian personal identification number (EGN).
///
/// ## Layout
/// ```text
///   Y Y M M D D S S S C
///   │   │   │   │     └── checksum digit
///   │   │   │   └──────── sequence (region, sex)
///   │   │   └──────────── day of birth
///   │   └──────────────── month: 1-12 → 19xx, +20 → 18xx, +40 → 20xx
///   └──────────────────── two-digit year
/// ```
///
/// The checksum is `Σ digit[i] × weight[i] mod 11` over the first nine
/// digits, where a remainder of 10 becomes 0.
///
/// ## Example
/// ```rust
/// use printhouse_core::validation::validate_egn;
///
/// assert!(validate_egn("7501020018").is_ok());
/// assert!(validate_egn("7501020019").is_err()); // bad checksum
/// assert!(validate_egn("7502301239").is_err()); // 30 February
/// ```
pub fn validate_egn(egn: &str) -> ValidationResult<()> {
    if egn.is_empty() {
        return Err(ValidationError::Required {
            field: "EGN".to_string(),
        });
    }

    let digits: Vec<u32> = egn.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != 10 || egn.len() != 10 {
        return Err(egn_format("must be exactly 10 digits"));
    }

    let year = digits[0] * 10 + digits[1];
    let month = digits[2] * 10 + digits[3];
    let day = digits[4] * 10 + digits[5];

    let (year, month) = match month {
        1..=12 => (1900 + year, month),
        21..=32 => (1800 + year, month - 20),
        41..=52 => (2000 + year, month - 40),
        _ => return Err(egn_format("month is out of range")),
    };

    // Both values are small; the i32 conversion cannot truncate.
    if NaiveDate::from_ymd_opt(year as i32, month, day).is_none() {
        return Err(egn_format("birth date is not a calendar date"));
    }

    let sum: u32 = digits
        .iter()
        .zip(EGN_WEIGHTS.iter())
        .map(|(digit, weight)| digit * weight)
        .sum();
    let checksum = match sum % 11 {
        10 => 0,
        rem => rem,
    };

    if checksum != digits[9] {
        return Err(egn_format("checksum does not match"));
    }

    Ok(())
}

fn egn_format(reason: &str) -> ValidationError {
    ValidationError::InvalidFormat {
        field: "EGN".to_string(),
        reason: reason.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Ok").is_ok());
        assert!(validate_title("Rust Weekly").is_ok());
        assert!(validate_title(&"T".repeat(150)).is_ok());

        assert!(matches!(
            validate_title(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_title("  \t "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_title("X"),
            Err(ValidationError::TooShort { min: 2, .. })
        ));
        assert!(matches!(
            validate_title(&"T".repeat(151)),
            Err(ValidationError::TooLong { max: 150, .. })
        ));
    }

    #[test]
    fn test_title_length_counts_characters() {
        // 150 two-byte characters is still 150 characters
        assert!(validate_title(&"Ж".repeat(150)).is_ok());
    }

    #[test]
    fn test_validate_page_count() {
        assert!(validate_page_count(3).is_ok());
        assert!(validate_page_count(1000).is_ok());

        assert!(validate_page_count(0).is_err());
        assert!(validate_page_count(2).is_err());
        assert!(validate_page_count(1001).is_err());
    }

    #[test]
    fn test_valid_egns_across_centuries() {
        assert!(validate_egn("7501020018").is_ok()); // 1975-01-02
        assert!(validate_egn("8003050020").is_ok()); // 1980-03-05
        assert!(validate_egn("8521150002").is_ok()); // 1885-01-15
        assert!(validate_egn("0541150002").is_ok()); // 2005-01-15
    }

    #[test]
    fn test_egn_checksum_remainder_ten_maps_to_zero() {
        // weighted sum is 87, 87 mod 11 = 10
        assert!(validate_egn("7501020050").is_ok());
    }

    #[test]
    fn test_invalid_egns() {
        assert!(matches!(
            validate_egn(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_egn("750102001").is_err());
        assert!(validate_egn("75010200189").is_err());
        assert!(validate_egn("75010200a8").is_err());
        assert!(validate_egn("7533021234").is_err()); // month 33
        assert!(validate_egn("7502301239").is_err()); // 30 February
        assert!(validate_egn("7501020019").is_err()); // checksum is 8
    }
}
