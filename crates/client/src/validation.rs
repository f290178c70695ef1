//! Input rules applied before any value reaches the backend.
//!
//! Every rule runs; errors are collected in rule order rather than stopping
//! at the first failure.

/// Upper bound above which an amount is rejected as implausible.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

impl ValidationResult {
    fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

pub fn validate_calculation(income: f64, cost: f64) -> ValidationResult {
    let mut errors = Vec::new();

    if income < 0.0 {
        errors.push("Income cannot be negative".to_string());
    }
    if cost < 0.0 {
        errors.push("Cost cannot be negative".to_string());
    }

    if !income.is_finite() {
        errors.push("Income must be a valid number".to_string());
    }
    if !cost.is_finite() {
        errors.push("Cost must be a valid number".to_string());
    }

    if income > MAX_AMOUNT {
        errors.push("Income amount seems too high. Please verify.".to_string());
    }
    if cost > MAX_AMOUNT {
        errors.push("Cost amount seems too high. Please verify.".to_string());
    }

    ValidationResult::from_errors(errors)
}

pub fn validate_shipment_id(id: f64) -> ValidationResult {
    validate_id("Shipment ID", id)
}

pub fn validate_calculation_id(id: f64) -> ValidationResult {
    validate_id("Calculation ID", id)
}

// NaN fails both checks: it is neither positive nor a valid number.
fn validate_id(label: &str, id: f64) -> ValidationResult {
    let mut errors = Vec::new();

    if id.is_nan() || id <= 0.0 {
        errors.push(format!("{label} must be a positive number"));
    }
    if !id.is_finite() {
        errors.push(format!("{label} must be a valid number"));
    }

    ValidationResult::from_errors(errors)
}

/// Converts form text into the number the rules check.
///
/// Blank input counts as `0`; anything that is not a decimal number becomes
/// NaN so the "valid number" rules reject it.
pub fn parse_number(input: &str) -> f64 {
    let input = input.trim();
    if input.is_empty() {
        return 0.0;
    }
    input.parse::<f64>().unwrap_or(f64::NAN)
}
