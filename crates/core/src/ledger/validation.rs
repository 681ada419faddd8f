//! Input validation for ledger requests.
//!
//! Every rule here runs before the ledger file is touched, so a rejected
//! request never changes state.

use serde_json::Value;

use super::error::LedgerError;

/// Trims a username and rejects it when nothing is left.
pub fn normalize_username(raw: Option<&str>) -> Result<String, LedgerError> {
    match raw.map(str::trim) {
        Some(name) if !name.is_empty() => Ok(name.to_string()),
        _ => Err(LedgerError::UsernameRequired),
    }
}

/// Reads a base-10 integer from a JSON number or a string holding one.
///
/// Fractional numbers are not integers and yield `None`.
#[must_use]
pub fn parse_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Reads a free-text field. Numbers and booleans keep their JSON spelling;
/// anything else is blank.
#[must_use]
pub fn text_field(raw: Option<&Value>) -> String {
    match raw {
        Some(Value::String(text)) => text.clone(),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => value.to_string(),
        _ => String::new(),
    }
}

/// Validates a balance: an integer no lower than zero.
pub fn validate_balance(raw: Option<&Value>) -> Result<i64, LedgerError> {
    let balance = raw
        .and_then(parse_integer)
        .ok_or_else(|| LedgerError::InvalidBalance("balance must be an integer".to_string()))?;
    ensure_balance(balance)?;
    Ok(balance)
}

/// Validates a charge or payout amount: an integer above zero.
pub fn validate_amount(raw: Option<&Value>) -> Result<i64, LedgerError> {
    let amount = raw
        .and_then(parse_integer)
        .ok_or_else(|| LedgerError::InvalidAmount("amount must be an integer".to_string()))?;
    ensure_amount(amount)?;
    Ok(amount)
}

pub(crate) fn ensure_balance(balance: i64) -> Result<(), LedgerError> {
    if balance < 0 {
        return Err(LedgerError::InvalidBalance(format!(
            "balance must not be negative, got {balance}"
        )));
    }
    Ok(())
}

pub(crate) fn ensure_amount(amount: i64) -> Result<(), LedgerError> {
    if amount <= 0 {
        return Err(LedgerError::InvalidAmount(format!(
            "amount must be positive, got {amount}"
        )));
    }
    Ok(())
}

/// Returns `value` trimmed, or `fallback` when it is blank.
pub(crate) fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    match value.trim() {
        "" => fallback,
        trimmed => trimmed,
    }
}
