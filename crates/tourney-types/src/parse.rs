use crate::error::DomainError;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a currency widget's text into an exact decimal amount.
///
/// Accepts an optional leading `$` and thousands separators; surrounding
/// whitespace is ignored. A blank string parses as zero.
pub fn parse_money(text: &str) -> Result<Decimal, DomainError> {
    let cleaned: String = text
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&cleaned).map_err(|_| DomainError::InvalidMoney {
        value: text.to_string(),
    })
}

/// Parse a squad start time. Both `"02:00 PM"` and `"14:00"` are accepted.
pub fn parse_squad_time(text: &str) -> Result<NaiveTime, DomainError> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%I:%M %p")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|_| DomainError::InvalidTime {
            value: text.to_string(),
        })
}
