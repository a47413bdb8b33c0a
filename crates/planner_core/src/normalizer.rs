//! Turns a [`PreferenceModel`] into the payload the planning service accepts.

use shared::protocol::RequestPayload;

use crate::{error::ValidationError, preferences::PreferenceModel};

const TOKEN_SEPARATOR: char = ',';

/// Validates and converts raw preferences. Never touches the network.
pub fn normalize(model: &PreferenceModel) -> Result<RequestPayload, ValidationError> {
    let targets = &model.targets;

    Ok(RequestPayload {
        dietary_restrictions: model.dietary_restrictions.iter().copied().collect(),
        allergies: split_tokens(&model.allergies),
        dislikes: split_tokens(&model.dislikes),
        target_protein_g: parse_target("target_protein_g", &targets.protein_g)?,
        target_carbs_g: parse_target("target_carbs_g", &targets.carbs_g)?,
        target_fat_g: parse_target("target_fat_g", &targets.fat_g)?,
        target_calories: parse_target("target_calories", &targets.calories)?,
        preferred_cuisines: split_tokens(&model.preferred_cuisines),
        cooking_skill_level: model.cooking_skill_level,
        max_cooking_time_min: parse_positive_integer(
            "max_cooking_time_min",
            &model.max_cooking_time_min,
        )?,
        weekly_budget: parse_positive_decimal("weekly_budget", &model.weekly_budget)?,
        max_repeats_per_week: parse_positive_integer(
            "max_repeats_per_week",
            &model.max_repeats_per_week,
        )?,
    })
}

/// Splits a comma separated list, dropping blank entries. Order and
/// duplicates are kept.
pub fn split_tokens(raw: &str) -> Vec<String> {
    raw.split(TOKEN_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

struct IntegerPrefix<'a> {
    negative: bool,
    digits: &'a str,
}

impl IntegerPrefix<'_> {
    fn is_zero(&self) -> bool {
        self.digits.bytes().all(|b| b == b'0')
    }
}

/// Leading `[+-]?[0-9]+` after optional whitespace; the rest is ignored.
fn leading_integer(raw: &str) -> Option<IntegerPrefix<'_>> {
    let trimmed = raw.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if len == 0 {
        return None;
    }
    Some(IntegerPrefix {
        negative,
        digits: &rest[..len],
    })
}

fn parse_integer(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let prefix = leading_integer(raw).ok_or_else(|| ValidationError::NotANumber {
        field,
        value: raw.to_string(),
    })?;
    if prefix.negative && !prefix.is_zero() {
        return Err(ValidationError::Negative {
            field,
            value: raw.to_string(),
        });
    }
    prefix
        .digits
        .parse::<u32>()
        .map_err(|_| ValidationError::OutOfRange {
            field,
            value: raw.to_string(),
        })
}

fn parse_target(field: &'static str, raw: &str) -> Result<Option<u32>, ValidationError> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_integer(field, raw).map(Some)
}

fn parse_positive_integer(field: &'static str, raw: &str) -> Result<u32, ValidationError> {
    let value = parse_integer(field, raw).map_err(|err| match err {
        ValidationError::Negative { field, value } => ValidationError::NotPositive { field, value },
        other => other,
    })?;
    if value == 0 {
        return Err(ValidationError::NotPositive {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

fn parse_positive_decimal(field: &'static str, raw: &str) -> Result<f64, ValidationError> {
    let value = raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field,
            value: raw.to_string(),
        })?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            field,
            value: raw.to_string(),
        });
    }
    Ok(value)
}

#[cfg(test)]
#[path = "tests/normalizer_tests.rs"]
mod tests;
