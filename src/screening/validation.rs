use chrono::NaiveDate;

use super::domain::{FieldKind, RuleField};
use super::rule::{Rule, RuleInput, RuleOperator, RuleValue};

/// Authoring-time rejections. Surfaced to the rule author for correction;
/// a rejected rule never enters a live ruleset.
#[derive(Debug, thiserror::Error)]
pub enum RuleValidationError {
    #[error("malformed value for {} on {}: {detail}", .operator.label(), .field.label())]
    MalformedRuleValue {
        field: RuleField,
        operator: RuleOperator,
        detail: String,
    },
    #[error("effective date {effective} is after expiration date {expiration}")]
    InvalidDateRange {
        effective: NaiveDate,
        expiration: NaiveDate,
    },
}

/// Convert an authored [`RuleInput`] into a validated [`Rule`].
///
/// The value string must match the shape the operator expects for the field's
/// kind; `required`/`optional` ignore the value entirely. Pure function, no
/// side effects.
pub fn validate_rule(input: RuleInput) -> Result<Rule, RuleValidationError> {
    if let (Some(effective), Some(expiration)) = (input.effective_date, input.expiration_date) {
        if effective > expiration {
            return Err(RuleValidationError::InvalidDateRange {
                effective,
                expiration,
            });
        }
    }

    let value = parse_value(input.field, input.operator, &input.value)?;

    Ok(Rule {
        id: input.id,
        payer_id: input.payer_id,
        field: input.field,
        operator: input.operator,
        value,
        action: input.action,
        is_active: input.is_active,
        effective_date: input.effective_date,
        expiration_date: input.expiration_date,
    })
}

fn parse_value(
    field: RuleField,
    operator: RuleOperator,
    raw: &str,
) -> Result<RuleValue, RuleValidationError> {
    let malformed = |detail: &str| RuleValidationError::MalformedRuleValue {
        field,
        operator,
        detail: detail.to_string(),
    };

    let trimmed = raw.trim();
    let kind = field.kind();

    match operator {
        RuleOperator::Required | RuleOperator::Optional => Ok(RuleValue::None),

        RuleOperator::In | RuleOperator::NotIn => {
            let tokens: Vec<String> = trimmed
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect();
            if tokens.is_empty() {
                return Err(malformed("expected a non-empty comma-separated list"));
            }
            if kind == FieldKind::Count {
                for token in &tokens {
                    if token.parse::<f64>().is_err() {
                        return Err(malformed("every list entry must be numeric for this field"));
                    }
                }
            }
            Ok(RuleValue::List(tokens))
        }

        RuleOperator::StartsWith | RuleOperator::EndsWith | RuleOperator::Contains => {
            if trimmed.is_empty() {
                return Err(malformed("expected a non-empty match fragment"));
            }
            Ok(RuleValue::Text(trimmed.to_string()))
        }

        RuleOperator::Equals | RuleOperator::NotEquals => {
            if trimmed.is_empty() {
                return Err(malformed("expected a non-empty comparison value"));
            }
            match kind {
                FieldKind::Count => parse_number(trimmed)
                    .map(RuleValue::Number)
                    .ok_or_else(|| malformed("expected a numeric comparison value")),
                FieldKind::Date => parse_date(trimmed)
                    .map(RuleValue::Date)
                    .ok_or_else(|| malformed("expected an ISO date (YYYY-MM-DD)")),
                FieldKind::CodeList | FieldKind::Text => Ok(RuleValue::Text(trimmed.to_string())),
            }
        }

        RuleOperator::LessThan | RuleOperator::GreaterThan => match kind {
            FieldKind::Date => parse_date(trimmed)
                .map(RuleValue::Date)
                .ok_or_else(|| malformed("expected an ISO date (YYYY-MM-DD) bound")),
            _ => parse_number(trimmed)
                .map(RuleValue::Number)
                .ok_or_else(|| malformed("expected a numeric bound")),
        },

        RuleOperator::Between => match kind {
            FieldKind::Date => {
                let (lo, hi) = parse_date_range(trimmed)
                    .ok_or_else(|| malformed("expected a YYYY-MM-DD-YYYY-MM-DD range"))?;
                if lo > hi {
                    return Err(malformed("lower bound exceeds upper bound"));
                }
                Ok(RuleValue::DateRange { lo, hi })
            }
            _ => {
                let (lo, hi) = parse_number_range(trimmed)
                    .ok_or_else(|| malformed("expected a lo-hi numeric range"))?;
                if lo > hi {
                    return Err(malformed("lower bound exceeds upper bound"));
                }
                Ok(RuleValue::NumberRange { lo, hi })
            }
        },
    }
}

fn parse_number(value: &str) -> Option<f64> {
    let parsed: f64 = value.parse().ok()?;
    parsed.is_finite().then_some(parsed)
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

fn parse_number_range(value: &str) -> Option<(f64, f64)> {
    let (lo, hi) = value.split_once('-')?;
    Some((parse_number(lo.trim())?, parse_number(hi.trim())?))
}

// ISO dates are fixed width, so the separating dash sits at a known offset:
// "YYYY-MM-DD-YYYY-MM-DD".
fn parse_date_range(value: &str) -> Option<(NaiveDate, NaiveDate)> {
    if value.as_bytes().get(10) != Some(&b'-') {
        return None;
    }
    let lo = value.get(..10)?;
    let hi = value.get(11..)?;
    Some((parse_date(lo)?, parse_date(hi.trim())?))
}
