use chrono::NaiveDate;

use crate::screening::domain::FieldValue;
use crate::screening::rule::{RuleOperator, RuleValue};

/// Structural mismatch between an operator and the field it was aimed at.
/// Treated as a rule-definition bug by the aggregator, never a silent false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IncompatibleOperator;

/// Pure condition check: does `field` satisfy `operator` against `value`?
///
/// String comparisons are case-insensitive. List-valued fields use
/// any-element semantics: the condition holds if any code in the claim's list
/// satisfies it.
pub(crate) fn evaluate(
    field: FieldValue<'_>,
    operator: RuleOperator,
    value: &RuleValue,
) -> Result<bool, IncompatibleOperator> {
    match operator {
        RuleOperator::Optional => Ok(true),
        RuleOperator::Required => Ok(is_present(field)),

        RuleOperator::Equals => equals(field, value),
        RuleOperator::NotEquals => equals(field, value).map(|matched| !matched),

        RuleOperator::In => membership(field, value),
        RuleOperator::NotIn => membership(field, value).map(|matched| !matched),

        RuleOperator::StartsWith => {
            fragment_match(field, value, |haystack, needle| haystack.starts_with(needle))
        }
        RuleOperator::EndsWith => {
            fragment_match(field, value, |haystack, needle| haystack.ends_with(needle))
        }
        RuleOperator::Contains => {
            fragment_match(field, value, |haystack, needle| haystack.contains(needle))
        }

        RuleOperator::Between => between(field, value),
        RuleOperator::LessThan => ordered(field, value, Ordering::Less),
        RuleOperator::GreaterThan => ordered(field, value, Ordering::Greater),
    }
}

fn is_present(field: FieldValue<'_>) -> bool {
    match field {
        FieldValue::Codes(codes) => !codes.is_empty(),
        FieldValue::Text(text) => !text.trim().is_empty(),
        FieldValue::Count(_) | FieldValue::Date(_) => true,
    }
}

fn equals(field: FieldValue<'_>, value: &RuleValue) -> Result<bool, IncompatibleOperator> {
    match (field, value) {
        (FieldValue::Codes(codes), RuleValue::Text(expected)) => Ok(codes
            .iter()
            .any(|code| code.trim().eq_ignore_ascii_case(expected))),
        (FieldValue::Text(text), RuleValue::Text(expected)) => {
            Ok(text.trim().eq_ignore_ascii_case(expected))
        }
        (FieldValue::Count(count), RuleValue::Number(expected)) => {
            Ok((count as f64) == *expected)
        }
        (FieldValue::Date(date), RuleValue::Date(expected)) => Ok(date == *expected),
        _ => Err(IncompatibleOperator),
    }
}

fn membership(field: FieldValue<'_>, value: &RuleValue) -> Result<bool, IncompatibleOperator> {
    let RuleValue::List(tokens) = value else {
        return Err(IncompatibleOperator);
    };
    match field {
        // Non-empty intersection: any claim code present in the rule's list.
        FieldValue::Codes(codes) => Ok(codes.iter().any(|code| {
            tokens
                .iter()
                .any(|token| token.eq_ignore_ascii_case(code.trim()))
        })),
        FieldValue::Text(text) => Ok(tokens
            .iter()
            .any(|token| token.eq_ignore_ascii_case(text.trim()))),
        FieldValue::Count(count) => Ok(tokens
            .iter()
            .any(|token| token.parse::<f64>().map_or(false, |n| n == count as f64))),
        FieldValue::Date(_) => Err(IncompatibleOperator),
    }
}

fn fragment_match(
    field: FieldValue<'_>,
    value: &RuleValue,
    predicate: impl Fn(&str, &str) -> bool,
) -> Result<bool, IncompatibleOperator> {
    let RuleValue::Text(fragment) = value else {
        return Err(IncompatibleOperator);
    };
    let needle = fragment.to_ascii_lowercase();
    match field {
        FieldValue::Codes(codes) => Ok(codes
            .iter()
            .any(|code| predicate(&code.trim().to_ascii_lowercase(), &needle))),
        FieldValue::Text(text) => Ok(predicate(&text.trim().to_ascii_lowercase(), &needle)),
        FieldValue::Count(_) | FieldValue::Date(_) => Err(IncompatibleOperator),
    }
}

fn between(field: FieldValue<'_>, value: &RuleValue) -> Result<bool, IncompatibleOperator> {
    match (field, value) {
        (FieldValue::Count(count), RuleValue::NumberRange { lo, hi }) => {
            let n = count as f64;
            Ok(*lo <= n && n <= *hi)
        }
        // Codes compare numerically per element; non-numeric codes never match.
        (FieldValue::Codes(codes), RuleValue::NumberRange { lo, hi }) => Ok(codes
            .iter()
            .filter_map(|code| code.trim().parse::<f64>().ok())
            .any(|n| *lo <= n && n <= *hi)),
        (FieldValue::Date(date), RuleValue::DateRange { lo, hi }) => {
            Ok(*lo <= date && date <= *hi)
        }
        _ => Err(IncompatibleOperator),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ordering {
    Less,
    Greater,
}

fn ordered(
    field: FieldValue<'_>,
    value: &RuleValue,
    direction: Ordering,
) -> Result<bool, IncompatibleOperator> {
    let compare_number = |n: f64, bound: f64| match direction {
        Ordering::Less => n < bound,
        Ordering::Greater => n > bound,
    };
    let compare_date = |d: NaiveDate, bound: NaiveDate| match direction {
        Ordering::Less => d < bound,
        Ordering::Greater => d > bound,
    };

    match (field, value) {
        (FieldValue::Count(count), RuleValue::Number(bound)) => {
            Ok(compare_number(count as f64, *bound))
        }
        (FieldValue::Codes(codes), RuleValue::Number(bound)) => Ok(codes
            .iter()
            .filter_map(|code| code.trim().parse::<f64>().ok())
            .any(|n| compare_number(n, *bound))),
        (FieldValue::Date(date), RuleValue::Date(bound)) => Ok(compare_date(date, *bound)),
        _ => Err(IncompatibleOperator),
    }
}
