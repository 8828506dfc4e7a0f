//! Request validation against a declarative per-field rule table.

use crate::error::AppError;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

/// What a present, non-empty value must look like.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Text,
    Email,
    PositiveInteger,
}

#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub field: &'static str,
    pub required: bool,
    pub format: Format,
}

/// Rules for the create-student payload, checked in this order.
pub const STUDENT_RULES: &[FieldRule] = &[
    FieldRule {
        field: "name",
        required: true,
        format: Format::Text,
    },
    FieldRule {
        field: "email",
        required: true,
        format: Format::Email,
    },
    FieldRule {
        field: "age",
        required: true,
        format: Format::PositiveInteger,
    },
];

enum Violation {
    Missing,
    Invalid,
}

pub struct RequestValidator;

impl RequestValidator {
    /// Check every rule and report all failing fields at once.
    pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), AppError> {
        let messages: Vec<String> = rules
            .iter()
            .filter_map(|rule| {
                check_field(body.get(rule.field), rule).map(|v| match v {
                    Violation::Missing => format!("field {} is required", rule.field),
                    Violation::Invalid => format!("field {} is invalid", rule.field),
                })
            })
            .collect();
        if messages.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(messages))
        }
    }
}

fn check_field(value: Option<&Value>, rule: &FieldRule) -> Option<Violation> {
    let value = match value {
        Some(v) if !is_zero_value(v) => v,
        _ if rule.required => return Some(Violation::Missing),
        _ => return None,
    };
    if matches_format(value, rule.format) {
        None
    } else {
        Some(Violation::Invalid)
    }
}

/// Null, "" and 0 count as absent.
fn is_zero_value(v: &Value) -> bool {
    match v {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

fn matches_format(v: &Value, format: Format) -> bool {
    match format {
        Format::Text => v.as_str().is_some_and(|s| !s.trim().is_empty()),
        Format::Email => v.as_str().is_some_and(is_email),
        Format::PositiveInteger => v.as_i64().is_some_and(|n| n > 0),
    }
}

fn is_email(s: &str) -> bool {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(EMAIL_PATTERN).ok())
        .as_ref()
        .is_some_and(|re| re.is_match(s))
}
