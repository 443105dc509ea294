//! Field validation rules.
//!
//! Every rule except [`Rule::Required`] passes on an empty value, so optional
//! fields only get checked once the user types something.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::form::FormData;
use crate::schema::{FieldSpec, FormSchema};

/// Wire and input format of date fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    Numeric,
    /// Numeric value of at least this amount.
    Min(f64),
    Date,
    /// Date on or after the date in another field (camelCase name).
    NotBefore(&'static str),
    OneOf(&'static [&'static str]),
}

impl Rule {
    /// Message for the first violation, or `None` when `value` passes.
    pub fn check(&self, field: &FieldSpec, value: &str, data: &FormData, schema: &FormSchema) -> Option<String> {
        let value = value.trim();
        let label = field.label;

        if value.is_empty() {
            return matches!(self, Rule::Required).then(|| format!("{label} is required."));
        }

        match self {
            Rule::Required => None,
            Rule::MinLength(min) => {
                (value.chars().count() < *min).then(|| format!("{label} must be at least {min} characters."))
            }
            Rule::MaxLength(max) => {
                (value.chars().count() > *max).then(|| format!("{label} may not be greater than {max} characters."))
            }
            Rule::Email => (!is_email(value)).then(|| "Please enter a valid email address.".to_string()),
            Rule::Numeric => value
                .parse::<f64>()
                .map_or(true, |n| !n.is_finite())
                .then(|| format!("{label} must be a number.")),
            Rule::Min(min) => match value.parse::<f64>() {
                Ok(n) if n >= *min => None,
                Ok(_) => Some(format!("{label} must be at least {min}.")),
                Err(_) => Some(format!("{label} must be a number.")),
            },
            Rule::Date => parse_date(value)
                .is_none()
                .then(|| format!("{label} must be a valid date.")),
            Rule::NotBefore(other) => {
                let this = parse_date(value)?;
                let earlier = data.get(*other).and_then(|v| parse_date(v.trim()))?;
                let other_label = schema.get(other).map_or(*other, |spec| spec.label);
                (this < earlier).then(|| format!("{label} cannot be before {other_label}."))
            }
            Rule::OneOf(options) => (!options.contains(&value))
                .then(|| format!("{label} must be one of: {}.", options.join(", "))),
        }
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL.as_ref().is_some_and(|re| re.is_match(value))
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}
