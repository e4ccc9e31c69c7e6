//! Local, pre-network input validation.
//!
//! Rules are declared per field and checked in order; the first failure is
//! the message shown under that field. Validation never logs and never
//! touches the network.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

/// Current text of every input in a form, keyed by field name.
pub type FieldValues = BTreeMap<&'static str, String>;

/// Inline messages for the fields that failed.
pub type FieldErrors = BTreeMap<&'static str, &'static str>;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern"));

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rule {
    /// Non-blank after trimming
    Required(&'static str),
    /// At least N characters (trimmed)
    MinLength(usize, &'static str),
    /// Whole integer
    Integer(&'static str),
    /// Any finite number
    Number(&'static str),
    /// Numeric value >= bound; values that do not parse are left to
    /// `Integer`/`Number`
    Min(f64, &'static str),
    Email(&'static str),
}

impl Rule {
    fn check(&self, value: &str) -> Result<(), &'static str> {
        let trimmed = value.trim();
        let ok = match self {
            Rule::Required(_) => !trimmed.is_empty(),
            Rule::MinLength(min, _) => trimmed.chars().count() >= *min,
            Rule::Integer(_) => trimmed.parse::<i64>().is_ok(),
            Rule::Number(_) => parse_number(trimmed).is_some(),
            Rule::Min(bound, _) => parse_number(trimmed).map_or(true, |n| n >= *bound),
            Rule::Email(_) => EMAIL_PATTERN.is_match(trimmed),
        };
        if ok {
            Ok(())
        } else {
            Err(self.message())
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rule::Required(m)
            | Rule::MinLength(_, m)
            | Rule::Integer(m)
            | Rule::Number(m)
            | Rule::Min(_, m)
            | Rule::Email(m) => m,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputType {
    Text,
    TextArea,
    Number,
    Email,
    Password,
}

impl InputType {
    pub fn as_html(&self) -> &'static str {
        match self {
            InputType::Text | InputType::TextArea => "text",
            InputType::Number => "number",
            InputType::Email => "email",
            InputType::Password => "password",
        }
    }
}

/// One input in a form
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub input_type: InputType,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    fn is_required(&self) -> bool {
        self.rules.iter().any(|r| matches!(r, Rule::Required(_)))
    }
}

/// Check one value; `None` means it passed.
pub fn validate_field(spec: &FieldSpec, value: &str) -> Option<&'static str> {
    if value.trim().is_empty() && !spec.is_required() {
        return None;
    }
    spec.rules.iter().find_map(|rule| rule.check(value).err())
}

/// Check every field independently. A missing entry counts as empty.
pub fn validate(fields: &[FieldSpec], values: &FieldValues) -> Result<(), FieldErrors> {
    let errors: FieldErrors = fields
        .iter()
        .filter_map(|spec| {
            let value = values.get(spec.name).map(String::as_str).unwrap_or("");
            validate_field(spec, value).map(|msg| (spec.name, msg))
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Every field present and empty.
pub fn blank_values(fields: &[FieldSpec]) -> FieldValues {
    fields.iter().map(|f| (f.name, String::new())).collect()
}

/// Strict identifier parse: the whole trimmed text must be a positive integer.
pub fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id >= 1)
}

pub fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
