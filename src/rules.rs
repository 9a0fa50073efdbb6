//! Contact form field rules.
//!
//! Pure logic, no element access. Each field has one [`FieldRule`]: a
//! predicate over the field's current [`FieldValue`] plus the message shown
//! when the predicate fails. A [`RuleSet`] is the table of those rules in
//! declaration order, and the engine functions on it validate one field or
//! every field.
//!
//! | Field | Valid iff |
//! |-------|-----------|
//! | `name` | trimmed length ≥ 2 characters |
//! | `tel` | only digits and `-`, and at least 10 digits |
//! | `email` | `local@domain.tld` with no whitespace or extra `@` |
//! | `contact_method` | one option of the radio group is checked |
//! | `privacy` | the consent checkbox is checked |
//!
//! The tel and email patterns are deliberately simple. International
//! numbers (`+81 …`) fail the tel rule; plus-addressing passes the email
//! rule since `+` is not excluded.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::settings::FieldMessages;

static TEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\-]+$").expect("valid regex"));
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

const NAME_MIN_CHARS: usize = 2;
const TEL_MIN_DIGITS: usize = 10;

/// The contact form's fields, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Name,
    Tel,
    Email,
    ContactMethod,
    Privacy,
}

impl FieldId {
    /// Every field, in the order errors are focused.
    pub const ALL: [FieldId; 5] = [
        FieldId::Name,
        FieldId::Tel,
        FieldId::Email,
        FieldId::ContactMethod,
        FieldId::Privacy,
    ];

    /// The form control `name` attribute for this field.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Tel => "tel",
            FieldId::Email => "email",
            FieldId::ContactMethod => "contact_method",
            FieldId::Privacy => "privacy",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown field '{}' (expected one of: name, tel, email, contact_method, privacy)",
            self.0
        )
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// What a field currently holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw text of an input; rules trim it themselves.
    Text(String),
    /// A checkbox.
    Checked(bool),
    /// A radio group: the checked option's value, if exactly one is checked.
    Choice(Option<String>),
}

impl FieldValue {
    pub fn text(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }

    /// Interpret a plain string as the value `field` would hold.
    ///
    /// The checkbox is checked for `true`, `on`, `yes` or `1`; an empty
    /// string means no radio option is checked.
    pub fn from_raw(field: FieldId, raw: &str) -> Self {
        match field {
            FieldId::Name | FieldId::Tel | FieldId::Email => FieldValue::text(raw),
            FieldId::ContactMethod => {
                FieldValue::Choice(Some(raw.trim()).filter(|v| !v.is_empty()).map(str::to_string))
            }
            FieldId::Privacy => FieldValue::Checked(matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "yes" | "1"
            )),
        }
    }

    /// Trimmed text, or `None` for non-text values and blank text.
    fn filled_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s.trim()).filter(|t| !t.is_empty()),
            _ => None,
        }
    }
}

pub type Predicate = fn(&FieldValue) -> bool;

/// A field's validation predicate plus its user-facing error message.
#[derive(Debug, Clone)]
pub struct FieldRule {
    pub field: FieldId,
    pub predicate: Predicate,
    pub message: String,
}

impl FieldRule {
    pub fn check(&self, value: &FieldValue) -> bool {
        (self.predicate)(value)
    }
}

pub fn valid_name(value: &FieldValue) -> bool {
    value
        .filled_text()
        .is_some_and(|t| t.chars().count() >= NAME_MIN_CHARS)
}

pub fn valid_tel(value: &FieldValue) -> bool {
    value.filled_text().is_some_and(|t| {
        TEL_RE.is_match(t) && t.chars().filter(char::is_ascii_digit).count() >= TEL_MIN_DIGITS
    })
}

pub fn valid_email(value: &FieldValue) -> bool {
    value.filled_text().is_some_and(|t| EMAIL_RE.is_match(t))
}

pub fn valid_choice(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Choice(Some(_)))
}

pub fn valid_consent(value: &FieldValue) -> bool {
    matches!(value, FieldValue::Checked(true))
}

/// Outcome of validating one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub field: FieldId,
    pub valid: bool,
    /// The rule's message when invalid.
    pub message: Option<String>,
}

/// Outcome of validating every field, in rule order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationReport {
    pub verdicts: Vec<Verdict>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.verdicts.iter().all(|v| v.valid)
    }

    /// The first failing field in declaration order.
    pub fn first_invalid(&self) -> Option<FieldId> {
        self.verdicts.iter().find(|v| !v.valid).map(|v| v.field)
    }

    pub fn invalid_fields(&self) -> Vec<FieldId> {
        self.verdicts
            .iter()
            .filter(|v| !v.valid)
            .map(|v| v.field)
            .collect()
    }
}

/// The rule table, in declaration order.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
}

impl RuleSet {
    /// The contact form's rules with the given messages.
    pub fn standard(messages: &FieldMessages) -> Self {
        let rule = |field: FieldId, predicate: Predicate| FieldRule {
            field,
            predicate,
            message: messages.for_field(field).to_string(),
        };
        Self {
            rules: vec![
                rule(FieldId::Name, valid_name),
                rule(FieldId::Tel, valid_tel),
                rule(FieldId::Email, valid_email),
                rule(FieldId::ContactMethod, valid_choice),
                rule(FieldId::Privacy, valid_consent),
            ],
        }
    }

    pub fn new(rules: Vec<FieldRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: FieldId) -> Option<&FieldRule> {
        self.rules.iter().find(|r| r.field == field)
    }

    /// Validate one field. A field without a rule is valid.
    pub fn validate_one(&self, field: FieldId, value: &FieldValue) -> Verdict {
        match self.rule(field) {
            Some(rule) => {
                let valid = rule.check(value);
                Verdict {
                    field,
                    valid,
                    message: (!valid).then(|| rule.message.clone()),
                }
            }
            None => Verdict {
                field,
                valid: true,
                message: None,
            },
        }
    }

    /// Validate every field. Every rule runs even after one fails.
    pub fn validate_all(&self, mut value_of: impl FnMut(FieldId) -> FieldValue) -> ValidationReport {
        let verdicts = self
            .rules
            .iter()
            .map(|rule| self.validate_one(rule.field, &value_of(rule.field)))
            .collect();
        ValidationReport { verdicts }
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard(&FieldMessages::default())
    }
}
