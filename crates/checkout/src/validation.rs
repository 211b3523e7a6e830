//! Order address validation.
//!
//! Every field owns an ordered chain of rules. A rule is only evaluated while
//! the earlier rules of the same field hold, so each field reports at most its
//! first violation. Fields never short-circuit each other: the result lists
//! every failing field, in declaration order.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use furima_core::{DomainError, DomainResult};

use crate::order_address::{FieldValue, OrderAddress};
use crate::prefecture::PrefectureCatalog;

/// `NNN-NNNN` with ASCII digits only (`\d` would also accept other scripts).
static POSTAL_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{3}-[0-9]{4}$").expect("postal code pattern is valid"));

/// Fields of an [`OrderAddress`], in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressField {
    Token,
    PostalCode,
    PrefectureId,
    City,
    Number,
    Building,
    Phone,
}

impl AddressField {
    pub const ALL: [AddressField; 7] = [
        AddressField::Token,
        AddressField::PostalCode,
        AddressField::PrefectureId,
        AddressField::City,
        AddressField::Number,
        AddressField::Building,
        AddressField::Phone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            AddressField::Token => "token",
            AddressField::PostalCode => "postal_code",
            AddressField::PrefectureId => "prefecture_id",
            AddressField::City => "city",
            AddressField::Number => "number",
            AddressField::Building => "building",
            AddressField::Phone => "phone",
        }
    }

    /// Human-readable name used as the subject of error messages.
    pub fn label(self) -> &'static str {
        match self {
            AddressField::Token => "Token",
            AddressField::PostalCode => "Postal code",
            AddressField::PrefectureId => "Prefecture",
            AddressField::City => "City",
            AddressField::Number => "Number",
            AddressField::Building => "Building",
            AddressField::Phone => "Phone",
        }
    }
}

impl core::fmt::Display for AddressField {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was rejected.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Blank, or (for the prefecture) nothing selectable chosen.
    RequiredFieldMissing,
    /// Present but not in the required shape.
    InvalidFormat,
    /// Correctly shaped but longer than allowed.
    TooLong,
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            ErrorKind::RequiredFieldMissing => "required field missing",
            ErrorKind::InvalidFormat => "invalid format",
            ErrorKind::TooLong => "too long",
        })
    }
}

/// A single rule violation, scoped to one field.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[error("{field}: {kind}")]
pub struct FieldError {
    pub field: AddressField,
    pub kind: ErrorKind,
}

impl FieldError {
    pub fn new(field: AddressField, kind: ErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Verdict of [`AddressValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "errors", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    /// Never empty.
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<FieldError>) -> Self {
        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            ValidationResult::Valid => &[],
            ValidationResult::Invalid(errors) => errors,
        }
    }

    /// Violations reported for `field`.
    pub fn errors_for(&self, field: AddressField) -> impl Iterator<Item = &FieldError> {
        self.errors().iter().filter(move |e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), Vec<FieldError>> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(errors) => Err(errors),
        }
    }
}

/// Tunable limits applied by the validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Maximum number of digits accepted in a phone number.
    pub phone_max_digits: usize,
}

impl ValidationPolicy {
    pub const DEFAULT_PHONE_MAX_DIGITS: usize = 11;

    pub fn check(&self) -> DomainResult<()> {
        if self.phone_max_digits == 0 {
            return Err(DomainError::validation(
                "phone_max_digits must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            phone_max_digits: Self::DEFAULT_PHONE_MAX_DIGITS,
        }
    }
}

/// Lookup data the rules may consult.
struct RuleContext<'a> {
    catalog: &'a PrefectureCatalog,
    policy: &'a ValidationPolicy,
}

/// Predicate + the error reported when it does not hold.
struct Rule {
    kind: ErrorKind,
    holds: fn(FieldValue<'_>, &RuleContext<'_>) -> bool,
}

struct FieldRules {
    field: AddressField,
    rules: &'static [Rule],
}

const REQUIRED: Rule = Rule {
    kind: ErrorKind::RequiredFieldMissing,
    holds: is_present,
};

const RULES: &[FieldRules] = &[
    FieldRules {
        field: AddressField::Token,
        rules: &[REQUIRED],
    },
    FieldRules {
        field: AddressField::PostalCode,
        rules: &[
            REQUIRED,
            Rule {
                kind: ErrorKind::InvalidFormat,
                holds: is_postal_code,
            },
        ],
    },
    FieldRules {
        field: AddressField::PrefectureId,
        rules: &[REQUIRED],
    },
    FieldRules {
        field: AddressField::City,
        rules: &[REQUIRED],
    },
    FieldRules {
        field: AddressField::Number,
        rules: &[REQUIRED],
    },
    // Optional.
    FieldRules {
        field: AddressField::Building,
        rules: &[],
    },
    FieldRules {
        field: AddressField::Phone,
        rules: &[
            REQUIRED,
            Rule {
                kind: ErrorKind::InvalidFormat,
                holds: is_digits_only,
            },
            Rule {
                kind: ErrorKind::TooLong,
                holds: is_within_phone_length,
            },
        ],
    },
];

fn is_present(value: FieldValue<'_>, ctx: &RuleContext<'_>) -> bool {
    match value {
        FieldValue::Text(s) => !s.trim().is_empty(),
        FieldValue::Selection(selection) => {
            selection.is_some_and(|id| ctx.catalog.is_selectable(id))
        }
    }
}

fn is_postal_code(value: FieldValue<'_>, _ctx: &RuleContext<'_>) -> bool {
    value.text().is_some_and(|s| POSTAL_CODE.is_match(s))
}

fn is_digits_only(value: FieldValue<'_>, _ctx: &RuleContext<'_>) -> bool {
    value
        .text()
        .is_some_and(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
}

// Runs after `is_digits_only`, so byte length is the digit count.
fn is_within_phone_length(value: FieldValue<'_>, ctx: &RuleContext<'_>) -> bool {
    value
        .text()
        .is_some_and(|s| s.len() <= ctx.policy.phone_max_digits)
}

/// Validates order addresses against a prefecture catalog and policy.
///
/// Pure and stateless: `validate` never mutates its input and may be shared
/// freely across threads.
#[derive(Debug, Clone, Default)]
pub struct AddressValidator {
    catalog: PrefectureCatalog,
    policy: ValidationPolicy,
}

impl AddressValidator {
    /// Fails when `policy` is unusable (see [`ValidationPolicy::check`]).
    pub fn new(catalog: PrefectureCatalog, policy: ValidationPolicy) -> DomainResult<Self> {
        policy.check()?;
        Ok(Self { catalog, policy })
    }

    /// Japanese prefectures with the default policy.
    pub fn japan() -> Self {
        Self {
            catalog: PrefectureCatalog::japan(),
            policy: ValidationPolicy::default(),
        }
    }

    pub fn catalog(&self) -> &PrefectureCatalog {
        &self.catalog
    }

    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    pub fn validate(&self, address: &OrderAddress) -> ValidationResult {
        let ctx = RuleContext {
            catalog: &self.catalog,
            policy: &self.policy,
        };

        let errors: Vec<FieldError> = RULES
            .iter()
            .filter_map(|field_rules| {
                let value = address.value_of(field_rules.field);
                field_rules
                    .rules
                    .iter()
                    .find(|rule| !(rule.holds)(value, &ctx))
                    .map(|rule| FieldError::new(field_rules.field, rule.kind))
            })
            .collect();

        if errors.is_empty() {
            tracing::debug!(item_id = %address.item_id, user_id = %address.user_id, "order address accepted");
        } else {
            tracing::debug!(
                item_id = %address.item_id,
                user_id = %address.user_id,
                error_count = errors.len(),
                "order address rejected"
            );
        }

        ValidationResult::from_errors(errors)
    }
}
