//! Human-readable messages for validation errors.

use std::borrow::Cow;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::validation::{AddressField, ErrorKind, FieldError, ValidationResult};

/// Replacement text for one `(field, kind)` pair, as found in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageOverride {
    pub field: AddressField,
    pub kind: ErrorKind,
    pub message: String,
}

/// Maps validation errors to the text shown next to the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    overrides: HashMap<(AddressField, ErrorKind), String>,
}

fn default_message(field: AddressField, kind: ErrorKind) -> Option<&'static str> {
    use AddressField as F;
    use ErrorKind as K;

    let text = match (field, kind) {
        (F::Token, K::RequiredFieldMissing) => "Token can't be blank",
        (F::PostalCode, K::RequiredFieldMissing) => "Postal code can't be blank",
        (F::PostalCode, K::InvalidFormat) => "Postal code input correctly",
        (F::PrefectureId, K::RequiredFieldMissing) => "Prefecture Select",
        (F::City, K::RequiredFieldMissing) => "City can't be blank",
        (F::Number, K::RequiredFieldMissing) => "Number can't be blank",
        (F::Phone, K::RequiredFieldMissing) => "Phone can't be blank",
        (F::Phone, K::InvalidFormat) => "Phone number input correctly",
        (F::Phone, K::TooLong) => "Phone number is too long",
        _ => return None,
    };
    Some(text)
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overrides<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = MessageOverride>,
    {
        let mut catalog = Self::new();
        for o in overrides {
            catalog.insert(o.field, o.kind, o.message);
        }
        catalog
    }

    pub fn insert(&mut self, field: AddressField, kind: ErrorKind, message: impl Into<String>) {
        self.overrides.insert((field, kind), message.into());
    }

    pub fn message(&self, error: &FieldError) -> Cow<'_, str> {
        if let Some(text) = self.overrides.get(&(error.field, error.kind)) {
            return Cow::Borrowed(text.as_str());
        }
        match default_message(error.field, error.kind) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Owned(format!("{} is invalid", error.field.label())),
        }
    }

    /// One message per error, in result order. Empty for a valid result.
    pub fn full_messages(&self, result: &ValidationResult) -> Vec<String> {
        result
            .errors()
            .iter()
            .map(|error| self.message(error).into_owned())
            .collect()
    }
}
