use serde::{Deserialize, Serialize};

use furima_core::{ItemId, UserId};

use crate::prefecture::{self, PrefectureId};
use crate::validation::AddressField;

/// Shipping address and payment token submitted at checkout.
///
/// A transient envelope built from form input right before an order is
/// created. It is validated as a whole and never persisted itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderAddress {
    pub item_id: ItemId,
    pub user_id: UserId,
    /// Opaque token issued by the payment gateway.
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default, deserialize_with = "prefecture::deserialize_selection")]
    pub prefecture_id: Option<PrefectureId>,
    #[serde(default)]
    pub city: String,
    /// Street and block number.
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub phone: String,
}

/// Borrowed view of a single field, as seen by the validation rules.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Selection(Option<PrefectureId>),
}

impl<'a> FieldValue<'a> {
    pub fn text(self) -> Option<&'a str> {
        match self {
            FieldValue::Text(s) => Some(s),
            FieldValue::Selection(_) => None,
        }
    }
}

impl OrderAddress {
    /// Start an empty address for `item_id` bought by `user_id`.
    pub fn new(item_id: ItemId, user_id: UserId) -> Self {
        Self {
            item_id,
            user_id,
            token: String::new(),
            postal_code: String::new(),
            prefecture_id: None,
            city: String::new(),
            number: String::new(),
            building: String::new(),
            phone: String::new(),
        }
    }

    pub fn value_of(&self, field: AddressField) -> FieldValue<'_> {
        match field {
            AddressField::Token => FieldValue::Text(&self.token),
            AddressField::PostalCode => FieldValue::Text(&self.postal_code),
            AddressField::PrefectureId => FieldValue::Selection(self.prefecture_id),
            AddressField::City => FieldValue::Text(&self.city),
            AddressField::Number => FieldValue::Text(&self.number),
            AddressField::Building => FieldValue::Text(&self.building),
            AddressField::Phone => FieldValue::Text(&self.phone),
        }
    }
}
