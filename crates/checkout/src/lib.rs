//! Checkout domain module: order address validation.
//!
//! This crate decides whether the shipping address and payment token submitted
//! for a purchase are complete and well-formed, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod checkout;
pub mod config;
pub mod messages;
pub mod order_address;
pub mod prefecture;
pub mod validation;

pub use checkout::{
    CheckoutError, ItemListing, OrderPlaced, PlaceOrder, ShippingAddress, place_order,
};
pub use config::{CONFIG_ENV_VAR, CheckoutConfig, ConfigError};
pub use messages::{MessageCatalog, MessageOverride};
pub use order_address::{FieldValue, OrderAddress};
pub use prefecture::{PrefectureCatalog, PrefectureEntry, PrefectureId, PrefectureTable};
pub use validation::{
    AddressField, AddressValidator, ErrorKind, FieldError, ValidationPolicy, ValidationResult,
};
