//! Order placement: the workflow that consumes an address verdict.
//!
//! Pure decision logic. It returns the order record to persist (or why not),
//! and leaves storage and payment capture to the caller.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use furima_core::{DomainError, Entity, ItemId, OrderId, UserId};

use crate::order_address::OrderAddress;
use crate::prefecture::PrefectureId;
use crate::validation::{AddressValidator, FieldError};

/// The item being purchased, by reference.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemListing {
    pub item_id: ItemId,
    pub seller_id: UserId,
}

impl Entity for ItemListing {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.item_id
    }
}

/// Command: PlaceOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrder {
    pub order_id: OrderId,
    pub buyer_id: UserId,
    pub item: ItemListing,
    pub address: OrderAddress,
    pub occurred_at: DateTime<Utc>,
}

/// Validated shipping destination. The payment token is not carried over.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub postal_code: String,
    pub prefecture_id: PrefectureId,
    pub city: String,
    pub number: String,
    pub building: Option<String>,
    pub phone: String,
}

/// Outcome of a successful PlaceOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderPlaced {
    pub order_id: OrderId,
    pub item_id: ItemId,
    pub seller_id: UserId,
    pub buyer_id: UserId,
    pub shipping: ShippingAddress,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("order address is invalid ({} error(s))", .0.len())]
    InvalidAddress(Vec<FieldError>),

    #[error("sellers cannot purchase their own item")]
    OwnItem,

    #[error(transparent)]
    Domain(#[from] DomainError),
}

fn ensure_same_references(cmd: &PlaceOrder) -> Result<(), DomainError> {
    if cmd.address.item_id != *cmd.item.id() {
        return Err(DomainError::invariant("item_id mismatch"));
    }
    if cmd.address.user_id != cmd.buyer_id {
        return Err(DomainError::invariant("user_id mismatch"));
    }
    Ok(())
}

/// Decide whether `cmd` may become an order.
///
/// Address problems are reported all at once; the seller check only runs on a
/// valid address.
pub fn place_order(
    validator: &AddressValidator,
    cmd: &PlaceOrder,
) -> Result<OrderPlaced, CheckoutError> {
    ensure_same_references(cmd)?;

    validator
        .validate(&cmd.address)
        .into_result()
        .map_err(CheckoutError::InvalidAddress)?;

    if cmd.item.seller_id == cmd.buyer_id {
        tracing::info!(item_id = %cmd.item.item_id, "seller attempted to buy own item");
        return Err(CheckoutError::OwnItem);
    }

    let address = &cmd.address;
    let prefecture_id = address
        .prefecture_id
        .ok_or_else(|| DomainError::invariant("validated address has no prefecture"))?;
    let building = Some(address.building.trim())
        .filter(|b| !b.is_empty())
        .map(str::to_string);

    tracing::info!(order_id = %cmd.order_id, item_id = %cmd.item.item_id, "order placed");

    Ok(OrderPlaced {
        order_id: cmd.order_id,
        item_id: cmd.item.item_id,
        seller_id: cmd.item.seller_id,
        buyer_id: cmd.buyer_id,
        shipping: ShippingAddress {
            postal_code: address.postal_code.clone(),
            prefecture_id,
            city: address.city.clone(),
            number: address.number.clone(),
            building,
            phone: address.phone.clone(),
        },
        occurred_at: cmd.occurred_at,
    })
}
