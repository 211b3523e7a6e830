//! Checkout scenarios: a buyer submits an address for an item listed by
//! another user, and the form shows whatever the validator reports.

use furima_checkout::{
    AddressField, AddressValidator, CheckoutError, ErrorKind, FieldError, ItemListing,
    MessageCatalog, OrderAddress, PlaceOrder, PrefectureId, place_order,
};
use furima_core::{ItemId, OrderId, UserId};

struct Checkout {
    seller_id: UserId,
    buyer_id: UserId,
    item: ItemListing,
    address: OrderAddress,
}

impl Checkout {
    fn new() -> Self {
        let seller_id = UserId::new();
        let buyer_id = UserId::new();
        let item = ItemListing {
            item_id: ItemId::new(),
            seller_id,
        };
        let address = OrderAddress {
            token: "tok_abcdefghij00000000000000000".to_string(),
            postal_code: "123-4567".to_string(),
            prefecture_id: Some(PrefectureId(1)),
            city: "横浜市緑区".to_string(),
            number: "青山1-1-1".to_string(),
            building: "柳ビル103".to_string(),
            phone: "09012345678".to_string(),
            ..OrderAddress::new(item.item_id, buyer_id)
        };

        Self {
            seller_id,
            buyer_id,
            item,
            address,
        }
    }

    fn full_messages(&self) -> Vec<String> {
        let result = AddressValidator::japan().validate(&self.address);
        MessageCatalog::new().full_messages(&result)
    }

    fn place(&self) -> Result<furima_checkout::OrderPlaced, CheckoutError> {
        let cmd = PlaceOrder {
            order_id: OrderId::new(),
            buyer_id: self.buyer_id,
            item: self.item,
            address: self.address.clone(),
            occurred_at: chrono::Utc::now(),
        };
        place_order(&AddressValidator::japan(), &cmd)
    }
}

#[test]
fn purchase_succeeds_with_a_complete_address() {
    let checkout = Checkout::new();
    assert!(AddressValidator::japan().validate(&checkout.address).is_valid());
    assert!(checkout.place().is_ok());
}

#[test]
fn purchase_succeeds_without_a_building() {
    let mut checkout = Checkout::new();
    checkout.address.building = String::new();
    assert!(checkout.full_messages().is_empty());
    assert!(checkout.place().is_ok());
}

#[test]
fn purchase_succeeds_when_buyer_is_not_the_seller() {
    let checkout = Checkout::new();
    assert_ne!(checkout.seller_id, checkout.buyer_id);
    assert_eq!(checkout.place().unwrap().seller_id, checkout.seller_id);
}

#[test]
fn purchase_fails_when_the_seller_is_the_buyer() {
    let mut checkout = Checkout::new();
    checkout.buyer_id = checkout.seller_id;
    checkout.address.user_id = checkout.seller_id;
    assert_eq!(checkout.place().unwrap_err(), CheckoutError::OwnItem);
}

#[test]
fn missing_token_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.token = String::new();
    assert_eq!(checkout.full_messages(), vec!["Token can't be blank"]);
}

#[test]
fn missing_postal_code_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.postal_code = String::new();
    assert_eq!(checkout.full_messages(), vec!["Postal code can't be blank"]);
}

#[test]
fn postal_code_with_letters_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.postal_code = "kkk-kkkk".to_string();
    assert_eq!(checkout.full_messages(), vec!["Postal code input correctly"]);
}

#[test]
fn postal_code_without_hyphen_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.postal_code = "6561334".to_string();
    assert_eq!(checkout.full_messages(), vec!["Postal code input correctly"]);
}

#[test]
fn unselected_prefecture_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.prefecture_id = PrefectureId::parse_selection("").unwrap();
    assert_eq!(checkout.full_messages(), vec!["Prefecture Select"]);

    checkout.address.prefecture_id = Some(AddressValidator::japan().catalog().unselected());
    assert_eq!(checkout.full_messages(), vec!["Prefecture Select"]);
}

#[test]
fn missing_city_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.city = String::new();
    assert_eq!(checkout.full_messages(), vec!["City can't be blank"]);
}

#[test]
fn missing_number_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.number = String::new();
    assert_eq!(checkout.full_messages(), vec!["Number can't be blank"]);
}

#[test]
fn missing_phone_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.phone = String::new();
    assert_eq!(checkout.full_messages(), vec!["Phone can't be blank"]);
}

#[test]
fn eleven_digit_phone_is_accepted() {
    let mut checkout = Checkout::new();
    checkout.address.phone = "99999999999".to_string();
    assert!(checkout.full_messages().is_empty());
}

#[test]
fn hyphenated_phone_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.phone = "080-0808-0808".to_string();
    assert_eq!(checkout.full_messages(), vec!["Phone number input correctly"]);
}

#[test]
fn phone_longer_than_eleven_digits_is_reported() {
    let mut checkout = Checkout::new();
    checkout.address.phone = "0808888888888".to_string();
    assert_eq!(checkout.full_messages(), vec!["Phone number is too long"]);
}

#[test]
fn every_problem_is_reported_together() {
    let mut checkout = Checkout::new();
    checkout.address.token = String::new();
    checkout.address.postal_code = "kkk-kkkk".to_string();
    checkout.address.phone = "080-0808-0808".to_string();

    assert_eq!(
        checkout.full_messages(),
        vec![
            "Token can't be blank",
            "Postal code input correctly",
            "Phone number input correctly",
        ]
    );
    assert_eq!(
        checkout.place().unwrap_err(),
        CheckoutError::InvalidAddress(vec![
            FieldError::new(AddressField::Token, ErrorKind::RequiredFieldMissing),
            FieldError::new(AddressField::PostalCode, ErrorKind::InvalidFormat),
            FieldError::new(AddressField::Phone, ErrorKind::InvalidFormat),
        ])
    );
}

#[test]
fn form_payload_round_trips_through_json() {
    let checkout = Checkout::new();
    let json = serde_json::to_string(&checkout.address).unwrap();
    let parsed: OrderAddress = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, checkout.address);
}

#[test]
fn unreadable_prefecture_is_reported_with_the_other_errors() {
    let item_id = ItemId::new();
    let user_id = UserId::new();
    let json = format!(
        r#"{{"item_id": "{item_id}", "user_id": "{user_id}", "prefecture_id": "abc", "phone": "080-1"}}"#
    );

    let address: OrderAddress = serde_json::from_str(&json).unwrap();
    assert_eq!(address.prefecture_id, None);

    let result = AddressValidator::japan().validate(&address);
    assert_eq!(
        result.errors_for(AddressField::PrefectureId).copied().collect::<Vec<_>>(),
        vec![FieldError::new(AddressField::PrefectureId, ErrorKind::RequiredFieldMissing)]
    );
    assert_eq!(
        result.errors_for(AddressField::Phone).copied().collect::<Vec<_>>(),
        vec![FieldError::new(AddressField::Phone, ErrorKind::InvalidFormat)]
    );
    assert_eq!(
        MessageCatalog::new().full_messages(&result),
        vec![
            "Token can't be blank",
            "Postal code can't be blank",
            "Prefecture Select",
            "City can't be blank",
            "Number can't be blank",
            "Phone number input correctly",
        ]
    );
}
