//! Payload validation for inserts and updates.
//!
//! Both entry points stop at the first failing field. The two paths check
//! fields in different orders:
//!
//! - insert: name, seller, category, quantity, price, availability
//! - update: name, seller, category, price, availability, quantity
//!
//! The orders decide which reason a payload with several bad fields reports,
//! so they are kept as separate sequences.

use crate::types::{Category, Column, Payload, StockStatus, Value};
use std::fmt;
use thiserror::Error;

/// Domain field named in a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Seller,
    Category,
    Quantity,
    Price,
    Availability,
}

impl Field {
    pub fn column(&self) -> Column {
        match self {
            Field::Name => Column::Name,
            Field::Seller => Column::Seller,
            Field::Category => Column::Category,
            Field::Quantity => Column::Quantity,
            Field::Price => Column::Price,
            Field::Availability => Column::InStock,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Name => "Name",
            Field::Seller => "Seller",
            Field::Category => "Category",
            Field::Quantity => "Quantity",
            Field::Price => "Price",
            Field::Availability => "Availability",
        })
    }
}

/// Why a payload was refused
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("Missing {0}")]
    Missing(Field),

    #[error("Invalid {0}")]
    Invalid(Field),

    #[error("Nothing to update")]
    Empty,

    #[error("Item id is assigned by the store")]
    IdNotWritable,
}

impl Rejection {
    /// The field at fault, if the rejection names one
    pub fn field(&self) -> Option<Field> {
        match self {
            Rejection::Missing(f) | Rejection::Invalid(f) => Some(*f),
            Rejection::Empty | Rejection::IdNotWritable => None,
        }
    }
}

type Check = fn(&Value) -> bool;

const INSERT_ORDER: [(Field, Check); 6] = [
    (Field::Name, non_empty_text),
    (Field::Seller, non_empty_text),
    (Field::Category, known_category),
    (Field::Quantity, non_negative),
    (Field::Price, non_negative),
    (Field::Availability, known_availability),
];

const UPDATE_ORDER: [(Field, Check); 6] = [
    (Field::Name, non_empty_text),
    (Field::Seller, non_empty_text),
    (Field::Category, known_category),
    (Field::Price, non_negative),
    (Field::Availability, known_availability),
    (Field::Quantity, non_negative),
];

/// Every domain field must be present and valid.
pub fn validate_for_insert(payload: &Payload) -> Result<(), Rejection> {
    if payload.contains(Column::Id) {
        return Err(Rejection::IdNotWritable);
    }

    for (field, check) in INSERT_ORDER {
        let value = payload
            .get(field.column())
            .ok_or(Rejection::Missing(field))?;
        if !check(value) {
            return Err(Rejection::Invalid(field));
        }
    }
    Ok(())
}

/// At least one field, and every present field valid. Absent fields are untouched.
pub fn validate_for_update(payload: &Payload) -> Result<(), Rejection> {
    if payload.is_empty() {
        return Err(Rejection::Empty);
    }
    if payload.contains(Column::Id) {
        return Err(Rejection::IdNotWritable);
    }

    for (field, check) in UPDATE_ORDER {
        if let Some(value) = payload.get(field.column()) {
            if !check(value) {
                return Err(Rejection::Invalid(field));
            }
        }
    }
    Ok(())
}

fn non_empty_text(value: &Value) -> bool {
    value.as_str().is_some_and(|s| !s.is_empty())
}

fn known_category(value: &Value) -> bool {
    value.as_i64().and_then(Category::from_code).is_some()
}

fn non_negative(value: &Value) -> bool {
    value.as_i64().is_some_and(|v| v >= 0)
}

fn known_availability(value: &Value) -> bool {
    value.as_i64().and_then(StockStatus::from_code).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pen() -> Payload {
        Payload::new()
            .with_name("Pen")
            .with_category(Category::Other)
            .with_price(10)
            .with_quantity(5)
            .with_seller("Acme")
            .with_stock(StockStatus::Available)
    }

    #[test]
    fn test_insert_accepts_full_payload() {
        assert_eq!(validate_for_insert(&pen()), Ok(()));
    }

    #[test]
    fn test_insert_name_missing_or_empty() {
        let mut missing = pen();
        missing.remove(Column::Name);
        assert_eq!(
            validate_for_insert(&missing),
            Err(Rejection::Missing(Field::Name))
        );

        let empty = pen().with_name("");
        assert_eq!(
            validate_for_insert(&empty),
            Err(Rejection::Invalid(Field::Name))
        );

        let null = pen().with(Column::Name, Value::Null);
        assert_eq!(validate_for_insert(&null), Err(Rejection::Invalid(Field::Name)));
    }

    #[test]
    fn test_insert_each_missing_field_is_distinct() {
        for column in [
            Column::Name,
            Column::Seller,
            Column::Category,
            Column::Quantity,
            Column::Price,
            Column::InStock,
        ] {
            let mut payload = pen();
            payload.remove(column);
            let rejection = validate_for_insert(&payload).unwrap_err();
            assert_eq!(rejection.field().map(|f| f.column()), Some(column));
            assert!(matches!(rejection, Rejection::Missing(_)));
        }
    }

    #[test]
    fn test_category_outside_set_rejected_on_both_paths() {
        for code in [-1, 9, 100, i64::MIN, i64::MAX] {
            let insert = pen().with(Column::Category, code);
            assert_eq!(
                validate_for_insert(&insert),
                Err(Rejection::Invalid(Field::Category))
            );

            let update = Payload::new().with(Column::Category, code);
            assert_eq!(
                validate_for_update(&update),
                Err(Rejection::Invalid(Field::Category))
            );
        }
    }

    #[test]
    fn test_wrong_value_types_are_invalid() {
        let payload = pen().with(Column::Price, "ten");
        assert_eq!(
            validate_for_insert(&payload),
            Err(Rejection::Invalid(Field::Price))
        );

        let payload = pen().with(Column::Seller, 7);
        assert_eq!(
            validate_for_insert(&payload),
            Err(Rejection::Invalid(Field::Seller))
        );
    }

    #[test]
    fn test_insert_order_quantity_before_price() {
        let payload = pen().with_quantity(-1).with_price(-1);
        assert_eq!(
            validate_for_insert(&payload),
            Err(Rejection::Invalid(Field::Quantity))
        );
    }

    #[test]
    fn test_update_order_price_before_quantity() {
        let payload = Payload::new().with_quantity(-1).with_price(-1);
        assert_eq!(
            validate_for_update(&payload),
            Err(Rejection::Invalid(Field::Price))
        );

        let payload = Payload::new()
            .with_quantity(-1)
            .with(Column::InStock, 2);
        assert_eq!(
            validate_for_update(&payload),
            Err(Rejection::Invalid(Field::Availability))
        );
    }

    #[test]
    fn test_update_empty_rejected() {
        assert_eq!(validate_for_update(&Payload::new()), Err(Rejection::Empty));
    }

    #[test]
    fn test_update_checks_only_present_fields() {
        assert_eq!(validate_for_update(&Payload::new().with_quantity(0)), Ok(()));
        assert_eq!(
            validate_for_update(&Payload::new().with_seller("")),
            Err(Rejection::Invalid(Field::Seller))
        );
    }

    #[test]
    fn test_id_is_not_writable() {
        let insert = pen().with(Column::Id, 3);
        assert_eq!(validate_for_insert(&insert), Err(Rejection::IdNotWritable));

        let update = Payload::new().with(Column::Id, 3);
        assert_eq!(validate_for_update(&update), Err(Rejection::IdNotWritable));
    }

    #[test]
    fn test_reason_text() {
        assert_eq!(Rejection::Invalid(Field::Name).to_string(), "Invalid Name");
        assert_eq!(
            Rejection::Invalid(Field::Availability).to_string(),
            "Invalid Availability"
        );
        assert_eq!(Rejection::Missing(Field::Price).to_string(), "Missing Price");
    }
}
