//! JSON split request handling
//!
//! A request file carries the receipt as upstream extraction produced it
//! (decimal amounts, optional fields) together with the group, the item
//! assignments and optional allocation options:
//!
//! ```json
//! {
//!   "receipt": { "items": [{ "id": "1", "name": "Pizza", "unit_price": "20.00" }],
//!                "tax": "4.50", "total": "24.50" },
//!   "group": { "people": [{ "id": "alice", "name": "Alice" }] },
//!   "assignments": [{ "item_id": "1", "shares": [{ "person_id": "alice", "mode": "even" }] }],
//!   "options": { "tax_mode": "proportional" }
//! }
//! ```
//!
//! Records are deserialized first and converted into domain types
//! afterwards, so amount errors name the offending field.

use crate::types::{
    to_cents, Assignment, Cents, Group, Item, Receipt, Share, Split, SplitError, SplitOptions,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Line item as supplied upstream
///
/// The quantity is read as a decimal so that `3.0` is accepted; it must
/// still be a whole number of units.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ItemRecord {
    pub id: String,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

/// Receipt as supplied upstream
///
/// Unknown fields (confidence scores, raw OCR text, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReceiptRecord {
    pub merchant_name: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub items: Vec<ItemRecord>,
    pub subtotal: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub tip: Option<Decimal>,
    #[serde(alias = "discount")]
    pub discount_total: Option<Decimal>,
    pub service_fee: Option<Decimal>,
    pub total: Decimal,
}

/// Top-level request document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RequestRecord {
    pub receipt: ReceiptRecord,
    pub group: Group,
    pub assignments: Vec<AssignmentRecord>,
    #[serde(default)]
    pub options: SplitOptions,
}

/// Assignment as supplied upstream
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AssignmentRecord {
    pub item_id: String,
    pub shares: Vec<ShareRecord>,
}

/// Share as supplied upstream
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShareRecord {
    pub person_id: String,
    #[serde(flatten)]
    pub split: SplitRecord,
}

/// Split parameters as supplied upstream, tagged by `mode`
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SplitRecord {
    Even,
    Quantity { quantity: Decimal },
    Fraction { weight: Decimal },
}

/// A request converted into engine inputs
#[derive(Debug, Clone, PartialEq)]
pub struct SplitRequest {
    pub receipt: Receipt,
    pub group: Group,
    pub assignments: Vec<Assignment>,
    pub options: SplitOptions,
}

fn default_quantity() -> Decimal {
    Decimal::ONE
}

fn default_currency() -> String {
    "USD".to_string()
}

/// Convert a request record into engine inputs
///
/// Every decimal amount is converted exactly to cents. The discount is
/// normalised to its magnitude, since receipts usually print it negative.
///
/// # Errors
///
/// Returns `InvalidAmount` if any amount has sub-cent precision or is out
/// of range, or if a quantity is not a whole number of units.
pub fn convert_request(record: RequestRecord) -> Result<SplitRequest, SplitError> {
    let receipt_record = record.receipt;

    let items = receipt_record
        .items
        .into_iter()
        .map(convert_item)
        .collect::<Result<Vec<_>, _>>()?;

    let receipt = Receipt {
        merchant_name: receipt_record.merchant_name,
        currency: receipt_record.currency,
        items,
        subtotal: optional_cents(receipt_record.subtotal, "receipt.subtotal")?,
        tax: amount_or_zero(receipt_record.tax, "receipt.tax")?,
        tip: amount_or_zero(receipt_record.tip, "receipt.tip")?,
        discount: amount_or_zero(
            receipt_record.discount_total.map(|d| d.abs()),
            "receipt.discount_total",
        )?,
        service_fee: amount_or_zero(receipt_record.service_fee, "receipt.service_fee")?,
        total: to_cents(receipt_record.total, "receipt.total")?,
    };

    let assignments = record
        .assignments
        .into_iter()
        .map(convert_assignment)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SplitRequest {
        receipt,
        group: record.group,
        assignments,
        options: record.options,
    })
}

fn convert_item(record: ItemRecord) -> Result<Item, SplitError> {
    let unit_price =
        optional_cents(record.unit_price, &format!("items[{}].unit_price", record.id))?;
    let total_price =
        optional_cents(record.total_price, &format!("items[{}].total_price", record.id))?;
    let quantity = to_quantity(record.quantity, &format!("items[{}].quantity", record.id))?;

    Ok(Item {
        id: record.id,
        name: record.name,
        unit_price,
        quantity,
        total_price,
    })
}

fn convert_assignment(record: AssignmentRecord) -> Result<Assignment, SplitError> {
    let shares = record
        .shares
        .into_iter()
        .map(|share| {
            let split = match share.split {
                SplitRecord::Even => Split::Even,
                SplitRecord::Quantity { quantity } => {
                    let field = format!(
                        "assignments[{}].shares[{}].quantity",
                        record.item_id, share.person_id
                    );
                    Split::Quantity {
                        quantity: to_quantity(quantity, &field)?,
                    }
                }
                SplitRecord::Fraction { weight } => Split::Fraction { weight },
            };
            Ok(Share {
                person_id: share.person_id,
                split,
            })
        })
        .collect::<Result<Vec<_>, SplitError>>()?;

    Ok(Assignment {
        item_id: record.item_id,
        shares,
    })
}

/// Convert a decimal quantity into whole units
///
/// `3.0` is three units. A fractional or negative quantity is rejected.
fn to_quantity(value: Decimal, field: &str) -> Result<u32, SplitError> {
    if !value.fract().is_zero() {
        return Err(SplitError::invalid_amount(field, &value.to_string()));
    }

    value
        .to_u32()
        .ok_or_else(|| SplitError::invalid_amount(field, &value.to_string()))
}

fn optional_cents(value: Option<Decimal>, field: &str) -> Result<Option<Cents>, SplitError> {
    value.map(|v| to_cents(v, field)).transpose()
}

fn amount_or_zero(value: Option<Decimal>, field: &str) -> Result<Cents, SplitError> {
    Ok(optional_cents(value, field)?.unwrap_or(0))
}

/// Parse a split request from any reader
pub fn parse_split_request<R: Read>(reader: R) -> Result<SplitRequest, SplitError> {
    let record: RequestRecord = serde_json::from_reader(reader)?;
    convert_request(record)
}

/// Read and convert a split request file
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist (`FileNotFound`)
/// - The file cannot be read or is not a valid request (`IoError`, `ParseError`)
/// - An amount cannot be converted to cents (`InvalidAmount`)
pub fn read_split_request(path: &Path) -> Result<SplitRequest, SplitError> {
    if !path.exists() {
        return Err(SplitError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = File::open(path)?;
    parse_split_request(BufReader::new(file))
}
