//! Product record as entered on the device and as accepted by the remote table.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{DomainError, DomainResult};
use crate::numeric::{parse_float_prefix, parse_int_prefix};

/// Price stored when the submitted price does not parse.
pub const DEFAULT_PRICE: f64 = 0.0;

/// Quantity stored when the submitted quantity is absent or does not parse.
pub const DEFAULT_QUANTITY: i64 = 1;

/// A product as the user typed it.
///
/// All fields are kept as text; numeric coercion happens on the remote side.
/// This is also the exact JSON body of a save request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub barcode: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: String,
    #[serde(default)]
    pub quantity: String,
}

impl Product {
    pub fn new(barcode: impl Into<String>, name: impl Into<String>, price: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            name: name.into(),
            price: price.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }
}

/// A save request after remote-side coercion, ready to become a table row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSubmission {
    pub barcode: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub quantity: i64,
}

impl ProductSubmission {
    /// Parse a raw request body.
    pub fn from_body(body: &[u8]) -> DomainResult<Self> {
        let payload: Value = serde_json::from_slice(body)?;
        Self::from_payload(&payload)
    }

    /// Accept a loosely-typed payload.
    ///
    /// `barcode`, `name` and `price` must be present and truthy (a missing
    /// key, `null`, `""`, `0` and `false` all count as missing). Price falls
    /// back to [`DEFAULT_PRICE`] when it is not a finite non-negative number;
    /// quantity falls back to [`DEFAULT_QUANTITY`] when it is absent,
    /// unparsable or zero.
    pub fn from_payload(payload: &Value) -> DomainResult<Self> {
        let required = |key: &str| payload.get(key).filter(|v| is_truthy(v));

        let (Some(barcode), Some(name), Some(price)) =
            (required("barcode"), required("name"), required("price"))
        else {
            return Err(DomainError::MissingRequiredFields);
        };

        let description = payload
            .get("description")
            .filter(|v| is_truthy(v))
            .map(value_text)
            .unwrap_or_default();

        Ok(Self {
            barcode: value_text(barcode),
            name: value_text(name),
            description,
            price: coerce_price(price),
            quantity: payload
                .get("quantity")
                .map(coerce_quantity)
                .unwrap_or(DEFAULT_QUANTITY),
        })
    }
}

fn coerce_price(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        other => parse_float_prefix(&value_text(other)),
    };

    match parsed {
        Some(price) if price.is_finite() && price >= 0.0 => price,
        _ => DEFAULT_PRICE,
    }
}

fn coerce_quantity(value: &Value) -> i64 {
    match parse_int_prefix(&value_text(value)) {
        Some(0) | None => DEFAULT_QUANTITY,
        Some(quantity) => quantity,
    }
}

/// Truthiness as the spreadsheet script sees a JSON value.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Text form of a JSON value as it would land in a cell.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
