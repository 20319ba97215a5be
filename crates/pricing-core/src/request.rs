//! # Order Requests
//!
//! Untyped orders as they arrive from JSON bodies or command-line text.
//!
//! Fields are kept as raw [`serde_json::Value`]s so that a quantity of
//! `3.4` or a price of `"10.0"` deserializes fine and is then rejected by
//! [`crate::validation`] with the precise [`crate::ArgumentKind`], instead
//! of surfacing as an opaque deserialization error.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// An order whose arguments have not been checked yet.
///
/// ## JSON Shape
/// ```json
/// { "quantity": 12, "unit_price": 212.5, "region_code": "AB" }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Number of items; must be a positive integer.
    #[serde(default)]
    pub quantity: Value,

    /// Price per item; must be a positive number.
    #[serde(default)]
    pub unit_price: Value,

    /// Tax region code; must be present in the tax table.
    #[serde(default)]
    pub region_code: Value,
}

impl OrderRequest {
    pub fn new(
        quantity: impl Into<Value>,
        unit_price: impl Into<Value>,
        region_code: impl Into<Value>,
    ) -> Self {
        OrderRequest {
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            region_code: region_code.into(),
        }
    }

    /// Builds a request from command-line text.
    ///
    /// Each argument is read as a JSON scalar when it parses as one and as
    /// a plain string otherwise, so `12` is an integer, `3.4` a float and
    /// `abc` a string.
    ///
    /// ## Example
    /// ```rust
    /// use pricing_core::OrderRequest;
    /// use serde_json::json;
    ///
    /// let req = OrderRequest::from_text("12", "212.5", "AB");
    /// assert_eq!(req.quantity, json!(12));
    /// assert_eq!(req.unit_price, json!(212.5));
    /// assert_eq!(req.region_code, json!("AB"));
    /// ```
    pub fn from_text(quantity: &str, unit_price: &str, region_code: &str) -> Self {
        OrderRequest {
            quantity: scalar_from_text(quantity),
            unit_price: scalar_from_text(unit_price),
            // Region codes are always text, even "123"
            region_code: Value::String(region_code.to_string()),
        }
    }
}

fn scalar_from_text(text: &str) -> Value {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value @ (Value::Number(_) | Value::Bool(_) | Value::Null | Value::String(_))) => value,
        _ => Value::String(text.to_string()),
    }
}
