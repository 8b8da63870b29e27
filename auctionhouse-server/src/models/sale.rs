//! Sale form input

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::validation::{parse_id, parse_price, parse_timestamp};
use super::ValidationError;

/// Raw sale form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SaleForm {
    pub item_id: String,
    pub buyer_id: String,
    pub sold_price: String,
    pub sold_at: String,
}

/// Validated sale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSale {
    pub item_id: i32,
    pub buyer_id: i32,
    pub sold_price: BigDecimal,
    pub sold_at: NaiveDateTime,
}

impl SaleForm {
    pub fn validate(&self) -> Result<NewSale, ValidationError> {
        Ok(NewSale {
            item_id: parse_id("item", &self.item_id)?,
            buyer_id: parse_id("buyer", &self.buyer_id)?,
            sold_price: parse_price("sold price", &self.sold_price)?,
            sold_at: parse_timestamp("sold at", &self.sold_at)?,
        })
    }
}
