//! Item (lot) form input

use bigdecimal::BigDecimal;
use serde::Deserialize;

use super::validation::{optional, parse_id, parse_price, required};
use super::ValidationError;

/// Raw item form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ItemForm {
    pub auction_id: String,
    pub seller_id: String,
    pub lot_number: String,
    pub title: String,
    pub start_price: String,
    pub description: String,
}

/// Validated lot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub auction_id: i32,
    pub seller_id: i32,
    pub lot_number: String,
    pub title: String,
    pub start_price: BigDecimal,
    pub description: Option<String>,
}

impl ItemForm {
    pub fn validate(&self) -> Result<NewItem, ValidationError> {
        Ok(NewItem {
            auction_id: parse_id("auction", &self.auction_id)?,
            seller_id: parse_id("seller", &self.seller_id)?,
            lot_number: required("lot number", &self.lot_number)?,
            title: required("title", &self.title)?,
            start_price: parse_price("start price", &self.start_price)?,
            description: optional(&self.description),
        })
    }
}
