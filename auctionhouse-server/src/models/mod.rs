//! Form input models with validation at construction
//!
//! Raw form structs deserialize every field as a string; `validate()` turns
//! them into typed records or returns a `ValidationError`. Nothing is written
//! before validation succeeds.

pub mod auction;
pub mod item;
pub mod participant;
pub mod period;
pub mod sale;
pub mod validation;

pub use auction::{AuctionFilter, AuctionForm, AuctionListParams, NewAuction};
pub use item::{ItemForm, NewItem};
pub use participant::{NewParticipant, ParticipantForm};
pub use period::{Period, PeriodParams, DEFAULT_PERIOD_DAYS};
pub use sale::{NewSale, SaleForm};
pub use validation::ValidationError;
