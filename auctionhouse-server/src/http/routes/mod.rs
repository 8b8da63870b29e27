//! Route handlers organized by resource

pub mod auctions;
pub mod dashboard;
pub mod health;
pub mod items;
pub mod participants;
pub mod reports;
pub mod sales;
