//! Repository implementations for database access
//!
//! Each repository borrows one connection (a pooled connection or an open
//! transaction) and follows these patterns:
//! - Reports use JOINs and GROUP BY in a single statement (no N+1)
//! - Uniqueness is enforced by constraints and surfaced as `DbError::Conflict`
//! - Callers own the transaction boundary

use sqlx::error::ErrorKind;

pub mod auctions;
pub mod items;
pub mod participants;
pub mod reports;
pub mod sales;

pub use auctions::{Auction, AuctionRef, AuctionRepo, DeletedAuction};
pub use items::{ItemRepo, UnsoldItem};
pub use participants::{Participant, ParticipantRef, ParticipantRepo};
pub use reports::{AuctionRevenue, BuyerCount, DashboardTotals, ReportRepo, SellerTotal, SoldItem};
pub use sales::{SaleOutcome, SaleRepo};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Unique constraint rejected the write
    #[error("conflict: {constraint}")]
    Conflict { constraint: String },

    /// Foreign-key, check or not-null constraint rejected the write
    #[error("integrity violation: {constraint}")]
    Integrity { constraint: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &e {
            let constraint = db.constraint().unwrap_or("unknown").to_owned();
            match db.kind() {
                ErrorKind::UniqueViolation => return Self::Conflict { constraint },
                ErrorKind::ForeignKeyViolation
                | ErrorKind::CheckViolation
                | ErrorKind::NotNullViolation => return Self::Integrity { constraint },
                _ => {}
            }
        }
        Self::Sqlx(e)
    }
}

impl DbError {
    pub fn is_conflict_on(&self, name: &str) -> bool {
        matches!(self, Self::Conflict { constraint } if constraint == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_errors_stay_sqlx() {
        let err = DbError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, DbError::Sqlx(_)));
    }

    #[test]
    fn conflict_matching() {
        let err = DbError::Conflict {
            constraint: "items_lot_unique".into(),
        };
        assert!(err.is_conflict_on("items_lot_unique"));
        assert!(!err.is_conflict_on("sales_item_unique"));
    }

    #[test]
    fn not_found_display() {
        let err = DbError::NotFound {
            resource: "participant",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "not found: participant '42'");
    }
}
