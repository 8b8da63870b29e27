//! Auction form input and list filter

use chrono::NaiveDateTime;
use serde::Deserialize;

use super::period::{Period, PeriodParams};
use super::validation::{optional, parse_timestamp, required};
use super::ValidationError;

/// Raw auction form
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuctionForm {
    pub name: String,
    pub location: String,
    pub starts_at: String,
    pub description: String,
}

/// Validated auction fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAuction {
    pub name: String,
    pub location: String,
    pub starts_at: NaiveDateTime,
    pub description: Option<String>,
}

impl AuctionForm {
    pub fn validate(&self) -> Result<NewAuction, ValidationError> {
        Ok(NewAuction {
            name: required("name", &self.name)?,
            location: required("location", &self.location)?,
            starts_at: parse_timestamp("starts at", &self.starts_at)?,
            description: optional(&self.description),
        })
    }
}

/// `GET /auctions` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuctionListParams {
    pub start: Option<String>,
    pub end: Option<String>,
    pub location: Option<String>,
}

impl AuctionListParams {
    pub fn period_params(&self) -> PeriodParams {
        PeriodParams {
            start: self.start.clone(),
            end: self.end.clone(),
        }
    }
}

/// Auction list filter: start-date period plus optional exact location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuctionFilter {
    pub period: Period,
    pub location: Option<String>,
}

impl AuctionFilter {
    pub fn resolve(
        params: &AuctionListParams,
        today: chrono::NaiveDate,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            period: Period::resolve(&params.period_params(), today)?,
            location: params.location.as_deref().and_then(optional),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn requires_name_location_and_start() {
        let mut form = AuctionForm {
            name: "Spring".into(),
            location: "Moscow".into(),
            starts_at: "".into(),
            description: "".into(),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Empty { field: "starts at" }
        );

        form.starts_at = "2024-05-01T18:00".into();
        let auction = form.validate().unwrap();
        assert_eq!(auction.name, "Spring");
        assert_eq!(auction.description, None);

        form.location = " ".into();
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Empty { field: "location" }
        );
    }

    #[test]
    fn blank_location_is_no_filter() {
        let params = AuctionListParams {
            location: Some("".into()),
            ..Default::default()
        };
        let today = NaiveDate::from_ymd_opt(2024, 5, 31).unwrap();
        let filter = AuctionFilter::resolve(&params, today).unwrap();
        assert_eq!(filter.location, None);
        assert_eq!(filter.period.end, today);
    }
}
