//! Demo dataset
//!
//! Wipes all four tables and inserts a fixed set of participants, auctions,
//! lots and sales. Dates are relative to `now` so the dashboard and the
//! default 30-day reports always have something to show. Demo and test use
//! only.

use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDateTime, NaiveTime};
use sqlx::{Connection, PgConnection};

use super::query::{self, SqlParam};
use super::repos::DbError;

/// Children before parents
const WIPE: [&str; 4] = [
    "DELETE FROM sales",
    "DELETE FROM items",
    "DELETE FROM auctions",
    "DELETE FROM participants",
];

const INSERT_PARTICIPANT: &str = r#"
    INSERT INTO participants (name, contact_info, notes)
    VALUES ($1, $2, $3)
    RETURNING id
"#;

const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions (name, location, starts_at, description)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

const INSERT_ITEM: &str = r#"
    INSERT INTO items (auction_id, seller_id, lot_number, title, start_price, description)
    VALUES ($1, $2, $3, $4, $5, $6)
    RETURNING id
"#;

const INSERT_SALE: &str = r#"
    INSERT INTO sales (item_id, buyer_id, sold_price, sold_at)
    VALUES ($1, $2, $3, $4)
"#;

/// (name, contact, notes)
const PARTICIPANTS: [(&str, &str, Option<&str>); 6] = [
    ("Antique Group", "info@antique-group.example", Some("Regular consignor")),
    ("Sapphire Gallery", "sapphire@example", Some("Large gallery")),
    ("Ivan Orlov", "+7 900 123 45 67", Some("Private collector")),
    ("Elena Veres", "+7 921 555 11 44", Some("Painting specialist")),
    ("Artline Studio", "contact@artline.example", None),
    ("Alexei Nesterov", "+7 981 777 22 33", Some("Investor buyer")),
];

/// (name, location, days from today, description)
const AUCTIONS: [(&str, &str, i64, &str); 4] = [
    ("Spring Salon", "Moscow", 3, "19th-20th century painting"),
    ("Summer Sale", "Saint Petersburg", 30, "European porcelain"),
    ("Contemporary Art Evening", "Moscow", -15, "Contemporary artists"),
    ("Silver Collection", "Kazan", 45, "18th-19th century table silver"),
];

/// (auction, seller, lot, title, start price, description)
const ITEMS: [(&str, &str, &str, &str, i64, &str); 8] = [
    (
        "Spring Salon",
        "Antique Group",
        "101",
        "Landscape \"Morning in the Mountains\"",
        250_000,
        "Oil on canvas, 1902",
    ),
    ("Spring Salon", "Ivan Orlov", "102", "Portrait of a Lady", 180_000, "Oil on canvas, 1898"),
    (
        "Summer Sale",
        "Sapphire Gallery",
        "201",
        "Meissen Tea Service",
        320_000,
        "Twelve-piece service",
    ),
    ("Summer Sale", "Artline Studio", "202", "Sevres Vase", 150_000, "Porcelain, gilding"),
    (
        "Contemporary Art Evening",
        "Elena Veres",
        "301",
        "Installation \"City Pulse\"",
        90_000,
        "Mixed media, 2018",
    ),
    (
        "Contemporary Art Evening",
        "Antique Group",
        "302",
        "Graphic \"Contours\"",
        60_000,
        "Ink on paper",
    ),
    ("Silver Collection", "Artline Studio", "401", "Silver Coffee Pot", 210_000, "Russia, 1875"),
    ("Silver Collection", "Antique Group", "402", "Pair of Candlesticks", 170_000, "France, 1860"),
];

/// (item title, buyer, price, days before now)
const SALES: [(&str, &str, i64, i64); 5] = [
    ("Landscape \"Morning in the Mountains\"", "Alexei Nesterov", 315_000, 14),
    ("Portrait of a Lady", "Antique Group", 210_000, 13),
    ("Meissen Tea Service", "Elena Veres", 380_000, 1),
    ("Installation \"City Pulse\"", "Sapphire Gallery", 125_000, 10),
    ("Graphic \"Contours\"", "Ivan Orlov", 95_000, 9),
];

/// Rows written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub participants: usize,
    pub auctions: usize,
    pub items: usize,
    pub sales: usize,
}

/// Wipe the store and load the demo dataset in one transaction.
pub async fn seed(conn: &mut PgConnection, now: NaiveDateTime) -> Result<SeedSummary, DbError> {
    let mut tx = conn.begin().await?;

    for statement in WIPE {
        query::execute(&mut *tx, statement, &[]).await?;
    }

    let mut participants = HashMap::new();
    for (name, contact, notes) in PARTICIPANTS {
        let params = [
            SqlParam::from(name),
            SqlParam::from(contact),
            SqlParam::OptText(notes.map(str::to_owned)),
        ];
        let id = query::execute(&mut *tx, INSERT_PARTICIPANT, &params).await?;
        participants.insert(name, id);
    }

    // Auctions start at 18:00
    let evening = now.date().and_time(NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default());
    let mut auctions = HashMap::new();
    for (name, location, days, description) in AUCTIONS {
        let params = [
            SqlParam::from(name),
            SqlParam::from(location),
            SqlParam::Timestamp(evening + Duration::days(days)),
            SqlParam::from(description),
        ];
        let id = query::execute(&mut *tx, INSERT_AUCTION, &params).await?;
        auctions.insert(name, id);
    }

    let mut items = HashMap::new();
    for (auction, seller, lot, title, price, description) in ITEMS {
        let params = [
            SqlParam::Int(lookup(&auctions, "auction", auction)?),
            SqlParam::Int(lookup(&participants, "participant", seller)?),
            SqlParam::from(lot),
            SqlParam::from(title),
            SqlParam::Numeric(BigDecimal::from(price)),
            SqlParam::from(description),
        ];
        let id = query::execute(&mut *tx, INSERT_ITEM, &params).await?;
        items.insert(title, id);
    }

    let mut sale_rows = Vec::with_capacity(SALES.len());
    for (title, buyer, price, days_ago) in SALES {
        sale_rows.push(vec![
            SqlParam::Int(lookup(&items, "item", title)?),
            SqlParam::Int(lookup(&participants, "participant", buyer)?),
            SqlParam::Numeric(BigDecimal::from(price)),
            SqlParam::Timestamp(now - Duration::days(days_ago)),
        ]);
    }
    query::execute_batch(&mut *tx, INSERT_SALE, &sale_rows).await?;

    tx.commit().await?;

    let summary = SeedSummary {
        participants: PARTICIPANTS.len(),
        auctions: AUCTIONS.len(),
        items: ITEMS.len(),
        sales: SALES.len(),
    };
    tracing::info!(?summary, "demo data loaded");
    Ok(summary)
}

fn lookup(ids: &HashMap<&str, i32>, resource: &'static str, key: &str) -> Result<i32, DbError> {
    ids.get(key).copied().ok_or_else(|| DbError::NotFound {
        resource,
        id: key.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn dataset_references_resolve() {
        let participants: HashSet<_> = PARTICIPANTS.iter().map(|p| p.0).collect();
        let auctions: HashSet<_> = AUCTIONS.iter().map(|a| a.0).collect();
        let titles: HashSet<_> = ITEMS.iter().map(|i| i.3).collect();

        for (auction, seller, ..) in ITEMS {
            assert!(auctions.contains(auction), "unknown auction {auction}");
            assert!(participants.contains(seller), "unknown seller {seller}");
        }
        for (title, buyer, ..) in SALES {
            assert!(titles.contains(title), "unknown item {title}");
            assert!(participants.contains(buyer), "unknown buyer {buyer}");
        }
    }

    #[test]
    fn lots_unique_per_auction_and_one_sale_per_item() {
        let lots: HashSet<_> = ITEMS.iter().map(|i| (i.0, i.2)).collect();
        assert_eq!(lots.len(), ITEMS.len());

        let sold: HashSet<_> = SALES.iter().map(|s| s.0).collect();
        assert_eq!(sold.len(), SALES.len());
    }
}
