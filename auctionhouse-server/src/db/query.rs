//! Query/command primitives
//!
//! Every repository goes through these four calls. Statements are hand-written
//! SQL with `$n` placeholders; parameters are a flat ordered slice of
//! [`SqlParam`]. Each call runs on the executor it is handed, so the same
//! statement auto-commits on a pool and joins the surrounding unit of work on
//! a transaction.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};
use sqlx::postgres::PgRow;
use sqlx::{Connection, Executor, FromRow, PgConnection, Postgres, Row};

use super::repos::DbError;

/// One positional bind parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Int(i32),
    Text(String),
    OptText(Option<String>),
    Numeric(BigDecimal),
    Timestamp(NaiveDateTime),
    Date(NaiveDate),
}

impl From<i32> for SqlParam {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for SqlParam {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Option<String>> for SqlParam {
    fn from(v: Option<String>) -> Self {
        Self::OptText(v)
    }
}

impl From<BigDecimal> for SqlParam {
    fn from(v: BigDecimal) -> Self {
        Self::Numeric(v)
    }
}

impl From<NaiveDateTime> for SqlParam {
    fn from(v: NaiveDateTime) -> Self {
        Self::Timestamp(v)
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

/// Bind `params` in order onto a `query` or `query_as` builder.
macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut query = $query;
        for param in $params {
            query = match param {
                SqlParam::Int(v) => query.bind(*v),
                SqlParam::Text(v) => query.bind(v.clone()),
                SqlParam::OptText(v) => query.bind(v.clone()),
                SqlParam::Numeric(v) => query.bind(v.clone()),
                SqlParam::Timestamp(v) => query.bind(*v),
                SqlParam::Date(v) => query.bind(*v),
            };
        }
        query
    }};
}

/// Run a read query and decode every row.
///
/// Order follows the statement's `ORDER BY`; nothing else is implied.
pub async fn fetch_all<'c, E, T>(
    executor: E,
    statement: &str,
    params: &[SqlParam],
) -> Result<Vec<T>, DbError>
where
    E: Executor<'c, Database = Postgres>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = bind_params!(sqlx::query_as::<_, T>(statement), params);
    Ok(query.fetch_all(executor).await?)
}

/// Run a read query and decode the first row, `None` when there is none.
pub async fn fetch_one<'c, E, T>(
    executor: E,
    statement: &str,
    params: &[SqlParam],
) -> Result<Option<T>, DbError>
where
    E: Executor<'c, Database = Postgres>,
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let query = bind_params!(sqlx::query_as::<_, T>(statement), params);
    Ok(query.fetch_optional(executor).await?)
}

/// Run a mutating statement.
///
/// Returns the `id` column of the first returned row when the statement has a
/// `RETURNING id` clause, otherwise 0.
pub async fn execute<'c, E>(
    executor: E,
    statement: &str,
    params: &[SqlParam],
) -> Result<i32, DbError>
where
    E: Executor<'c, Database = Postgres>,
{
    let query = bind_params!(sqlx::query(statement), params);
    let row = query.fetch_optional(executor).await?;
    Ok(row.and_then(|r| r.try_get::<i32, _>("id").ok()).unwrap_or(0))
}

/// Apply one statement to many parameter tuples, all or nothing.
///
/// Nested inside an open transaction this becomes a savepoint.
pub async fn execute_batch(
    conn: &mut PgConnection,
    statement: &str,
    rows: &[Vec<SqlParam>],
) -> Result<(), DbError> {
    let mut tx = conn.begin().await?;
    for params in rows {
        bind_params!(sqlx::query(statement), params)
            .execute(&mut *tx)
            .await?;
    }
    tx.commit().await?;
    Ok(())
}
