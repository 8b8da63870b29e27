//! Participant repository
//!
//! Participants are created and edited through forms and never deleted.

use sqlx::{FromRow, PgConnection};

use super::DbError;
use crate::db::query::{self, SqlParam};
use crate::models::NewParticipant;

/// Participant record
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Participant {
    pub id: i32,
    pub name: String,
    pub contact_info: Option<String>,
    pub notes: Option<String>,
}

/// Id and name, for `<select>` options and report rows
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ParticipantRef {
    pub id: i32,
    pub name: String,
}

const LIST: &str = r#"
    SELECT id, name, contact_info, notes
    FROM participants
    ORDER BY LOWER(name), id
"#;

const OPTIONS: &str = "SELECT id, name FROM participants ORDER BY LOWER(name), id";

const GET: &str = "SELECT id, name, contact_info, notes FROM participants WHERE id = $1";

const INSERT: &str = r#"
    INSERT INTO participants (name, contact_info, notes)
    VALUES ($1, $2, $3)
    RETURNING id
"#;

const UPDATE: &str = r#"
    UPDATE participants
    SET name = $1, contact_info = $2, notes = $3
    WHERE id = $4
    RETURNING id
"#;

/// Participant repository
pub struct ParticipantRepo<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> ParticipantRepo<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// All participants, case-insensitive alphabetical.
    pub async fn list(&mut self) -> Result<Vec<Participant>, DbError> {
        query::fetch_all(&mut *self.conn, LIST, &[]).await
    }

    /// Ids and names for seller/buyer pickers.
    pub async fn options(&mut self) -> Result<Vec<ParticipantRef>, DbError> {
        query::fetch_all(&mut *self.conn, OPTIONS, &[]).await
    }

    pub async fn get(&mut self, id: i32) -> Result<Participant, DbError> {
        query::fetch_one(&mut *self.conn, GET, &[SqlParam::Int(id)])
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "participant",
                id: id.to_string(),
            })
    }

    /// Insert a participant, returning its id.
    pub async fn create(&mut self, p: &NewParticipant) -> Result<i32, DbError> {
        let id = query::execute(&mut *self.conn, INSERT, &participant_params(p)).await?;
        tracing::debug!(id, name = %p.name, "participant created");
        Ok(id)
    }

    /// Overwrite name, contact info and notes.
    pub async fn update(&mut self, id: i32, p: &NewParticipant) -> Result<(), DbError> {
        let mut params = participant_params(p);
        params.push(SqlParam::Int(id));

        let updated = query::execute(&mut *self.conn, UPDATE, &params).await?;
        if updated == 0 {
            return Err(DbError::NotFound {
                resource: "participant",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn participant_params(p: &NewParticipant) -> Vec<SqlParam> {
    vec![
        SqlParam::from(p.name.clone()),
        SqlParam::from(p.contact_info.clone()),
        SqlParam::from(p.notes.clone()),
    ]
}
