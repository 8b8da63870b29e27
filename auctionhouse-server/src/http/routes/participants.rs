//! Participant list, create and edit

use std::sync::Arc;

use axum::extract::{Form, Query};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{routing::get, Router};
use sqlx::Connection;

use crate::db::repos::{DbError, Participant, ParticipantRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{DbConn, ValidId};
use crate::http::flash::{self, Flash, FlashParams};
use crate::http::render::{self, escape};
use crate::http::server::AppState;
use crate::models::ParticipantForm;

const LIST_PATH: &str = "/participants";

fn edit_path(id: i32) -> String {
    format!("{LIST_PATH}/{id}/edit")
}

fn participant_fields(p: Option<&Participant>) -> String {
    let name = p.map(|p| p.name.as_str()).unwrap_or("");
    let contact = p.and_then(|p| p.contact_info.as_deref()).unwrap_or("");
    let notes = p.and_then(|p| p.notes.as_deref()).unwrap_or("");
    [
        render::input("Name", "name", "text", name, true),
        render::input("Contact", "contact_info", "text", contact, false),
        render::textarea("Notes", "notes", notes),
    ]
    .concat()
}

fn unknown(id: i32) -> Redirect {
    flash::redirect(
        LIST_PATH,
        Flash::warning(format!("Participant {id} does not exist")),
    )
}

/// GET /participants
async fn list_participants(
    DbConn(mut conn): DbConn,
    Query(flash): Query<FlashParams>,
) -> Result<Html<String>, ApiError> {
    let participants = ParticipantRepo::new(&mut *conn).list().await?;

    let rows: Vec<Vec<String>> = participants
        .iter()
        .map(|p| {
            vec![
                escape(&p.name),
                escape(p.contact_info.as_deref().unwrap_or("")),
                escape(p.notes.as_deref().unwrap_or("")),
                format!("<a href=\"{}\">Edit</a>", edit_path(p.id)),
            ]
        })
        .collect();

    let body = format!(
        "{}<h2>New participant</h2>{}",
        render::table(&["Name", "Contact", "Notes", ""], &rows, "No participants yet."),
        render::post_form(LIST_PATH, &participant_fields(None), "Add"),
    );
    Ok(render::page("Participants", &flash.into_flashes(), &body))
}

/// POST /participants
async fn create_participant(
    DbConn(mut conn): DbConn,
    Form(form): Form<ParticipantForm>,
) -> Result<Redirect, ApiError> {
    let participant = form.validate().map_err(ApiError::form(LIST_PATH))?;

    let mut tx = conn.begin().await?;
    let id = ParticipantRepo::new(&mut *tx).create(&participant).await?;
    tx.commit().await?;

    tracing::info!(id, name = %participant.name, "participant created");
    Ok(flash::redirect(
        LIST_PATH,
        Flash::success(format!("Participant \"{}\" added", participant.name)),
    ))
}

/// GET /participants/{id}/edit
async fn edit_participant_form(
    DbConn(mut conn): DbConn,
    ValidId(id): ValidId,
    Query(flash): Query<FlashParams>,
) -> Result<Response, ApiError> {
    let participant = match ParticipantRepo::new(&mut *conn).get(id).await {
        Ok(p) => p,
        Err(DbError::NotFound { .. }) => return Ok(unknown(id).into_response()),
        Err(e) => return Err(e.into()),
    };

    let path = edit_path(id);
    let body = render::post_form(&path, &participant_fields(Some(&participant)), "Save");
    let title = format!("Edit {}", participant.name);
    Ok(render::page(&title, &flash.into_flashes(), &body).into_response())
}

/// POST /participants/{id}/edit
async fn update_participant(
    DbConn(mut conn): DbConn,
    ValidId(id): ValidId,
    Form(form): Form<ParticipantForm>,
) -> Result<Redirect, ApiError> {
    let path = edit_path(id);
    let participant = form.validate().map_err(ApiError::form(&path))?;

    let mut tx = conn.begin().await?;
    match ParticipantRepo::new(&mut *tx).update(id, &participant).await {
        Ok(()) => {}
        Err(DbError::NotFound { .. }) => return Ok(unknown(id)),
        Err(e) => return Err(e.into()),
    }
    tx.commit().await?;

    tracing::info!(id, "participant updated");
    Ok(flash::redirect(
        LIST_PATH,
        Flash::success(format!("Participant \"{}\" saved", participant.name)),
    ))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(LIST_PATH, get(list_participants).post(create_participant))
        .route(
            "/participants/{id}/edit",
            get(edit_participant_form).post(update_participant),
        )
}
