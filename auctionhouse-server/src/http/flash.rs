//! Flash messages carried across a redirect
//!
//! The message rides on the redirect target's query string
//! (`?flash=...&level=...`) and is shown once by the page that receives it.

use axum::response::Redirect;
use serde::Deserialize;

/// Message severity, used as the CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Warning,
    Danger,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "success" => Some(Self::Success),
            "warning" => Some(Self::Warning),
            "danger" => Some(Self::Danger),
            _ => None,
        }
    }
}

/// A user-visible message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: Level::Danger,
            message: message.into(),
        }
    }
}

/// `?flash=&level=` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlashParams {
    pub flash: Option<String>,
    pub level: Option<String>,
}

impl FlashParams {
    /// Messages to render on this page (zero or one). Unknown levels show as
    /// info-less warnings rather than being dropped.
    pub fn into_flashes(self) -> Vec<Flash> {
        let Some(message) = self.flash.filter(|m| !m.trim().is_empty()) else {
            return Vec::new();
        };
        let level = self
            .level
            .as_deref()
            .and_then(Level::parse)
            .unwrap_or(Level::Warning);
        vec![Flash { level, message }]
    }
}

/// Target URL with the flash appended to its query string.
pub fn location(to: &str, flash: &Flash) -> String {
    let sep = if to.contains('?') { '&' } else { '?' };
    format!(
        "{to}{sep}flash={}&level={}",
        urlencoding::encode(&flash.message),
        flash.level.as_str()
    )
}

/// 303 See Other to `to`, carrying `flash`.
pub fn redirect(to: &str, flash: Flash) -> Redirect {
    Redirect::to(&location(to, &flash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;

    #[test]
    fn location_encodes_message() {
        let url = location("/sales/add", &Flash::danger("Item already sold & gone"));
        assert_eq!(
            url,
            "/sales/add?flash=Item%20already%20sold%20%26%20gone&level=danger"
        );
    }

    #[test]
    fn location_appends_to_existing_query() {
        let url = location("/auctions?location=Kazan", &Flash::success("ok"));
        assert_eq!(url, "/auctions?location=Kazan&flash=ok&level=success");
    }

    #[test]
    fn redirect_is_see_other() {
        let response = redirect("/participants", Flash::success("Saved")).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/participants?flash=Saved&level=success"
        );
    }

    #[test]
    fn params_round_trip() {
        let params = FlashParams {
            flash: Some("Auction added".into()),
            level: Some("success".into()),
        };
        assert_eq!(params.into_flashes(), vec![Flash::success("Auction added")]);
    }

    #[test]
    fn params_without_message() {
        assert!(FlashParams::default().into_flashes().is_empty());

        let params = FlashParams {
            flash: Some("Careful".into()),
            level: Some("bogus".into()),
        };
        assert_eq!(params.into_flashes()[0].level, Level::Warning);
    }
}
