//! HTML rendering helpers
//!
//! Pages are assembled with `format!`. Every piece of user-supplied text goes
//! through [`escape`] before it is interpolated; the helpers below take
//! already-escaped cell/field markup unless noted otherwise.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime};

use super::flash::Flash;
use crate::models::Period;

const NAV: &[(&str, &str)] = &[
    ("/", "Dashboard"),
    ("/auctions", "Auctions"),
    ("/participants", "Participants"),
    ("/items/add", "Add lot"),
    ("/sales/add", "Record sale"),
    ("/reports/auction-revenue", "Auction revenue"),
    ("/reports/sold-items", "Sold items"),
    ("/reports/seller-revenue", "Seller revenue"),
    ("/reports/active-buyers", "Active buyers"),
    ("/reports/buyer-counts", "Buyer counts"),
    ("/reports/sellers-participated", "Sellers"),
];

const STYLE: &str = "body{font-family:sans-serif;margin:0 auto;max-width:60rem;padding:1rem}\
nav a{margin-right:.75rem}table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #ddd;padding:.3rem;text-align:left}\
.flash{padding:.5rem;margin:.5rem 0}.success{background:#dfd}.warning{background:#ffd}\
.danger{background:#fdd}label{display:block;margin:.4rem 0}";

/// Escape text for HTML body and attribute context.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Two decimal places.
pub fn money(value: &BigDecimal) -> String {
    value.with_scale(2).to_string()
}

pub fn datetime(ts: &NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

pub fn date(day: &NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

/// Full page with navigation and flash messages. `body` is trusted markup.
pub fn page(title: &str, flashes: &[Flash], body: &str) -> Html<String> {
    let nav: String = NAV
        .iter()
        .map(|(href, label)| format!("<a href=\"{href}\">{label}</a>"))
        .collect();
    let messages: String = flashes
        .iter()
        .map(|f| {
            format!(
                "<div class=\"flash {}\">{}</div>",
                f.level.as_str(),
                escape(&f.message)
            )
        })
        .collect();
    let title = escape(title);

    Html(format!(
        "<!doctype html><html><head><meta charset=\"utf-8\"><title>{title} - Auction House</title>\
<style>{STYLE}</style></head><body><nav>{nav}</nav>{messages}<h1>{title}</h1>{body}</body></html>"
    ))
}

/// Table with a header row; `empty` is shown when there are no rows.
pub fn table(headers: &[&str], rows: &[Vec<String>], empty: &str) -> String {
    if rows.is_empty() {
        return format!("<p>{}</p>", escape(empty));
    }
    let head: String = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row.iter().map(|c| format!("<td>{c}</td>")).collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();
    format!("<table><thead><tr>{head}</tr></thead><tbody>{body}</tbody></table>")
}

/// GET form with start/end date inputs. `extra` is appended before the
/// submit button.
pub fn period_form(action: &str, period: &Period, extra: &str) -> String {
    format!(
        "<form method=\"get\" action=\"{action}\">\
<label>From <input type=\"date\" name=\"start\" value=\"{}\"></label>\
<label>To <input type=\"date\" name=\"end\" value=\"{}\"></label>\
{extra}<button type=\"submit\">Show</button></form>",
        date(&period.start),
        date(&period.end)
    )
}

/// Labelled `<input>`; `value` is raw text.
pub fn input(label: &str, name: &str, kind: &str, value: &str, required: bool) -> String {
    let required = if required { " required" } else { "" };
    format!(
        "<label>{} <input type=\"{kind}\" name=\"{name}\" value=\"{}\"{required}></label>",
        escape(label),
        escape(value)
    )
}

/// Required money input accepting cents.
pub fn price_input(label: &str, name: &str) -> String {
    format!(
        "<label>{} <input type=\"number\" name=\"{name}\" step=\"0.01\" min=\"0\" \
         required></label>",
        escape(label)
    )
}

/// Labelled `<textarea>`; `value` is raw text.
pub fn textarea(label: &str, name: &str, value: &str) -> String {
    format!(
        "<label>{} <textarea name=\"{name}\">{}</textarea></label>",
        escape(label),
        escape(value)
    )
}

/// Labelled `<select>` over `(value, raw label)` pairs. An optional select
/// gets an "All" entry with an empty value.
pub fn select(
    label: &str,
    name: &str,
    options: &[(String, String)],
    selected: Option<&str>,
    required: bool,
) -> String {
    let opts: String = options
        .iter()
        .map(|(value, text)| {
            let sel = if selected == Some(value.as_str()) { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                escape(value),
                escape(text)
            )
        })
        .collect();
    let (required, blank) = if required {
        (" required", "Choose...")
    } else {
        ("", "All")
    };
    format!(
        "<label>{} <select name=\"{name}\"{required}>\
         <option value=\"\">{blank}</option>{opts}</select></label>",
        escape(label)
    )
}

/// POST form around already-rendered fields.
pub fn post_form(action: &str, fields: &str, submit: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{action}\">{fields}\
         <button type=\"submit\">{}</button></form>",
        escape(submit)
    )
}

/// Standalone error page with the given status.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<p>{}</p><p><a href=\"/\">Back to dashboard</a></p>",
        escape(message)
    );
    (status, page(title, &[], &body)).into_response()
}
