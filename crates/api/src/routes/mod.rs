pub mod channel;
pub mod faq;
pub mod health;
pub mod plan;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /faqs                 list, create
/// /faqs/{id}            update, delete
/// /faqs/import          spreadsheet import (multipart, POST)
/// /faqs/template        template workbook download (GET)
///
/// /channels             list (?search=), create
/// /channels/{id}        delete
///
/// /plan                 plan and quota status (GET)
/// ```
///
/// Every route requires a Bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/faqs", faq::router())
        .nest("/channels", channel::router())
        .nest("/plan", plan::router())
}
