//! Route definitions for FAQ entries, mounted at `/faqs`.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{faq, import};
use crate::state::AppState;

/// ```text
/// GET    /           -> list_faqs
/// POST   /           -> create_faq
/// PUT    /{id}       -> update_faq
/// DELETE /{id}       -> delete_faq
/// POST   /import     -> import_faqs
/// GET    /template   -> download_template
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(faq::list_faqs).post(faq::create_faq))
        .route("/{id}", put(faq::update_faq).delete(faq::delete_faq))
        .route("/import", post(import::import_faqs))
        .route("/template", get(import::download_template))
}
