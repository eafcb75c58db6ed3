//! Handlers for spreadsheet import and the import template.

use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use replydesk_core::import::{
    faq_template_xlsx, run_import, OutcomeKind, TEMPLATE_CONTENT_TYPE, TEMPLATE_FILE_NAME,
};
use replydesk_core::notice::{Notice, NoticeLevel, NotificationSink};
use replydesk_core::types::OwnerId;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Name of the multipart field carrying the spreadsheet.
pub const IMPORT_FIELD: &str = "file";

/// Fallback when the multipart part has no file name; content sniffing
/// decides the format.
const UNNAMED_UPLOAD: &str = "upload";

/// Emits import notices as structured log events.
struct LogSink {
    owner: OwnerId,
}

impl NotificationSink for LogSink {
    fn notify(&self, notice: &Notice) {
        match notice.level {
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!(
                owner = %self.owner,
                title = %notice.title,
                message = %notice.message,
                "Import notice",
            ),
            NoticeLevel::Error => tracing::warn!(
                owner = %self.owner,
                title = %notice.title,
                message = %notice.message,
                "Import notice",
            ),
        }
    }
}

fn status_for(kind: OutcomeKind) -> StatusCode {
    match kind {
        OutcomeKind::Imported | OutcomeKind::NothingToImport => StatusCode::OK,
        OutcomeKind::ParseFailed => StatusCode::BAD_REQUEST,
        OutcomeKind::HeaderInvalid | OutcomeKind::InvalidRows => StatusCode::UNPROCESSABLE_ENTITY,
        OutcomeKind::StoreFailed => StatusCode::BAD_GATEWAY,
        OutcomeKind::AuthRequired => StatusCode::UNAUTHORIZED,
    }
}

/// POST /api/v1/faqs/import
///
/// Accept a spreadsheet in the multipart field `file` and append its rows to
/// the caller's knowledge base in one all-or-nothing batch. The response
/// always carries the import report; the status code reflects the outcome.
pub async fn import_faqs(
    user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMPORT_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or(UNNAMED_UPLOAD).to_string();
        let data = field.bytes().await?;
        upload = Some((file_name, data));
        break;
    }

    let (file_name, data) = upload.ok_or_else(|| {
        AppError::BadRequest(format!("Missing multipart field '{IMPORT_FIELD}'"))
    })?;

    tracing::debug!(
        owner = %user.owner,
        file_name = %file_name,
        size = data.len(),
        "Import upload received",
    );

    let sink = LogSink { owner: user.owner };
    let report = run_import(&state.store, &user, &sink, &file_name, &data).await;

    tracing::info!(
        owner = %user.owner,
        outcome = ?report.outcome.kind,
        inserted = report.outcome.inserted_count,
        "FAQ import finished",
    );

    Ok((
        status_for(report.outcome.kind),
        Json(DataResponse { data: report }),
    ))
}

/// GET /api/v1/faqs/template
///
/// Download an `.xlsx` workbook with the expected header row.
pub async fn download_template(_user: AuthUser) -> AppResult<impl IntoResponse> {
    let bytes = faq_template_xlsx()
        .map_err(|e| AppError::InternalError(format!("Failed to build template: {e}")))?;

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, TEMPLATE_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}
