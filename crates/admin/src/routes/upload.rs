//! Booking and cancellation spreadsheet uploads.

use askama::Template;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, State},
    response::Response,
    routing::get,
};
use falcon_core::{Screen, UploadKind};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::middleware::RequireSession;
use crate::state::AppState;

use super::layout::{Dialog, Shell, render};

/// Largest spreadsheet accepted.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// One upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFormView {
    pub slug: &'static str,
    pub title: String,
    pub accept: String,
}

impl From<UploadKind> for UploadFormView {
    fn from(kind: UploadKind) -> Self {
        Self {
            slug: kind.slug(),
            title: format!("Upload {} File", capitalize(kind.noun())),
            accept: UploadKind::EXTENSIONS.join(","),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Upload page template.
#[derive(Template)]
#[template(path = "upload.html")]
struct UploadTemplate {
    shell: Shell,
    forms: Vec<UploadFormView>,
    dialog: Option<Dialog>,
}

impl UploadTemplate {
    fn new(dialog: Option<Dialog>) -> Self {
        Self {
            shell: Shell::new(Screen::UploadBookings, true),
            forms: UploadKind::ALL.into_iter().map(UploadFormView::from).collect(),
            dialog,
        }
    }
}

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/uploadpage", get(upload_page).post(upload))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// GET /uploadpage
async fn upload_page(RequireSession(_gate): RequireSession) -> Response {
    render(&UploadTemplate::new(None))
}

/// The multipart body as submitted.
#[derive(Debug, Default)]
struct UploadSubmission {
    kind: Option<String>,
    file_name: Option<String>,
    contents: Vec<u8>,
}

async fn read_submission(mut multipart: Multipart) -> Result<UploadSubmission, AppError> {
    let mut submission = UploadSubmission::default();

    while let Some(field) = multipart.next_field().await? {
        match field.name() {
            Some("kind") => {
                submission.kind = Some(field.text().await?);
            }
            Some("file") => {
                // Browsers send an empty file name when nothing was chosen.
                submission.file_name = field
                    .file_name()
                    .filter(|name| !name.is_empty())
                    .map(str::to_owned);
                submission.contents = field.bytes().await?.to_vec();
            }
            _ => {}
        }
    }

    Ok(submission)
}

/// POST /uploadpage
#[instrument(skip(state, _gate, multipart))]
async fn upload(
    State(state): State<AppState>,
    RequireSession(_gate): RequireSession,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let submission = read_submission(multipart).await?;
    let kind = submission
        .kind
        .as_deref()
        .and_then(UploadKind::from_slug)
        .ok_or_else(|| AppError::BadRequest("unknown upload kind".to_string()))?;

    let back = Screen::UploadBookings.path();
    if let Err(e) = kind.validate_file_name(submission.file_name.as_deref()) {
        return Ok(render(&UploadTemplate::new(Some(Dialog::new(
            e.message(),
            back,
        )))));
    }
    let file_name = submission.file_name.unwrap_or_default();

    let message = match state
        .api()
        .upload_spreadsheet(kind, &file_name, submission.contents)
        .await
    {
        Ok(()) => {
            tracing::info!(%kind, file_name = %file_name, "Spreadsheet uploaded");
            kind.success_message()
        }
        Err(e) => {
            tracing::warn!(%kind, error = %e, "Spreadsheet upload failed");
            kind.failure_message()
        }
    };

    Ok(render(&UploadTemplate::new(Some(Dialog::new(message, back)))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_views() {
        let bookings = UploadFormView::from(UploadKind::Bookings);
        assert_eq!(bookings.slug, UploadKind::Bookings.slug());
        assert_eq!(bookings.accept, ".xlsx,.xls");
        assert!(bookings.title.starts_with("Upload "));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("cancellations"), "Cancellations");
        assert_eq!(capitalize(""), "");
    }
}
