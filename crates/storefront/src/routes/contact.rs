//! Contact form route handlers.
//!
//! Records the submission in the local contact log and answers with a
//! thank-you page that offers the rendered record as `contact_<millis>.txt`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{State, rejection::FormRejection},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use tracing::instrument;
use venus_core::{ContactMessage, ContactSubmission};

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::views;

/// Thank-you page template with the download link.
#[derive(Template, WebTemplate)]
#[template(path = "contact_thanks.html")]
pub struct ContactThanksTemplate {
    pub stylesheet: String,
    pub badge: u64,
    pub file_name: String,
    pub download_href: String,
}

/// `data:` URL carrying `text` as a UTF-8 plain-text file.
fn download_href(text: &str) -> String {
    format!(
        "data:text/plain;charset=utf-8;base64,{}",
        STANDARD.encode(text.as_bytes())
    )
}

impl ContactThanksTemplate {
    fn new(submission: &ContactSubmission, badge: u64) -> Self {
        Self {
            stylesheet: views::stylesheet_href(),
            badge,
            file_name: submission.file_name(),
            download_href: download_href(&submission.rendered_text),
        }
    }
}

/// Record a contact form submission.
///
/// POST /contact
///
/// # Errors
///
/// Returns 400 if a required field (name, email, message) is missing.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    form: std::result::Result<Form<ContactMessage>, FormRejection>,
) -> Result<ContactThanksTemplate> {
    let Form(message) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let submission = state.contacts().lock().await.record(&message, Utc::now());
    let badge = state.cart().lock().await.item_count();

    tracing::info!(
        email = %message.email,
        file_name = %submission.file_name(),
        "Contact form submitted"
    );

    Ok(ContactThanksTemplate::new(&submission, badge))
}
