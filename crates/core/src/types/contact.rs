//! Contact form records.
//!
//! A submission is rendered once into a fixed plain-text layout. The text is
//! what gets stored and downloaded; nothing parses it back.

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

/// India Standard Time, UTC+05:30 (no daylight saving).
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Display format for the submission time, e.g. `16 October 2026 at 07:59:01 pm`.
const DISPLAY_TIME_FORMAT: &str = "%-d %B %Y at %I:%M:%S %P";

const RULE: &str = "=================================================";

/// Values entered in the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub message: String,
}

impl ContactMessage {
    /// Phone number, or `Not provided` when blank or missing.
    #[must_use]
    pub fn phone_or_default(&self) -> &str {
        non_blank(self.phone.as_deref()).unwrap_or("Not provided")
    }

    /// Subject, or `General Inquiry` when missing.
    #[must_use]
    pub fn subject_or_default(&self) -> &str {
        non_blank(self.subject.as_deref()).unwrap_or("General Inquiry")
    }

    /// Render the fixed-format text record for a submission made at `submitted_at`.
    #[must_use]
    pub fn render(&self, submitted_at: DateTime<Utc>) -> String {
        format!(
            "\n{RULE}\nVENUS BAKE HOUSE - CONTACT FORM SUBMISSION\n{RULE}\n\n\
             Date & Time: {date_time}\n\n\
             Name: {name}\n\
             Email: {email}\n\
             Phone: {phone}\n\
             Subject: {subject}\n\n\
             Message:\n{message}\n\n\
             {RULE}\n",
            date_time = display_time(submitted_at),
            name = self.name,
            email = self.email,
            phone = self.phone_or_default(),
            subject = self.subject_or_default(),
            message = self.message,
        )
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Format a timestamp as local display text in India Standard Time.
#[must_use]
pub fn display_time(at: DateTime<Utc>) -> String {
    FixedOffset::east_opt(IST_OFFSET_SECS).map_or_else(
        || at.format(DISPLAY_TIME_FORMAT).to_string(),
        |ist| at.with_timezone(&ist).format(DISPLAY_TIME_FORMAT).to_string(),
    )
}

/// One entry in the append-only contact log.
///
/// Serialized as `{"timestamp": <epoch millis>, "data": <text>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    /// Submission time in milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// The rendered text record.
    #[serde(rename = "data", alias = "renderedText")]
    pub rendered_text: String,
}

impl ContactSubmission {
    /// Render `message` as submitted at `submitted_at`.
    #[must_use]
    pub fn new(message: &ContactMessage, submitted_at: DateTime<Utc>) -> Self {
        Self {
            timestamp: submitted_at.timestamp_millis(),
            rendered_text: message.render(submitted_at),
        }
    }

    /// Name of the downloadable file, `contact_<epoch-millis>.txt`.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("contact_{}.txt", self.timestamp)
    }
}
