//! Contact submission recorder.
//!
//! Appends each rendered contact message to the `contactSubmissions` log.
//! The log is write-only from the storefront's point of view: it is never
//! displayed or pruned. Recording always succeeds for the caller; storage
//! trouble is logged and the submission is still returned for download.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::instrument;
use venus_core::{ContactMessage, ContactSubmission};

use crate::storage::{self, KeyValueStore, keys};

/// Appends contact submissions to the local store.
pub struct ContactRecorder {
    store: Arc<dyn KeyValueStore>,
}

impl ContactRecorder {
    /// Create a recorder writing to `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Render `message` as of `submitted_at` and append it to the log.
    #[instrument(skip(self, message), fields(timestamp = submitted_at.timestamp_millis()))]
    pub fn record(&self, message: &ContactMessage, submitted_at: DateTime<Utc>) -> ContactSubmission {
        let submission = ContactSubmission::new(message, submitted_at);

        let mut log: Vec<ContactSubmission> =
            storage::load_json(self.store.as_ref(), keys::CONTACT_SUBMISSIONS).unwrap_or_default();
        log.push(submission.clone());

        match storage::save_json(self.store.as_ref(), keys::CONTACT_SUBMISSIONS, &log) {
            Ok(()) => tracing::info!(entries = log.len(), "Contact submission recorded"),
            Err(e) => tracing::warn!(error = %e, "Failed to save contact submission"),
        }

        submission
    }
}
