// src/notify/mod.rs
//! Report distribution envelope
//!
//! The monitor's job ends at producing a mail-shaped envelope: subject,
//! body text, and named attachments. Actual delivery (SMTP and friends)
//! belongs to an external collaborator behind the [`Notifier`] trait.

use crate::utils::error::MonitorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Addressing settings for report distribution, from configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Sender address
    pub from: String,
    /// Recipient addresses
    pub to: Vec<String>,
    /// Subject line for the report mail
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_subject() -> String {
    "Mining fleet status report".to_string()
}

/// One outgoing report: addressing, body text, and named attachments
///
/// Attachments are text documents keyed by filename (the CSV reports in
/// practice). The mapping is ordered so delivery is deterministic.
#[derive(Debug, Clone)]
pub struct Notification {
    /// Sender address
    pub from: String,
    /// Recipient addresses
    pub to: Vec<String>,
    /// Subject line
    pub subject: String,
    /// Report body text
    pub body: String,
    attachments: BTreeMap<String, String>,
}

impl Notification {
    /// Builds an envelope from the configured addressing and a body
    pub fn new(config: &NotifyConfig, body: impl Into<String>) -> Self {
        Notification {
            from: config.from.clone(),
            to: config.to.clone(),
            subject: config.subject.clone(),
            body: body.into(),
            attachments: BTreeMap::new(),
        }
    }

    /// Adds a named text attachment
    ///
    /// # Errors
    /// Returns `AttachmentError` when the filename is blank or the
    /// content is empty — a misuse of the delivery boundary that is
    /// fatal to the run rather than silently dropped.
    pub fn attach(
        &mut self,
        filename: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), MonitorError> {
        let filename = filename.into();
        if filename.trim().is_empty() {
            return Err(MonitorError::AttachmentError(
                "Attachment filename is blank".to_string(),
            ));
        }
        let content = content.into();
        if content.is_empty() {
            return Err(MonitorError::AttachmentError(format!(
                "Attachment {} has no content",
                filename
            )));
        }
        self.attachments.insert(filename, content);
        Ok(())
    }

    /// The attachments added so far, keyed by filename
    pub fn attachments(&self) -> &BTreeMap<String, String> {
        &self.attachments
    }
}

/// Delivery seam for outgoing reports
///
/// Implementations own the transport; the monitor only builds the
/// envelope.
pub trait Notifier {
    /// Delivers one notification
    ///
    /// # Errors
    /// Returns `MonitorError` when the envelope cannot be handed off.
    fn deliver(&self, notification: &Notification) -> Result<(), MonitorError>;
}

/// Notifier that writes the envelope to the log instead of sending it
///
/// Stands in wherever no mail transport is wired up, keeping the scan
/// pipeline identical with and without delivery.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn deliver(&self, notification: &Notification) -> Result<(), MonitorError> {
        log::info!(
            "Report \"{}\" from {} to {}",
            notification.subject,
            notification.from,
            notification.to.join(", ")
        );
        for (filename, content) in notification.attachments() {
            log::info!("Attachment {} ({} bytes)", filename, content.len());
        }
        log::info!("\n{}", notification.body);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> NotifyConfig {
        NotifyConfig {
            from: "monitor@example.com".to_string(),
            to: vec!["ops@example.com".to_string()],
            subject: "status".to_string(),
        }
    }

    #[test]
    fn test_attach_keeps_filename_order() {
        let mut note = Notification::new(&config(), "body");
        note.attach("summary.csv", "a,b\n").unwrap();
        note.attach("hosts.csv", "c,d\n").unwrap();

        let names: Vec<&String> = note.attachments().keys().collect();
        assert_eq!(names, ["hosts.csv", "summary.csv"]);
    }

    #[test]
    fn test_attach_rejects_blank_filename() {
        let mut note = Notification::new(&config(), "body");
        match note.attach("  ", "content") {
            Err(MonitorError::AttachmentError(_)) => {}
            other => panic!("expected AttachmentError, got {:?}", other),
        }
    }

    #[test]
    fn test_attach_rejects_empty_content() {
        let mut note = Notification::new(&config(), "body");
        match note.attach("hosts.csv", "") {
            Err(MonitorError::AttachmentError(_)) => {}
            other => panic!("expected AttachmentError, got {:?}", other),
        }
        assert!(note.attachments().is_empty());
    }
}
