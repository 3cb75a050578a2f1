// src/digest/email.rs
use crate::core::config_manager::DigestConfig;

/// A rendered digest ready for delivery. Sent once, then dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub subject: String,
    pub recipient: String,
    pub html_body: String,
}

impl EmailMessage {
    pub fn digest(config: &DigestConfig, html_body: String) -> Self {
        Self {
            subject: format!("[{}] 새로운 채용 공고 알림", config.criteria.keyword),
            recipient: config.recipient_email.clone(),
            html_body,
        }
    }
}
