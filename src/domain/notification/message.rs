//! Email message composed for a newly registered volunteer

/// Placeholder replaced with the generated password in the body template
pub const PASSWORD_PLACEHOLDER: &str = "{password}";

/// Plaintext email message
#[derive(Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body_text: String,
}

impl std::fmt::Debug for EmailMessage {
    // The body carries a password
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailMessage")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("subject", &self.subject)
            .field("body_text", &"[REDACTED]")
            .finish()
    }
}

/// Template for the password notice sent on registration
#[derive(Debug, Clone)]
pub struct PasswordNoticeTemplate {
    sender: String,
    subject: String,
    body: String,
}

impl PasswordNoticeTemplate {
    pub fn new(
        sender: impl Into<String>,
        subject: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    /// Compose the message for `recipient`.
    ///
    /// The password replaces every `{password}` in the body, or is appended when
    /// the body has no placeholder.
    pub fn compose(&self, recipient: &str, password: &str) -> EmailMessage {
        let body_text = if self.body.contains(PASSWORD_PLACEHOLDER) {
            self.body.replace(PASSWORD_PLACEHOLDER, password)
        } else {
            format!("{}{}", self.body, password)
        };

        EmailMessage {
            from: self.sender.clone(),
            to: recipient.to_string(),
            subject: self.subject.clone(),
            body_text,
        }
    }
}
