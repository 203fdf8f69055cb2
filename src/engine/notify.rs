//! Best-effort notification of the run verdict.

use anyhow::{Context, Result};
use lettre::message::Mailbox;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use log::{debug, error};

use crate::{SmtpSettings, Verdict};

/// Delivers one message. Failures are reported to the caller, who decides whether they matter.
pub trait Notifier {
    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()>;
}

/// Mail over an SMTP relay with STARTTLS.
pub struct SmtpNotifier {
    settings: SmtpSettings,
}

impl SmtpNotifier {
    /// Requires `from` (or `username` as sender) and a password.
    pub fn new(settings: SmtpSettings) -> Result<Self> {
        if settings.from.is_none() && settings.username.is_none() {
            anyhow::bail!("SMTP sender not configured (set smtp.from or smtp.username)");
        }
        if settings.password.is_none() {
            anyhow::bail!("SMTP password not configured");
        }
        Ok(Self { settings })
    }

    fn sender(&self) -> &str {
        self.settings
            .from
            .as_deref()
            .or(self.settings.username.as_deref())
            .unwrap_or_default()
    }
}

impl Notifier for SmtpNotifier {
    fn send(&self, recipient: &str, subject: &str, body: &str) -> Result<()> {
        let from: Mailbox = self
            .sender()
            .parse()
            .with_context(|| format!("invalid sender address {:?}", self.sender()))?;
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("invalid recipient address {:?}", recipient))?;
        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .context("build message")?;

        let user = self
            .settings
            .username
            .clone()
            .unwrap_or_else(|| self.sender().to_string());
        let password = self.settings.password.clone().unwrap_or_default();
        let mailer = SmtpTransport::starttls_relay(&self.settings.host)
            .with_context(|| format!("configure SMTP relay {}", self.settings.host))?
            .port(self.settings.port)
            .credentials(Credentials::new(user, password))
            .build();

        debug!(
            "Sending notification to {} via {}:{}",
            recipient, self.settings.host, self.settings.port
        );
        mailer.send(&message).context("send mail")?;
        Ok(())
    }
}

/// Send `verdict` as subject and `body` as text to `recipient`. Returns whether it was delivered;
/// a failure is logged and never propagated.
pub fn notify_verdict<N>(notifier: &N, recipient: &str, verdict: Verdict, body: &str) -> bool
where
    N: Notifier + ?Sized,
{
    match notifier.send(recipient, verdict.subject(), body) {
        Ok(()) => {
            debug!("Notification sent to {}", recipient);
            true
        }
        Err(e) => {
            error!("Notification to {} failed: {:#}", recipient, e);
            false
        }
    }
}
