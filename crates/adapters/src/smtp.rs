//! SMTP-backed `Notifier`, gated behind the `email` feature the same
//! way the teacher gates `lettre` on its own `email` feature.

use crate::error::{AdapterError, Result};
use crate::traits::Notifier;
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpNotifier {
    pub fn new(relay: &str, username: &str, password: &str, from: &str) -> Result<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(relay)
            .map_err(|e| AdapterError::Notify(e.to_string()))?
            .credentials(Credentials::new(username.to_string(), password.to_string()))
            .build();
        let from = from
            .parse()
            .map_err(|e: lettre::address::AddressError| AdapterError::Notify(e.to_string()))?;
        Ok(Self { transport, from })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &[String], subject: &str, body: &str) -> Result<()> {
        for receiver in to {
            let mailbox: Mailbox = receiver
                .parse()
                .map_err(|e: lettre::address::AddressError| AdapterError::Notify(e.to_string()))?;
            let message = Message::builder()
                .from(self.from.clone())
                .to(mailbox)
                .subject(subject)
                .body(body.to_string())
                .map_err(|e| AdapterError::Notify(e.to_string()))?;
            self.transport
                .send(message)
                .await
                .map_err(|e| AdapterError::Notify(e.to_string()))?;
        }
        Ok(())
    }
}
