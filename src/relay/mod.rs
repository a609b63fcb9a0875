//! Contact-form relay: the one outbound call, made when a push succeeds.

pub mod formspree;

use async_trait::async_trait;
use serde::Serialize;

pub use crate::error::RelayError;
pub use formspree::FormspreeClient;

/// Fields posted to the relay
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactForm {
    pub subject: String,
    pub message: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

/// Something that can deliver a contact form.
///
/// `Ok(true)` means the relay acknowledged the submission, `Ok(false)` that it
/// answered without acknowledging it.
#[async_trait]
pub trait SubmitRelay: Send + Sync {
    async fn submit(&self, form: &ContactForm) -> Result<bool, RelayError>;
}
