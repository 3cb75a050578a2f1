// src/digest/mod.rs
//! Rendering and delivery of the job digest.

pub mod email;
pub mod mailer;
pub mod renderer;

pub use email::EmailMessage;
pub use mailer::{LogMailer, Mailer, SmtpMailer};
pub use renderer::DigestRenderer;
