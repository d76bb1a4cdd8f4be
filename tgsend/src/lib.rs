//! Upload audio to the Telegram Bot API as protected (non-forwardable) messages.
//!
//! The crate is a thin client around one operation: read a local audio file, send it to
//! `sendAudio` as `multipart/form-data` with `protect_content=true`, and decode the JSON
//! envelope into a typed [`Message`].
//!
//! # Example
//! ```no_run
//! use tgsend::BotClient;
//!
//! # async fn run() -> tgsend::Result<()> {
//! let client = BotClient::new("123456:ABC-DEF");
//! let message = client.send_protected_audio(123456789, "sample.mp3").await?;
//! println!("sent message {}", message.message_id);
//! # Ok(())
//! # }
//! ```
//!
//! Every failure is returned as a single [`Error`]; nothing is retried. Use
//! [`Error::kind`] to tell local file problems from transport, decode and remote failures.

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod telemetry;
pub mod types;

// Re-export commonly used types
pub use client::{BotClient, SendAudio};
pub use config::Config;
pub use envelope::{ApiResponse, ResponseParameters};
pub use error::{Error, ErrorKind, Result};
pub use types::{Audio, Chat, Message, User};
