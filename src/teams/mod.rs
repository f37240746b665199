//! All Teams-specific functionality

pub mod card;
pub mod card_builder;
pub mod client;
pub mod format;
pub mod validation;
pub mod webhook;

// Re-export main types for convenience
pub use card::CardDocument;
pub use card_builder::build_card;
pub use client::{RetryPolicy, TeamsClient, WebhookSender};
