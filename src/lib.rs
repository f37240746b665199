//! send2teams - submit messages to a Microsoft Teams channel via an incoming webhook.
//!
//! Intended for Nagios, scripts and CI jobs that need to post pass/fail
//! results or arbitrary text to a channel.
//!
//! # Architecture
//!
//! A single invocation runs straight through:
//! 1. command-line flags are collected into a [`Config`](crate::core::config::Config)
//! 2. the message and webhook URL are validated before any network access
//! 3. a MessageCard (or, when users are mentioned, an Adaptive Card) is built
//! 4. the card is POSTed to the webhook with retries and an overall timeout
//!
//! # Example
//!
//! ```no_run
//! use send2teams::core::config::Config;
//! use send2teams::core::models::AppInfo;
//! use send2teams::features::{OutputMode, Reporter, deliver};
//! use send2teams::teams::{TeamsClient, build_card};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config {
//!         team: "Ops".to_string(),
//!         channel: "Alerts".to_string(),
//!         webhook_url: "https://outlook.office.com/webhook/...".to_string(),
//!         message_title: "Backup finished".to_string(),
//!         message_text: "All volumes copied".to_string(),
//!         ..Config::default()
//!     };
//!     config.validate()?;
//!
//!     let app = AppInfo::current();
//!     let card = build_card(&config.payload(), &app);
//!     let client = TeamsClient::new(&format!("{}/{}", app.name, app.version))?;
//!     let mut reporter = Reporter::stdio(OutputMode::Normal);
//!
//!     let outcome = deliver(
//!         &client,
//!         &config.target(),
//!         &card,
//!         config.retry_policy(),
//!         &config,
//!         &mut reporter,
//!     )
//!     .await;
//!     std::process::exit(i32::from(outcome.exit_code()));
//! }
//! ```

// Module declarations
pub mod args;
pub mod core;
pub mod errors;
pub mod features;
pub mod teams;

pub use errors::{Result, Send2TeamsError};

/// Configure human readable logging on stderr.
///
/// Library code only emits `tracing` events; nothing is printed unless the
/// caller installs a subscriber. Calling this more than once is harmless.
///
/// # Example
///
/// ```
/// send2teams::setup_logging(tracing::level_filters::LevelFilter::WARN);
/// ```
pub fn setup_logging(level: tracing::level_filters::LevelFilter) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
