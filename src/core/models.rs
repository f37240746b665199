use serde::{Deserialize, Serialize};

/// Where a message is going. `team` and `channel` only label local output;
/// they are never sent to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookTarget {
    pub team: String,
    pub channel: String,
    pub url: String,
}

/// A labelled link rendered as an "open URL" button on the card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetLink {
    pub url: String,
    pub label: String,
}

/// A user tagged in a mention message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserMention {
    pub display_name: String,
    pub id: String,
}

/// Message content as collected from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessagePayload {
    pub title: String,
    pub body_text: String,
    pub theme_color: String,
    pub sender: Option<String>,
    pub target_links: Vec<TargetLink>,
    pub mentions: Vec<UserMention>,
    pub code_blocks: Vec<String>,
    // Replace line endings in the body with `<br>` before building the card
    pub convert_eol: bool,
}

impl MessagePayload {
    /// Mention messages use a different card format than regular messages.
    #[must_use]
    pub fn is_mention_mode(&self) -> bool {
        !self.mentions.is_empty()
    }
}

/// How a message is submitted and how much is reported about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionOptions {
    pub verbose: bool,
    pub silent: bool,
    pub retries: i64,
    /// Seconds to wait between attempts.
    pub retries_delay: i64,
    pub ignore_invalid_response: bool,
}

/// Result of a single delivery attempt sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryOutcome {
    pub success: bool,
    pub error_detail: Option<String>,
}

impl DeliveryOutcome {
    #[must_use]
    pub fn success() -> Self {
        Self {
            success: true,
            error_detail: None,
        }
    }

    #[must_use]
    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            success: false,
            error_detail: Some(detail.into()),
        }
    }

    /// Process exit status for this outcome: 0 on success, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        u8::from(!self.success)
    }
}

/// Branding shown in the message trailer and `--version` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub url: String,
}

impl AppInfo {
    #[must_use]
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            url: format!("https://github.com/atc0005/{}", env!("CARGO_PKG_NAME")),
        }
    }

    /// Name, version and project URL in the layout used by `--version`.
    #[must_use]
    pub fn branding(&self) -> String {
        format!("\n{} {}\n{}\n\n", self.name, self.version, self.url)
    }
}
