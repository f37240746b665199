use std::fmt;
use std::time::Duration;

use tracing::level_filters::LevelFilter;

use crate::args::Cli;
use crate::core::models::{MessagePayload, SubmissionOptions, TargetLink, UserMention, WebhookTarget};
use crate::errors::ValidationError;
use crate::teams::client::RetryPolicy;
use crate::teams::validation::validate_message;
use crate::teams::webhook::validate_webhook;

pub const DEFAULT_THEME_COLOR: &str = "#832561";
pub const DEFAULT_RETRIES: i64 = 2;
pub const DEFAULT_RETRIES_DELAY: i64 = 2;
/// Longest accepted wait between attempts, in seconds (one day).
pub const MAX_RETRIES_DELAY: i64 = 86_400;

/// Settings for one invocation, taken from command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Used in local output only; never sent to the webhook.
    pub team: String,
    /// Used in local output only; never sent to the webhook.
    pub channel: String,
    pub webhook_url: String,
    pub theme_color: String,
    pub message_title: String,
    pub message_text: String,
    pub sender: Option<String>,
    pub target_links: Vec<TargetLink>,
    pub mentions: Vec<UserMention>,
    pub code_blocks: Vec<String>,
    pub convert_eol: bool,
    pub verbose_output: bool,
    pub silent_output: bool,
    pub disable_webhook_validation: bool,
    pub ignore_invalid_response: bool,
    pub retries: i64,
    pub retries_delay: i64,
    pub show_version: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            team: String::new(),
            channel: String::new(),
            webhook_url: String::new(),
            theme_color: DEFAULT_THEME_COLOR.to_string(),
            message_title: String::new(),
            message_text: String::new(),
            sender: None,
            target_links: Vec::new(),
            mentions: Vec::new(),
            code_blocks: Vec::new(),
            convert_eol: false,
            verbose_output: false,
            silent_output: false,
            disable_webhook_validation: false,
            ignore_invalid_response: false,
            retries: DEFAULT_RETRIES,
            retries_delay: DEFAULT_RETRIES_DELAY,
            show_version: false,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            team: cli.team,
            channel: cli.channel,
            webhook_url: cli.url,
            theme_color: cli.color,
            message_title: cli.title,
            message_text: cli.message,
            sender: cli.sender,
            target_links: cli.target_urls,
            mentions: cli.user_mentions,
            code_blocks: cli.code_blocks,
            convert_eol: cli.convert_eol,
            verbose_output: cli.verbose,
            silent_output: cli.silent,
            disable_webhook_validation: cli.disable_webhook_validation,
            ignore_invalid_response: cli.ignore_invalid_response,
            retries: cli.retries,
            retries_delay: cli.retries_delay,
            show_version: cli.version,
        }
    }
}

impl Config {
    /// Verify all fields hold acceptable values.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let options = self.submission_options();
        let payload = self.payload();

        // Checked ahead of the labels so the conflict is reported no matter
        // what else is missing.
        if options.silent && options.verbose {
            return Err(ValidationError::ConflictingOutputMode);
        }

        if self.team.is_empty() {
            return Err(ValidationError::EmptyField("team name"));
        }

        if self.channel.is_empty() {
            return Err(ValidationError::EmptyField("channel name"));
        }

        validate_message(&payload, &options)?;

        if self.disable_webhook_validation {
            tracing::debug!("Webhook URL validation disabled");
        } else {
            validate_webhook(&self.webhook_url)?;
        }

        Ok(())
    }

    #[must_use]
    pub fn target(&self) -> WebhookTarget {
        WebhookTarget {
            team: self.team.clone(),
            channel: self.channel.clone(),
            url: self.webhook_url.clone(),
        }
    }

    #[must_use]
    pub fn payload(&self) -> MessagePayload {
        MessagePayload {
            title: self.message_title.clone(),
            body_text: self.message_text.clone(),
            theme_color: self.theme_color.clone(),
            sender: self.sender.clone(),
            target_links: self.target_links.clone(),
            mentions: self.mentions.clone(),
            code_blocks: self.code_blocks.clone(),
            convert_eol: self.convert_eol,
        }
    }

    #[must_use]
    pub fn submission_options(&self) -> SubmissionOptions {
        SubmissionOptions {
            verbose: self.verbose_output,
            silent: self.silent_output,
            retries: self.retries,
            retries_delay: self.retries_delay,
            ignore_invalid_response: self.ignore_invalid_response,
        }
    }

    /// Retry settings for the webhook client. Negative values, which
    /// [`Config::validate`] rejects, are treated as zero.
    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        let retries = u32::try_from(self.retries.max(0)).unwrap_or(u32::MAX);
        let delay = Duration::from_secs(self.retries_delay.max(0).unsigned_abs());
        RetryPolicy {
            retries,
            delay,
            timeout: crate::features::deliver::submission_timeout(retries, delay),
        }
    }

    /// Log verbosity matching the requested output mode.
    #[must_use]
    pub fn log_level(&self) -> LevelFilter {
        if self.silent_output {
            LevelFilter::OFF
        } else if self.verbose_output {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        }
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Team={:?}, Channel={:?}, WebhookURL={:?}, ThemeColor={:?}, MessageTitle={:?}, MessageText={:?}, Sender={:?}, TargetURLs={}, UserMentions={}, Retries={}, RetriesDelay={}",
            self.team,
            self.channel,
            self.webhook_url,
            self.theme_color,
            self.message_title,
            self.message_text,
            self.sender.as_deref().unwrap_or_default(),
            self.target_links.len(),
            self.mentions.len(),
            self.retries,
            self.retries_delay,
        )
    }
}
