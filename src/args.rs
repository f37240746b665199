use clap::Parser;
use url::Url;

use crate::core::config::{DEFAULT_RETRIES, DEFAULT_RETRIES_DELAY, DEFAULT_THEME_COLOR};
use crate::core::models::{TargetLink, UserMention};
use crate::errors::ParseError;

#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "send2teams")]
#[command(about = "Submit messages to a Microsoft Teams channel via an incoming webhook", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// The name of the Team containing our target channel
    #[arg(long, default_value = "")]
    pub team: String,

    /// The target channel where we will send a message
    #[arg(long, default_value = "")]
    pub channel: String,

    /// The Webhook URL provided by a preconfigured Connector
    #[arg(long, env = "SEND2TEAMS_WEBHOOK_URL", default_value = "", hide_env_values = true)]
    pub url: String,

    /// The hex color code used to set the desired trim color on submitted messages
    #[arg(long, default_value = DEFAULT_THEME_COLOR)]
    pub color: String,

    /// The title for the message to submit
    #[arg(long, default_value = "")]
    pub title: String,

    /// The message to submit. This message may be provided in Markdown format
    #[arg(long, default_value = "")]
    pub message: String,

    /// The (optional) sender identity shown in the message trailer
    #[arg(long)]
    pub sender: Option<String>,

    /// Button linking to a URL, given as "URL,LABEL". May be repeated
    #[arg(long = "target-url", value_name = "URL,LABEL", value_parser = parse_target_link)]
    pub target_urls: Vec<TargetLink>,

    /// User to @mention, given as "NAME,ID". May be repeated
    #[arg(long = "user-mention", value_name = "NAME,ID", value_parser = parse_user_mention)]
    pub user_mentions: Vec<UserMention>,

    /// Text to add as a separate code block section. May be repeated
    #[arg(long = "code-block", value_name = "TEXT")]
    pub code_blocks: Vec<String>,

    /// Whether messages with Windows, Mac and Linux newlines are updated to use break statements
    #[arg(long)]
    pub convert_eol: bool,

    /// Whether ANY output should be shown after message submission success or failure
    #[arg(long)]
    pub silent: bool,

    /// Whether detailed output should be shown after message submission success or failure
    #[arg(long)]
    pub verbose: bool,

    /// Skip webhook URL validation, e.g. for testing against other endpoints
    #[arg(long)]
    pub disable_webhook_validation: bool,

    /// Accept any successful response from the webhook, whatever its body
    #[arg(long)]
    pub ignore_invalid_response: bool,

    /// The number of attempts made to deliver messages before giving up
    #[arg(long, default_value_t = DEFAULT_RETRIES, allow_negative_numbers = true)]
    pub retries: i64,

    /// The number of seconds to wait before making another delivery attempt
    #[arg(long, default_value_t = DEFAULT_RETRIES_DELAY, allow_negative_numbers = true)]
    pub retries_delay: i64,

    /// Whether to display application version and then immediately exit application
    #[arg(long)]
    pub version: bool,
}

/// Parse one `--target-url` occurrence.
///
/// # Errors
///
/// Returns a [`ParseError`] if either half is missing or the URL is not
/// an absolute http(s) URL.
pub fn parse_target_link(raw: &str) -> Result<TargetLink, ParseError> {
    let (url, label) = split_pair(raw, "URL", "label")?;

    match Url::parse(url) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {}
        Ok(parsed) => {
            return Err(ParseError::InvalidUrl {
                url: url.to_string(),
                reason: format!("unsupported scheme {:?}", parsed.scheme()),
            });
        }
        Err(e) => {
            return Err(ParseError::InvalidUrl {
                url: url.to_string(),
                reason: e.to_string(),
            });
        }
    }

    Ok(TargetLink {
        url: url.to_string(),
        label: label.to_string(),
    })
}

/// Parse one `--user-mention` occurrence.
///
/// # Errors
///
/// Returns a [`ParseError`] if either half is missing.
pub fn parse_user_mention(raw: &str) -> Result<UserMention, ParseError> {
    let (name, id) = split_pair(raw, "name", "id")?;
    Ok(UserMention {
        display_name: name.to_string(),
        id: id.to_string(),
    })
}

// Labels may contain commas, so only the first one separates.
fn split_pair<'a>(
    raw: &'a str,
    first: &'static str,
    second: &'static str,
) -> Result<(&'a str, &'a str), ParseError> {
    let (a, b) = raw
        .split_once(',')
        .ok_or_else(|| ParseError::MissingSeparator(raw.to_string()))?;
    let (a, b) = (a.trim(), b.trim());

    if a.is_empty() {
        return Err(ParseError::EmptyPart {
            part: first,
            raw: raw.to_string(),
        });
    }
    if b.is_empty() {
        return Err(ParseError::EmptyPart {
            part: second,
            raw: raw.to_string(),
        });
    }
    Ok((a, b))
}
