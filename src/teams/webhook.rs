//! Incoming webhook URL validation.
//!
//! Checks run from coarse to fine so each kind of mistake gets its own
//! error: a truncated URL, a URL for the wrong host, and a URL on the right
//! host with a malformed path.

use regex::Regex;
use url::Url;

use crate::errors::ValidationError;

// New webhooks use outlook.office.com, but older guides and parts of the
// official documentation still show outlook.office365.com.
pub const OFFICE_COM_PREFIX: &str = "https://outlook.office.com";
pub const OFFICE365_PREFIX: &str = "https://outlook.office365.com";

/// Path from the official connector documentation, shown to users when a URL
/// has the wrong shape.
pub const OFFICIAL_DOCS_SAMPLE_URI: &str = "webhook/a1269812-6d10-44b1-abc5-b84f93580ba0@9e7b80c7-d1eb-4b52-8582-76f921e416d9/IncomingWebhook/3fdd6767bae44ac58e5995547d66a4e4/f332c8d9-3397-4ac5-957b-b8e3fc465a8c";

// Mixed case GUIDs are accepted by the service.
const WEBHOOK_URL_PATTERN: &str = r"^https://outlook\.office(?:365)?\.com/webhook/[-a-zA-Z0-9]{36}@[-a-zA-Z0-9]{36}/IncomingWebhook/[-a-zA-Z0-9]{32}/[-a-zA-Z0-9]{36}$";

static WEBHOOK_URL_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(WEBHOOK_URL_PATTERN)
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Apply every webhook check in order, stopping at the first failure.
///
/// # Errors
///
/// Returns [`ValidationError::TooShort`], [`ValidationError::UnrecognizedHost`]
/// or [`ValidationError::PatternMismatch`].
pub fn validate_webhook(webhook_url: &str) -> Result<(), ValidationError> {
    validate_length(webhook_url)?;
    validate_prefix(webhook_url)?;
    validate_pattern(webhook_url)
}

// At least the shorter prefix plus something after it.
fn validate_length(webhook_url: &str) -> Result<(), ValidationError> {
    if webhook_url.len() <= OFFICE_COM_PREFIX.len() {
        return Err(ValidationError::TooShort {
            url: webhook_url.to_string(),
        });
    }
    Ok(())
}

fn validate_prefix(webhook_url: &str) -> Result<(), ValidationError> {
    if webhook_url.starts_with(OFFICE_COM_PREFIX) || webhook_url.starts_with(OFFICE365_PREFIX) {
        return Ok(());
    }

    Err(ValidationError::UnrecognizedHost {
        found: scheme_and_host(webhook_url),
    })
}

fn validate_pattern(webhook_url: &str) -> Result<(), ValidationError> {
    if WEBHOOK_URL_RE.is_match(webhook_url) {
        Ok(())
    } else {
        Err(ValidationError::PatternMismatch {
            url: webhook_url.to_string(),
        })
    }
}

/// `scheme://host` of the given URL, or the raw input when it does not parse.
fn scheme_and_host(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => format!("{}://{}", url.scheme(), url.host_str().unwrap_or_default()),
        Err(_) => raw.to_string(),
    }
}
