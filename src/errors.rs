use std::time::Duration;

use thiserror::Error;

use crate::teams::webhook::{
    OFFICE_COM_PREFIX, OFFICE365_PREFIX, OFFICIAL_DOCS_SAMPLE_URI,
};

/// Problems found in user input before anything is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error(
        "incomplete webhook URL: provided URL {url:?} shorter than or equal to just the {:?} URL prefix",
        OFFICE_COM_PREFIX
    )]
    TooShort { url: String },

    #[error(
        "webhook URL does not contain expected prefix; got {found:?}, expected one of {:?} or {:?}",
        OFFICE_COM_PREFIX,
        OFFICE365_PREFIX
    )]
    UnrecognizedHost { found: String },

    #[error(
        "webhook URL does not match expected pattern;\ngot: {url:?}\nexpected webhook URL in one of these formats:\n  * \"{}/{}\"\n  * \"{}/{}\"",
        OFFICE_COM_PREFIX,
        OFFICIAL_DOCS_SAMPLE_URI,
        OFFICE365_PREFIX,
        OFFICIAL_DOCS_SAMPLE_URI
    )]
    PatternMismatch { url: String },

    #[error("{0} too short")]
    EmptyField(&'static str),

    #[error(
        "provided message theme color too short; got {color:?} of length {}, expected length of {expected}",
        .color.len()
    )]
    InvalidThemeColor { color: String, expected: usize },

    #[error("unsupported: the {0} option cannot be combined with user mentions")]
    IncompatibleOption(&'static str),

    #[error("unsupported: You cannot have both silent and verbose output")]
    ConflictingOutputMode,

    #[error("too many target URLs; got {count}, at most {max} are supported")]
    TooManyTargetLinks { count: usize, max: usize },

    #[error("{field} cannot be negative; got {value}")]
    NegativeValue { field: &'static str, value: i64 },

    #[error("{field} cannot exceed {max}; got {value}")]
    ValueTooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },
}

/// Problems parsing a single `VALUE,LABEL` style flag occurrence.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected comma separated pair, got {0:?}")]
    MissingSeparator(String),

    #[error("empty {part} in {raw:?}")]
    EmptyPart { part: &'static str, raw: String },

    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Debug, Error)]
pub enum FormattingError {
    #[error("received empty string, refusing to format")]
    EmptyInput,

    #[error("failed to encode text as JSON: {0}")]
    MarshalFailure(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Failed to send HTTP request: {0}")]
    Http(#[from] reqwest::Error),

    #[error("webhook returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected webhook response {body:?}, expected \"1\"")]
    InvalidResponse { body: String },

    #[error("message submission timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("failed to serialize message card: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid message card: {0}")]
    InvalidCard(String),
}

#[derive(Debug, Error)]
pub enum Send2TeamsError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Formatting(#[from] FormattingError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),
}

pub type Result<T> = std::result::Result<T, Send2TeamsError>;
