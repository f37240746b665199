//! Message content and option checks. The first problem found is returned.

use crate::core::config::{DEFAULT_THEME_COLOR, MAX_RETRIES_DELAY};
use crate::core::models::{MessagePayload, SubmissionOptions};
use crate::errors::ValidationError;
use crate::teams::card::MAX_POTENTIAL_ACTIONS;

/// Check a message and its submission options before a card is built.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn validate_message(
    payload: &MessagePayload,
    options: &SubmissionOptions,
) -> Result<(), ValidationError> {
    if options.silent && options.verbose {
        return Err(ValidationError::ConflictingOutputMode);
    }

    if payload.body_text.is_empty() {
        return Err(ValidationError::EmptyField("message content"));
    }

    if payload.is_mention_mode() {
        validate_mention_mode(payload)?;
    } else {
        validate_card_mode(payload)?;
    }

    if options.retries < 0 {
        return Err(ValidationError::NegativeValue {
            field: "retries",
            value: options.retries,
        });
    }

    if options.retries_delay < 0 {
        return Err(ValidationError::NegativeValue {
            field: "retries delay",
            value: options.retries_delay,
        });
    }

    if options.retries_delay > MAX_RETRIES_DELAY {
        return Err(ValidationError::ValueTooLarge {
            field: "retries delay",
            value: options.retries_delay,
            max: MAX_RETRIES_DELAY,
        });
    }

    Ok(())
}

// Mentions are sent as an Adaptive Card, which has no room for the
// MessageCard styling options.
fn validate_mention_mode(payload: &MessagePayload) -> Result<(), ValidationError> {
    if !payload.target_links.is_empty() {
        return Err(ValidationError::IncompatibleOption("target-url"));
    }
    if !payload.code_blocks.is_empty() {
        return Err(ValidationError::IncompatibleOption("code-block"));
    }
    if !payload.title.is_empty() {
        return Err(ValidationError::IncompatibleOption("title"));
    }
    if payload.theme_color != DEFAULT_THEME_COLOR {
        return Err(ValidationError::IncompatibleOption("color"));
    }
    Ok(())
}

fn validate_card_mode(payload: &MessagePayload) -> Result<(), ValidationError> {
    // Expected pattern: #832561. Only the length is checked.
    if payload.theme_color.len() < DEFAULT_THEME_COLOR.len() {
        return Err(ValidationError::InvalidThemeColor {
            color: payload.theme_color.clone(),
            expected: DEFAULT_THEME_COLOR.len(),
        });
    }

    if payload.title.is_empty() {
        return Err(ValidationError::EmptyField("message title"));
    }

    if payload.target_links.len() > MAX_POTENTIAL_ACTIONS {
        return Err(ValidationError::TooManyTargetLinks {
            count: payload.target_links.len(),
            max: MAX_POTENTIAL_ACTIONS,
        });
    }

    Ok(())
}
