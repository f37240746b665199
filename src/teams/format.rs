//! Text helpers for Teams message content.
//!
//! Teams renders `<br>` as a line break and understands Markdown code
//! fences and inline code spans.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::PrettyFormatter;
use tracing::debug;

use crate::errors::FormattingError;

/// Line break markup understood by Teams.
pub const BREAK_STATEMENT: &str = "<br>";

// Order matters: the Windows sequence has to go before its Mac and Unix
// halves are replaced on their own.
const EOL_SEQUENCES: [&str; 6] = [
    "\r\n",   // windows
    r"\r\n", // windows, escaped
    "\r",     // mac
    r"\r",   // mac, escaped
    "\n",     // unix
    r"\n",   // unix, escaped
];

// The newlines inside the fence are not shown by Teams itself but other
// MessageCard renderers use them to lay out the code block.
const CODE_BLOCK_PREFIX: &str = "\n```\n";
const CODE_BLOCK_SUFFIX: &str = "```\n";
const CODE_SNIPPET_PREFIX: &str = "`";
const CODE_SNIPPET_SUFFIX: &str = "`";

/// Convert Windows, Mac and Unix line endings, both literal and typed as
/// backslash escapes, into `<br>` statements.
#[must_use]
pub fn convert_eol_to_break(text: &str) -> String {
    EOL_SEQUENCES
        .iter()
        .fold(text.to_string(), |acc, eol| acc.replace(eol, BREAK_STATEMENT))
}

/// Format `input` as a Markdown code block.
///
/// # Errors
///
/// Returns [`FormattingError::EmptyInput`] for an empty string, or
/// [`FormattingError::MarshalFailure`] if the text cannot be re-encoded.
pub fn format_as_code_block(input: &str) -> Result<String, FormattingError> {
    format_as_code(input, CODE_BLOCK_PREFIX, CODE_BLOCK_SUFFIX)
}

/// Format `input` as a single line inline code span.
///
/// # Errors
///
/// Same as [`format_as_code_block`].
pub fn format_as_code_snippet(input: &str) -> Result<String, FormattingError> {
    format_as_code(input, CODE_SNIPPET_PREFIX, CODE_SNIPPET_SUFFIX)
}

/// Like [`format_as_code_block`], but falls back to the unformatted input.
#[must_use]
pub fn try_format_as_code_block(input: &str) -> String {
    format_as_code_block(input).unwrap_or_else(|e| {
        debug!("try_format_as_code_block: returning original string: {}", e);
        input.to_string()
    })
}

/// Like [`format_as_code_snippet`], but falls back to the unformatted input.
#[must_use]
pub fn try_format_as_code_snippet(input: &str) -> String {
    format_as_code_snippet(input).unwrap_or_else(|e| {
        debug!("try_format_as_code_snippet: returning original string: {}", e);
        input.to_string()
    })
}

fn format_as_code(input: &str, prefix: &str, suffix: &str) -> Result<String, FormattingError> {
    if input.is_empty() {
        return Err(FormattingError::EmptyInput);
    }

    // JSON input is only re-indented, never double encoded.
    let formatted = match serde_json::from_str::<Value>(input) {
        Ok(value) => {
            debug!("input already valid JSON");
            to_tab_indented_json(&value)?
        }
        Err(_) => {
            debug!("input not valid JSON, encoding as JSON string");
            to_tab_indented_json(&input)?
        }
    };

    let content = strip_surrounding_quotes(&formatted);
    debug!("code content for submission: {:?}", content);

    Ok(format!("{prefix}{content}{suffix}"))
}

fn to_tab_indented_json<T: Serialize + ?Sized>(value: &T) -> Result<String, FormattingError> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut ser)?;
    // serde_json only ever writes valid UTF-8
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Drop the quotes left by JSON string encoding. Text not quoted on both
/// ends is kept as is.
fn strip_surrounding_quotes(text: &str) -> &str {
    if text.len() < 2 {
        return text;
    }
    match (text.starts_with('"'), text.ends_with('"')) {
        (true, true) => &text[1..text.len() - 1],
        (false, false) => text,
        _ => {
            debug!("formatted text is not symmetrically quoted: {:?}", text);
            text
        }
    }
}
