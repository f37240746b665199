use clap::Parser;
use send2teams::args::Cli;
use send2teams::core::config::{Config, MAX_RETRIES_DELAY};
use send2teams::errors::ValidationError;

/// Tests for configuration validation as driven by command-line flags

const WEBHOOK_URL: &str = "https://outlook.office.com/webhook/a1269812-6d10-44b1-abc5-b84f93580ba0@9e7b80c7-d1eb-4b52-8582-76f921e416d9/IncomingWebhook/3fdd6767bae44ac58e5995547d66a4e4/f332c8d9-3397-4ac5-957b-b8e3fc465a8c";

fn config_from(extra: &[&str]) -> Config {
    let mut args = vec![
        "send2teams",
        "--team",
        "Ops",
        "--channel",
        "Alerts",
        "--url",
        WEBHOOK_URL,
    ];
    args.extend_from_slice(extra);
    Config::from(Cli::try_parse_from(args).unwrap())
}

#[test]
fn test_minimal_valid_invocation() {
    let config = config_from(&["--title", "Test", "--message", "Hello"]);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_silent_and_verbose_conflict_regardless_of_other_values() {
    let cases: [&[&str]; 3] = [
        &["--silent", "--verbose"],
        &["--silent", "--verbose", "--title", "Test", "--message", "Hello"],
        &[
            "--silent",
            "--verbose",
            "--color",
            "#1",
            "--retries",
            "-5",
            "--user-mention",
            "Jane,jane@example.com",
            "--target-url",
            "https://example.com,Example",
        ],
    ];

    for extra in cases {
        assert_eq!(
            config_from(extra).validate(),
            Err(ValidationError::ConflictingOutputMode),
            "args {extra:?}"
        );
    }

    let no_labels = Config::from(
        Cli::try_parse_from(["send2teams", "--silent", "--verbose"]).unwrap(),
    );
    assert_eq!(
        no_labels.validate(),
        Err(ValidationError::ConflictingOutputMode)
    );
}

#[test]
fn test_mention_mode_rejects_target_url() {
    let config = config_from(&[
        "--message",
        "Hello",
        "--user-mention",
        "Jane Doe,jane@example.com",
        "--target-url",
        "https://example.com/run/1,Run 1",
    ]);
    assert_eq!(
        config.validate(),
        Err(ValidationError::IncompatibleOption("target-url"))
    );
}

#[test]
fn test_mention_mode_accepts_plain_message() {
    let config = config_from(&[
        "--message",
        "Hello",
        "--user-mention",
        "Jane Doe,jane@example.com",
    ]);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn test_required_fields() {
    assert_eq!(
        config_from(&["--message", "Hello"]).validate(),
        Err(ValidationError::EmptyField("message title"))
    );
    assert_eq!(
        config_from(&["--title", "Test"]).validate(),
        Err(ValidationError::EmptyField("message content"))
    );
}

#[test]
fn test_too_many_target_urls() {
    let config = config_from(&[
        "--title",
        "Test",
        "--message",
        "Hello",
        "--target-url",
        "https://example.com/1,1",
        "--target-url",
        "https://example.com/2,2",
        "--target-url",
        "https://example.com/3,3",
        "--target-url",
        "https://example.com/4,4",
        "--target-url",
        "https://example.com/5,5",
    ]);
    assert_eq!(
        config.validate(),
        Err(ValidationError::TooManyTargetLinks { count: 5, max: 4 })
    );
}

#[test]
fn test_negative_retries_are_rejected() {
    let config = config_from(&["--title", "Test", "--message", "Hello", "--retries", "-1"]);
    assert_eq!(
        config.validate(),
        Err(ValidationError::NegativeValue {
            field: "retries",
            value: -1
        })
    );
}

#[test]
fn test_oversized_retry_delay_is_rejected() {
    let config = config_from(&[
        "--title",
        "Test",
        "--message",
        "Hello",
        "--retries",
        "3",
        "--retries-delay",
        "9223372036854775807",
    ]);
    assert_eq!(
        config.validate(),
        Err(ValidationError::ValueTooLarge {
            field: "retries delay",
            value: i64::MAX,
            max: MAX_RETRIES_DELAY,
        })
    );
    // Building the policy must not panic even for values validation rejects.
    assert_eq!(config.retry_policy().timeout, std::time::Duration::MAX);
}

#[test]
fn test_mention_mode_rejects_code_block() {
    let config = config_from(&[
        "--message",
        "Hello",
        "--user-mention",
        "Jane Doe,jane@example.com",
        "--code-block",
        "{\"status\":\"ok\"}",
    ]);
    assert_eq!(
        config.validate(),
        Err(ValidationError::IncompatibleOption("code-block"))
    );
}

#[test]
fn test_mention_mode_rejects_custom_color() {
    let config = config_from(&[
        "--message",
        "Hello",
        "--user-mention",
        "Jane Doe,jane@example.com",
        "--color",
        "#FF0000",
    ]);
    assert_eq!(
        config.validate(),
        Err(ValidationError::IncompatibleOption("color"))
    );

    let default_color = config_from(&[
        "--message",
        "Hello",
        "--user-mention",
        "Jane Doe,jane@example.com",
        "--color",
        "#832561",
    ]);
    assert_eq!(default_color.validate(), Ok(()));
}

#[test]
fn test_malformed_pair_flag_is_a_parse_error() {
    let result = Cli::try_parse_from(["send2teams", "--user-mention", "nobody"]);
    assert!(result.is_err());
}

#[test]
fn test_disabled_webhook_validation_passes_url_through() {
    let args = [
        "send2teams",
        "--team",
        "Ops",
        "--channel",
        "Alerts",
        "--url",
        "http://127.0.0.1:8080/custom",
        "--title",
        "Test",
        "--message",
        "Hello",
        "--disable-webhook-validation",
    ];
    let config = Config::from(Cli::try_parse_from(args).unwrap());
    assert_eq!(config.validate(), Ok(()));
    assert_eq!(config.target().url, "http://127.0.0.1:8080/custom");
}
