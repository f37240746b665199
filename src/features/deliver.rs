use std::fmt::Display;
use std::io::{self, Stderr, Stdout, Write};
use std::time::Duration;

use tracing::{error, info};

use crate::core::models::{DeliveryOutcome, WebhookTarget};
use crate::teams::card::CardDocument;
use crate::teams::client::{RetryPolicy, WEBHOOK_SEND_TIMEOUT, WebhookSender};

/// Total time allowed for every attempt plus the waits between them.
///
/// Saturates at [`Duration::MAX`] when the budget does not fit.
#[must_use]
pub fn submission_timeout(retries: u32, retry_delay: Duration) -> Duration {
    WEBHOOK_SEND_TIMEOUT
        .checked_mul(retries.saturating_add(1))
        .zip(retry_delay.checked_mul(retries))
        .and_then(|(attempts, waits)| attempts.checked_add(waits))
        .unwrap_or(Duration::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Silent,
    Normal,
    Verbose,
}

impl OutputMode {
    #[must_use]
    pub fn from_flags(silent: bool, verbose: bool) -> Self {
        if silent {
            Self::Silent
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }
}

/// User facing output for a run. Nothing is written in silent mode.
pub struct Reporter<O = Stdout, E = Stderr> {
    mode: OutputMode,
    out: O,
    err: E,
}

impl Reporter {
    #[must_use]
    pub fn stdio(mode: OutputMode) -> Self {
        Self::new(mode, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> Reporter<O, E> {
    pub fn new(mode: OutputMode, out: O, err: E) -> Self {
        Self { mode, out, err }
    }

    #[must_use]
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn into_parts(self) -> (O, E) {
        (self.out, self.err)
    }

    /// Dump the configuration in verbose mode.
    pub fn configuration(&mut self, config: &dyn Display) {
        if self.mode == OutputMode::Verbose {
            let _ = writeln!(self.err, "Configuration: {config}");
        }
    }

    pub fn success(&mut self, target: &WebhookTarget) {
        if self.mode != OutputMode::Silent {
            let _ = writeln!(
                self.out,
                "Message successfully sent to {:?} channel in the {:?} team",
                target.channel, target.team
            );
        }
    }

    pub fn failure(&mut self, target: &WebhookTarget, detail: &str, config: &dyn Display) {
        if self.mode == OutputMode::Silent {
            return;
        }
        let _ = writeln!(
            self.err,
            "\n\nERROR: Failed to submit message to {:?} channel in the {:?} team: {}\n",
            target.channel, target.team, detail
        );
        if self.mode == OutputMode::Verbose {
            let _ = writeln!(self.err, "[Config]: {config}\n[Error]: {detail}");
        }
    }
}

/// Send `card` to the target webhook and report how it went.
///
/// The returned outcome maps to the process exit status via
/// [`DeliveryOutcome::exit_code`].
pub async fn deliver<O: Write, E: Write>(
    sender: &dyn WebhookSender,
    target: &WebhookTarget,
    card: &CardDocument,
    policy: RetryPolicy,
    config: &dyn Display,
    reporter: &mut Reporter<O, E>,
) -> DeliveryOutcome {
    info!(
        "Submitting message to channel {:?} in team {:?} (retries={}, timeout={}s)",
        target.channel,
        target.team,
        policy.retries,
        policy.timeout.as_secs()
    );

    match sender.send(&target.url, card, policy).await {
        Ok(()) => {
            reporter.success(target);
            DeliveryOutcome::success()
        }
        Err(e) => {
            error!("Failed to submit message: {}", e);
            let detail = e.to_string();
            reporter.failure(target, &detail, config);
            DeliveryOutcome::failure(detail)
        }
    }
}
