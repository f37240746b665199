use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use send2teams::Send2TeamsError;
use send2teams::args::Cli;
use send2teams::core::config::Config;
use send2teams::core::models::AppInfo;
use send2teams::features::{OutputMode, Reporter, deliver};
use send2teams::teams::{TeamsClient, build_card};
use tracing::debug;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    let app = AppInfo::current();
    let config = Config::from(cli);

    if config.show_version {
        print!("{}", app.branding());
        return ExitCode::SUCCESS;
    }

    send2teams::setup_logging(config.log_level());

    let client = match prepare(&config, &app) {
        Ok(client) => client,
        Err(Send2TeamsError::Validation(e)) => {
            eprint!("{}", app.branding());
            eprintln!("{}", Cli::command().render_help());
            eprintln!("failed to initialize application: {e}");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            if !config.silent_output {
                eprintln!("failed to initialize webhook client: {e}");
            }
            return ExitCode::FAILURE;
        }
    };

    let mut reporter = Reporter::stdio(OutputMode::from_flags(
        config.silent_output,
        config.verbose_output,
    ));
    reporter.configuration(&config);

    let card = build_card(&config.payload(), &app);
    debug!("Built card for {} section(s)", card.section_count());

    let outcome = deliver(
        &client,
        &config.target(),
        &card,
        config.retry_policy(),
        &config,
        &mut reporter,
    )
    .await;

    ExitCode::from(outcome.exit_code())
}

/// Validate the configuration and set up the webhook client.
fn prepare(config: &Config, app: &AppInfo) -> send2teams::Result<TeamsClient> {
    config.validate()?;
    let client = TeamsClient::new(&format!("{}/{}", app.name, app.version))?;
    Ok(client.ignore_invalid_response(config.ignore_invalid_response))
}
