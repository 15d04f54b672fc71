//! eventkeeper CLI entry point.

use std::io::{self, Write};
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use eventkeeper_cli::cli::{Cli, Command};
use eventkeeper_cli::commands::{self, Printer};
use eventkeeper_cli::config::CliConfig;
use eventkeeper_cli::error::CliResult;
use eventkeeper_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Long-running watch sessions log at info level, as JSON lines.
    let tracing_config = match cli.command {
        _ if cli.debug => TracingConfig::cli_debug(),
        Command::Watch { .. } => TracingConfig::service(),
        _ => TracingConfig::cli(),
    };
    if let Err(e) = init_tracing(tracing_config) {
        eprintln!("warning: failed to initialize logging: {}", e);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    let config = CliConfig::from_cli(&cli);
    let mut manager = config.build_manager()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut printer = Printer::new(&mut out, cli.json);

    let result = match cli.command {
        Command::Create {
            id,
            name,
            location,
            start,
            end,
        } => commands::events::create(&mut manager, &mut printer, &id, &name, &location, start, end),
        Command::Show { id, weather } => {
            commands::events::show(&manager, &mut printer, &id, weather).await
        }
        Command::List => commands::events::list(&manager, &mut printer),
        Command::Update { id, set } => commands::events::update(&mut manager, &mut printer, &id, set),
        Command::Delete { id } => commands::events::delete(&mut manager, &mut printer, &id),
        Command::Attend { id, attendee } => {
            commands::attendees::attend(&mut manager, &mut printer, &id, &attendee)
        }
        Command::Attendees { id } => commands::attendees::attendees(&manager, &mut printer, &id),
        Command::Forecast { id } => commands::weather::forecast(&manager, &mut printer, &id).await,
        Command::Remind { hours, dry_run } => {
            commands::reminders::remind(&manager, &mut printer, hours, dry_run).await
        }
        Command::Watch { hours, interval } => {
            let shutdown = async {
                if let Err(e) = tokio::signal::ctrl_c().await {
                    error!(error = %e, "Failed to listen for Ctrl+C");
                    std::future::pending::<()>().await;
                }
                info!("Received Ctrl+C, initiating shutdown");
            };
            commands::reminders::watch(
                &mut manager,
                &mut printer,
                hours,
                Duration::from_secs(interval),
                shutdown,
            )
            .await
        }
    };

    out.flush()?;
    result
}
