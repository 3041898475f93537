use crate::{
    env::EnvManager,
    error::CliError,
    shutdown::{ExitCode, ShutdownCoordinator},
};
use clap::Parser;
use commands::Commands;
use engine_config::settings::{Settings, SettingsOverrides, keys};
use engine_runtime::execution::executor;
use model::core::window::TimeWindow;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod output;
mod shutdown;

#[derive(Parser)]
#[command(
    name = "orderwatch",
    version,
    about = "Fetch a window of orders and filter them into report rows"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    // Logs go to stderr; stdout carries the JSON hand-off
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let shutdown = ShutdownCoordinator::new(CancellationToken::new());
    shutdown.register_handlers();

    let code = match execute(cli.command, &shutdown).await {
        Ok(()) => ExitCode::Success,
        Err(err) if err.is_cancelled() || shutdown.is_shutdown_requested() => {
            warn!("Run cancelled: {err}");
            ExitCode::ShutdownRequested
        }
        Err(err) => {
            error!("{err}");
            ExitCode::GeneralError
        }
    };

    std::process::exit(code.as_i32());
}

async fn execute(command: Commands, shutdown: &ShutdownCoordinator) -> Result<(), CliError> {
    match command {
        Commands::Run {
            from,
            to,
            cities,
            variant,
            strict_cities,
            env_file,
            output,
        } => {
            let window = TimeWindow::parse(&from, &to)?;
            let env = load_env(env_file.as_deref())?;
            let overrides = SettingsOverrides {
                cities,
                variant,
                strict_cities,
            };
            let settings = Settings::from_env_with(env.all(), overrides)?;

            let result = executor::run(&settings, window, shutdown.cancel_token()).await?;

            match output {
                Some(path) => {
                    output::write_output(&result, &path).await?;
                    info!(path = %path, rows = result.rows.len(), "Wrote report rows");
                }
                None => output::print_output(&result).await?,
            }
        }
        Commands::Config { env_file } => {
            let env = load_env(env_file.as_deref())?;
            for key in keys::ALL {
                println!("{key}={}", env.display_value(key));
            }

            Settings::from_env(env.all())?;
            println!("# configuration OK");
        }
    }

    Ok(())
}

fn load_env(env_file: Option<&str>) -> Result<EnvManager, CliError> {
    let mut env = EnvManager::new();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }
    Ok(env)
}
