use clap::Parser;
use dotenvy::dotenv;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use nuboard_console::cli::Cli;
use nuboard_console::config::Config;
use nuboard_console::handlers::{run, Outcome};

/// Exit code used when the session gate redirects instead of rendering.
const REDIRECT_EXIT: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.apply(Config::from_env());
    tracing::debug!(api_url = %config.api_url, "Console starting");

    match run(cli.command, &config).await {
        Ok(Outcome::Rendered(output)) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Ok(Outcome::Redirect(route)) => {
            println!("{route}");
            ExitCode::from(REDIRECT_EXIT)
        }
        Err(e) => {
            e.log();
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
