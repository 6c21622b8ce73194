mod cli;
mod dispatcher;

use clap::Parser;
use cli::{formatters, Cli, Commands};
use colored::Colorize;
use fundboard::error::Result;
use fundboard::{cache, config};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr so tables and JSON on stdout stay clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let mut settings = config::load_settings(cli.config.as_deref(), cli.data_dir.as_deref())?;
    if let Some(policy) = cli.on_malformed {
        settings.policy = policy;
    }

    info!("Resolving dashboard data from {:?}", settings.data_dir);

    let resolver = settings.resolver();
    let data = match cache::global().get_or_resolve(&resolver) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("{} {}", "💡".yellow(), err.hint());
            return Err(err.into());
        }
    };

    eprint!("{}", formatters::format_notices(&data.notices));

    let command = cli.command.unwrap_or(Commands::Summary);
    let output = dispatcher::render(command, &data, cli.json)?;
    println!("{}", output);

    Ok(())
}
