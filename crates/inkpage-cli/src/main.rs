//! Inkpage CLI: the `inkpage` command.

mod cli;
mod commands;
mod config;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

fn main() {
    let cli = Cli::parse();
    let config = support::load_config_or_exit(cli.config.as_deref());
    init_logging(cli.log_level.as_deref().unwrap_or(&config.log.level));

    match cli.command {
        Commands::Validate { spec, json } => commands::validate::run(spec, json),

        Commands::Vocabulary { spec, json } => commands::vocabulary::run(spec, json),

        Commands::Compile {
            spec,
            style_hint,
            json,
        } => commands::compile::run(spec, style_hint, &config, json),

        Commands::Detect {
            spec,
            prompt,
            revised,
            min_confidence,
            fail_on_warning,
            json,
        } => commands::detect::run(
            commands::detect::Args {
                spec,
                prompt,
                revised,
                min_confidence,
                fail_on_warning,
                json,
            },
            &config,
        ),

        Commands::Generate {
            spec,
            replay,
            style_hint,
            min_confidence,
            fail_on_warning,
            json,
        } => commands::generate::run(
            commands::generate::Args {
                spec,
                replay,
                style_hint,
                min_confidence,
                fail_on_warning,
                json,
            },
            &config,
        ),
    }
}
