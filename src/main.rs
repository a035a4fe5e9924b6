mod access;
mod cli;
mod db;
mod error;
mod fmt;
mod importer;
mod models;
#[cfg(feature = "pdf")]
mod pdf;
mod reports;
mod settings;
mod store;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands, Session};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init {
            data_dir,
            email,
            name,
            business,
        } => cli::init::run(data_dir, &email, name, business),
        Commands::Check { file, month } => cli::check::run(&file, month.as_deref()),
        Commands::Demo => cli::check::demo(),
        Commands::Import { file, source } => {
            Session::open().and_then(|s| cli::import::run(&s, &file, &source))
        }
        Commands::Summary { month } => Session::open().and_then(|s| cli::summary::run(&s, month)),
        Commands::History => Session::open().and_then(|s| cli::history::run(&s)),
        #[cfg(feature = "pdf")]
        Commands::Export { month, output } => {
            Session::open().and_then(|s| cli::export::run(&s, &month, output))
        }
        Commands::Unlock { licence_key } => {
            Session::open().and_then(|s| cli::unlock::run(&s, &licence_key))
        }
        Commands::SaleEvent { payload, token } => {
            Session::open().and_then(|s| cli::unlock::sale_event(&s, &payload, token.as_deref()))
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
