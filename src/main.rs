use clap::Parser;
use salebook::args::{Args, Command};
use salebook::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().home().path();

    // Every command except init needs an initialized home directory.
    let _: () = match args.command().clone() {
        Command::Init => commands::init(home).await?.print(),
        Command::Add(add_args) => commands::add_sale(Config::load(home).await?, add_args)
            .await?
            .print(),
        Command::Update(update_args) => {
            commands::update_sale(Config::load(home).await?, update_args)
                .await?
                .print()
        }
        Command::Delete(delete_args) => {
            commands::delete_sale(Config::load(home).await?, delete_args)
                .await?
                .print()
        }
        Command::List(list_args) => commands::list_sales(Config::load(home).await?, list_args)
            .await?
            .print(),
        Command::Summary(summary_args) => {
            commands::summary(Config::load(home).await?, summary_args)
                .await?
                .print()
        }
        Command::Chart(chart_args) => commands::chart(Config::load(home).await?, chart_args)
            .await?
            .print(),
        Command::Export(export_args) => commands::export(Config::load(home).await?, export_args)
            .await?
            .print(),
        Command::Price(price_args) => commands::price(Config::load(home).await?, price_args)
            .await?
            .print(),
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "{}={},{}={}",
                env!("CARGO_CRATE_NAME"),
                level,
                env!("CARGO_BIN_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
