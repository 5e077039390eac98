use anyhow::Result;
use cadence_core::db;
use cadence_core::error::CoreError;
use cadence_core::repository::SqliteRepository;
use clap::Parser;
use owo_colors::{OwoColorize, Style};
use tracing::{debug, warn};

mod cli;
mod commands;
mod config;
mod logging;
mod util;
mod views;

use cli::{Cli, Commands};
use config::Config;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = Config::new();
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::init(&config.log_level);
    if let Err(e) = &loaded {
        warn!("ignoring invalid configuration: {}", e);
    }

    if let Err(e) = run(cli, config).await {
        handle_error(e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::NextDate(command) => commands::next_date::print_next_date(command),
        Commands::Check(command) => commands::check::check_rule(command),
        command => {
            let db_path = cli.database.unwrap_or_else(|| config.database_path.clone());
            debug!(path = %db_path, "opening task database");
            let pool = db::establish_connection(&db_path).await?;
            let repository = SqliteRepository::new(pool);

            match command {
                Commands::Add(command) => commands::add::add_task(&repository, command).await,
                Commands::List(command) => {
                    commands::list::list_tasks(&repository, command, &config).await
                }
                Commands::Show(command) => commands::show::show_task(&repository, command).await,
                Commands::Edit(command) => commands::edit::edit_task(&repository, command).await,
                Commands::Delete(command) => {
                    commands::delete::delete_task(&repository, command).await
                }
                Commands::Done(command) => commands::done::done_task(&repository, command).await,
                Commands::NextDate(_) | Commands::Check(_) => {
                    unreachable!("handled without a database")
                }
            }
        }
    }
}

fn handle_error(err: anyhow::Error) {
    let error_style = Style::new().red().bold();

    if let Some(core_error) = err.downcast_ref::<CoreError>() {
        match core_error {
            CoreError::NotFound(id) => {
                eprintln!("{} Task with ID '{}' not found.", "Error:".style(error_style), id);
            }
            CoreError::InvalidInput(s) => {
                eprintln!("{} Invalid input: {}", "Error:".style(error_style), s);
            }
            CoreError::Database(e) => {
                eprintln!("{} Database error: {}", "Error:".style(error_style), e);
            }
            CoreError::Migration(e) => {
                eprintln!("{} Could not prepare the database: {}", "Error:".style(error_style), e);
            }
            _ => eprintln!("{} {}", "Error:".style(error_style), err),
        }
    } else {
        eprintln!("{} {}", "Error:".style(error_style), err);
    }
}
