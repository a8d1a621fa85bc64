//! Folio CLI binary.
//!
//! This binary drives the Folio editor from the command line:
//! - Store and forget the bearer credential
//! - Show, create and delete book records
//! - Stream a generation into a field, with Ctrl-C to stop
//! - Export a book as Markdown or HTML

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands};

    // Parse command-line arguments
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    folio::init_console_telemetry(cli.verbose)?;

    let config = match &cli.config {
        Some(path) => folio::FolioConfig::from_file(path)?,
        None => folio::FolioConfig::load()?,
    };

    // Execute the requested command
    match cli.command {
        Commands::Login { token } => cli::login(&config, &token)?,
        Commands::Logout => cli::logout(&config)?,
        Commands::Show { id, field } => cli::show(&config, &id, field).await?,
        Commands::New { title, toc } => cli::create(&config, title, toc).await?,
        Commands::Delete { id } => cli::delete(&config, &id).await?,
        Commands::Generate {
            id,
            field,
            model,
            save,
        } => cli::generate(&config, &id, field, model, save).await?,
        Commands::GenerateOnce {
            id,
            field,
            model,
            save,
        } => cli::generate_once(&config, &id, field, model, save).await?,
        Commands::Export { id, format } => cli::export(&config, &id, format).await?,
    }

    Ok(())
}
