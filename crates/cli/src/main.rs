//! Atelier CLI - content file management tools.
//!
//! # Usage
//!
//! ```bash
//! # Write starter content files into the content directory
//! atelier-cli seed --dir content
//!
//! # Validate every content file
//! atelier-cli check --dir content
//!
//! # Generate the ADMIN_PASSWORD_HASH value for the admin panel
//! atelier-cli admin hash-password
//! ```
//!
//! # Commands
//!
//! - `seed` - Write starter content files (skips files that already exist)
//! - `check` - Validate the content files the sites will serve
//! - `admin hash-password` - Hash an admin password for configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "atelier-cli")]
#[command(author, version, about = "Atelier CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write starter content files
    Seed {
        /// Content directory
        #[arg(short, long, default_value = "content")]
        dir: String,

        /// Overwrite files that already exist
        #[arg(long)]
        force: bool,
    },
    /// Validate the content files
    Check {
        /// Content directory
        #[arg(short, long, default_value = "content")]
        dir: String,
    },
    /// Admin panel setup
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Hash a password for `ADMIN_PASSWORD_HASH`
    HashPassword,
}

fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli);

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { dir, force } => commands::seed::run(dir.as_ref(), force)?,
        Commands::Check { dir } => commands::check::run(dir.as_ref())?,
        Commands::Admin { action } => match action {
            AdminAction::HashPassword => commands::admin::hash_password()?,
        },
    }
    Ok(())
}
