use std::{io, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use library_catalog::{LibraryConfig, LibraryService, menu};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the library catalog
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Catalog file to load at startup and write on save
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print catalog listings as JSON lines
    #[arg(long)]
    json: bool,

    /// Save the catalog when the session exits
    #[arg(long)]
    save_on_exit: bool,

    /// Enable verbose output with detailed operation logs
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => LibraryConfig::load(path)?,
        None => LibraryConfig::default(),
    };
    if let Some(path) = args.catalog {
        config.catalog_path = path;
    }
    config.save_on_exit |= args.save_on_exit;
    if args.verbose {
        config.log_filter = "debug".to_string();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.log_filter)?)
        .with_writer(io::stderr)
        .init();

    let mut service = LibraryService::new();
    match service.load_catalog_path(&config.catalog_path) {
        Ok(count) => println!("Loaded {count} books from {}", config.catalog_path.display()),
        Err(e) => eprintln!("{} {e}", "Error loading catalog:".red().bold()),
    }

    let options = menu::MenuOptions {
        catalog_path: config.catalog_path,
        json: args.json,
        save_on_exit: config.save_on_exit,
    };
    menu::run(&mut service, &options, io::stdin().lock(), io::stdout().lock())?;
    Ok(())
}
