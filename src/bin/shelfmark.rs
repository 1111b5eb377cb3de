use clap::{Parser, Subcommand};
use shelfmark::ShelfmarkConfig;
use tracing::Level;

mod commands;

use commands::{AddArgs, ListArgs, RemoveArgs};

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(propagate_version = true)]
struct Cli {
    /// configuration file path, by default $HOME/.shelfmark/shelfmark.toml is used
    #[clap(short, long)]
    config: Option<String>,

    /// Database file path, overriding the configured data directory
    #[clap(long)]
    db: Option<String>,

    /// Print debug information
    #[clap(long)]
    debug: bool,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Save a bookmark
    Add(AddArgs),

    /// List saved bookmarks
    List(ListArgs),

    /// Remove a bookmark
    Remove(RemoveArgs),

    /// Show database status
    Status,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();
    }

    let db_path = match &cli.db {
        Some(path) => path.clone(),
        None => match ShelfmarkConfig::new(&cli.config) {
            Ok(config) => config.db_path(),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        },
    };

    let result = match cli.command {
        Commands::Add(args) => commands::run_add(&db_path, args),
        Commands::List(args) => commands::run_list(&db_path, args),
        Commands::Remove(args) => commands::run_remove(&db_path, args),
        Commands::Status => commands::run_status(&db_path),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
