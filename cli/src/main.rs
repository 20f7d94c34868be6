use clap::Parser;
use std::{env, path::Path, path::PathBuf};

mod commands;
mod config;

use commands::Commands;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "promptpad")]
#[command(about = "Single-user web editor for a library of named prompts", long_about = None)]
struct Cli {
    /// Bind address, e.g. 127.0.0.1:3000
    #[arg(long)]
    bind: Option<String>,

    /// Path of the prompts JSON file
    #[arg(long)]
    prompts_file: Option<PathBuf>,

    /// Path of the config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the editor in the default browser after startup
    #[arg(long, default_value_t = false)]
    open: bool,

    /// Run in a specific directory
    #[arg(short = 'w', long = "workdir")]
    workdir: Option<String>,

    /// Enable debug output
    #[arg(long = "debug", default_value_t = false)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(workdir) = cli.workdir {
        let workdir = Path::new(&workdir);
        if let Err(e) = env::set_current_dir(workdir) {
            eprintln!("Failed to set current directory: {}", e);
            std::process::exit(1);
        }
    }

    if cli.debug {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| format!("error,{}=debug", env!("CARGO_CRATE_NAME")).into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let result = match cli.command {
        Some(command) => command.run().await,
        None => commands::serve(cli.bind, cli.prompts_file, cli.config, cli.open).await,
    };

    if let Err(e) = result {
        eprintln!("Ops! something went wrong: {}", e);
        std::process::exit(1);
    }
}
