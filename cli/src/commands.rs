use clap::Subcommand;
use promptpad_server::ServerConfig;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{AppConfig, CliFlags};

#[derive(Subcommand)]
pub enum Commands {
    /// Get CLI Version
    Version,
    /// Start the prompt editor server (the default when no command is given)
    Serve {
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
    },
}

impl Commands {
    pub async fn run(self) -> Result<(), String> {
        match self {
            Commands::Version => {
                println!(
                    "promptpad v{} (https://github.com/promptpad/promptpad)",
                    env!("CARGO_PKG_VERSION")
                );
                Ok(())
            }
            Commands::Serve {
                bind,
                prompts_file,
                config,
                open,
            } => serve(bind, prompts_file, config, open).await,
        }
    }
}

pub async fn serve(
    bind: Option<String>,
    prompts_file: Option<PathBuf>,
    config: Option<PathBuf>,
    open: bool,
) -> Result<(), String> {
    let flags = CliFlags { bind, prompts_file };
    let app_config = AppConfig::load(config.as_deref(), &flags)
        .map_err(|e| format!("Failed to load config: {}", e))?;
    debug!(
        "Serving {} on {}",
        app_config.prompts_file.display(),
        app_config.bind_address
    );

    let server_config: ServerConfig = app_config.into();

    let listener = tokio::net::TcpListener::bind(&server_config.bind_address)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", server_config.bind_address, e))?;
    let local_addr = listener
        .local_addr()
        .map_err(|e| format!("Failed to inspect listener address: {}", e))?;

    println!("Promptpad listening on http://{}", local_addr);

    if open {
        let url = format!("http://{}", local_addr);
        if let Err(e) = open::that(&url) {
            eprintln!("Failed to open browser at {}: {}", url, e);
        }
    }

    promptpad_server::start_server(server_config, Some(listener), None)
        .await
        .map_err(|e| format!("Server error: {}", e))
}
