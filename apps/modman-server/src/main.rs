use anyhow::Result;
use clap::{Parser, Subcommand};
use mimalloc::MiMalloc;
use modman_bootstrap::{AppConfig, AppConfigProvider, CliArgs};
use modules_management::ModulesManagementModule;

use std::path::{Path, PathBuf};

mod ingress;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// Modman Server - administrative GraphQL endpoint for module updates
#[derive(Parser)]
#[command(name = "modman-server")]
#[command(about = "Modman Server - administrative GraphQL endpoint for module updates")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port override for HTTP server (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Print effective configuration (YAML) and exit
    #[arg(long)]
    print_config: bool,

    /// Log verbosity level (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the server
    Run,
    /// Validate configuration and exit
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let args = CliArgs {
        port: cli.port,
        print_config: cli.print_config,
        verbose: cli.verbose,
    };

    // Layered config:
    // 1) defaults -> 2) YAML (if provided) -> 3) env (APP__*) -> 4) CLI overrides
    let mut config = AppConfig::load_or_default(cli.config.as_deref())?;
    config.apply_cli_overrides(&args);

    let logging_config = config.logging.clone().unwrap_or_default();
    modman_bootstrap::logging::init_logging(&logging_config, Path::new(&config.server.home_dir));

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "Modman Server starting");

    if args.print_config {
        println!("{}", config.to_yaml()?);
        return Ok(());
    }

    match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => run_server(config).await,
        Commands::Check => check_config(config),
    }
}

/// Build the module from its config entry; shared by `run` and `check`.
fn init_module(config: &AppConfig) -> Result<ModulesManagementModule> {
    let provider = AppConfigProvider::new(config.clone());
    let module = ModulesManagementModule::new();
    module.init(&provider)?;
    Ok(module)
}

async fn run_server(config: AppConfig) -> Result<()> {
    tracing::info!("Initializing modules…");
    let module = init_module(&config)?;

    let router = ingress::build_router(&config.server, &module)?;
    ingress::serve(
        router,
        &config.server.bind_addr(),
        modman_bootstrap::shutdown_signal(),
    )
    .await
}

fn check_config(config: AppConfig) -> Result<()> {
    tracing::info!("Checking configuration…");
    let module = init_module(&config)?;
    ingress::build_router(&config.server, &module)?;

    println!("Configuration is valid");
    println!("{}", config.to_yaml()?);
    Ok(())
}
