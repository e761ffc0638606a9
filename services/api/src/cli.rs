use crate::server;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tenancy::config::AppConfig;
use tenancy::error::AppError;
use tenancy::seed::SeedFile;

#[derive(Parser, Debug)]
#[command(
    name = "Tenancy Back Office",
    about = "Run the tenancy back office API or inspect its seed data",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with JSON seed files
    Seed {
        #[command(subcommand)]
        command: SeedCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SeedCommand {
    /// Validate a seed file's cross-references and print its record counts
    Check(SeedCheckArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load this seed file into the store before serving
    #[arg(long)]
    pub(crate) seed: Option<PathBuf>,
}

impl ServeArgs {
    /// Command-line flags win over the environment.
    pub(crate) fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(seed) = self.seed {
            config.store.seed_path = Some(seed);
        }
        config
    }
}

#[derive(Args, Debug)]
struct SeedCheckArgs {
    /// Path to the JSON seed file
    path: PathBuf,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Seed {
            command: SeedCommand::Check(args),
        } => check_seed(args),
    }
}

fn check_seed(args: SeedCheckArgs) -> Result<(), AppError> {
    let file = SeedFile::load(&args.path)?;
    let summary = file.check()?;
    println!("{}: {}", args.path.display(), summary);
    Ok(())
}
