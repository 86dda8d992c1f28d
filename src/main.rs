use anyhow::Result;
use clap::Parser;
use status_cli::commands::{self, Context};
use status_cli::config::Config;
use status_cli::display::Palette;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

/// status-cli - third-party service status at a glance
///
/// Queries the public status-page APIs of services such as GitHub,
/// Cloudflare or Figma and prints their current state.
///
/// Examples:
///   status-cli one github     # Full report for GitHub
///   status-cli all            # One line per known service
#[derive(Parser, Debug)]
#[command(author, version = env!("STATUS_CLI_VERSION"), about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Timeout of each request attempt, in seconds
    #[arg(
        long,
        short = 't',
        env = "STATUS_CLI_TIMEOUT",
        value_name = "SECS",
        default_value_t = 10,
        global = true
    )]
    pub timeout: u64,

    /// Retries after a network failure or a 5xx response
    #[arg(
        long,
        env = "STATUS_CLI_RETRIES",
        value_name = "N",
        default_value_t = 0,
        global = true
    )]
    pub retries: usize,

    /// JSON file of extra services ({"name": "url"}); also via STATUS_CLI_SERVICES
    #[arg(long, env = "STATUS_CLI_SERVICES", value_name = "PATH", global = true)]
    pub services: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log HTTP responses
    #[arg(long, short = 'd', global = true)]
    pub debug: bool,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Show the full status of a single service
    One(OneArgs),

    /// Show a one-line status for every known service
    All,

    /// List known services and their status URLs
    List,
}

#[derive(clap::Args, Debug)]
pub struct OneArgs {
    /// Service name; prompts for one when omitted
    #[arg(value_name = "SERVICE")]
    pub service: Option<String>,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            timeout: Duration::from_secs(self.timeout),
            retries: self.retries,
            services_file: self.services.clone(),
            color: !self.no_color,
            debug: self.debug,
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let default_filter = if cli.debug { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let config = cli.config();
    let catalog = config.load_catalog()?;

    if let Commands::List = cli.command {
        commands::list(&catalog, &mut io::stdout())?;
        return Ok(ExitCode::SUCCESS);
    }

    let ctx = Context {
        client: config.build_status_client()?,
        catalog,
        palette: Palette::new(config.color),
        debug: config.debug,
    };

    match &cli.command {
        Commands::One(args) => {
            let service = commands::resolve_service(
                &ctx.catalog,
                args.service.as_deref(),
                &mut io::stdin().lock(),
                &mut io::stdout(),
            )?;
            let ok = commands::one(&ctx, &service, &mut io::stdout(), &mut io::stderr()).await?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
        Commands::All => {
            commands::all(&ctx, &mut io::stdout(), &mut io::stderr()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::List => Ok(ExitCode::SUCCESS),
    }
}
