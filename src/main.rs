use bizdays::config::AppConfig;
use bizdays::holidays::HolidayCache;
use bizdays::server::ApiServer;
use bizdays::BusinessDayCalculator;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, trace, warn};

/// Add business days to a date, skipping weekends and national holidays
#[derive(Parser)]
#[command(name = "bizdays")]
#[command(about = "Business day calculator", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace, -vvv for all)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to configuration file (defaults to ./bizdays.toml when present)
    #[arg(short = 'c', long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API (default command)
    Serve {
        /// Address to bind (overrides configuration)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides configuration)
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Compute a single end date and print it
    Calculate {
        /// Start date in YYYY-MM-DD format
        #[arg(short = 's', long)]
        start_date: String,

        /// Number of business days to add, counting the start date
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        business_days: i64,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    init_tracing(cli.verbose, &config.log_level);

    debug!("bizdays started with verbosity level: {}", cli.verbose);
    trace!("Effective configuration: {:?}", config);

    let result = match cli.command {
        Some(Commands::Calculate {
            start_date,
            business_days,
        }) => run_calculate(&config, &start_date, business_days).await,
        Some(Commands::Serve { host, port }) => run_serve(config, host, port).await,
        None => run_serve(config, None, None).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_tracing(verbose: u8, configured_level: &str) {
    let log_level = match verbose {
        0 => configured_level.to_lowercase(),
        1 => "debug".to_string(),
        2 => "trace".to_string(),
        _ => "trace,hyper=debug,tower=debug".to_string(), // -vvv shows everything including dependencies
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(verbose >= 2)
        .with_thread_ids(verbose >= 3)
        .with_line_number(verbose >= 3)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_serve(
    mut config: AppConfig,
    host: Option<String>,
    port: Option<u16>,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    config.validate()?;

    let calculator = BusinessDayCalculator::from_config(&config, HolidayCache::new())?;
    ApiServer::new(Arc::new(calculator), config.bind_address())
        .start()
        .await
}

async fn run_calculate(
    config: &AppConfig,
    start_date: &str,
    business_days: i64,
) -> anyhow::Result<()> {
    let calculator = BusinessDayCalculator::from_config(config, HolidayCache::new())?;
    let end_date = calculator
        .calculate_end_date(start_date, business_days)
        .await?;

    for failure in calculator.provider().failures().await {
        warn!(
            "Holidays for {} unavailable ({}); result assumes none",
            failure.year, failure.reason
        );
    }

    println!("{end_date}");
    Ok(())
}
