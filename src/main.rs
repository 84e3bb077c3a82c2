//! supportbot Server Entry Point

use clap::{Parser, Subcommand};
use supportbot::{Config, RulesetKind, SupportServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;

/// supportbot: Rule-Based Customer Support Chatbot
#[derive(Parser, Debug)]
#[command(name = "supportbot")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
        /// Emit logs as JSON lines
        #[arg(long)]
        json_logs: bool,
    },
    /// Classify a message and print the reply
    Classify {
        /// Message text
        text: String,
        /// Built-in ruleset (orders, certifications)
        #[arg(long)]
        ruleset: Option<RulesetKind>,
        /// TOML rule file (overrides --ruleset)
        #[arg(long)]
        rules_file: Option<String>,
        /// Show which rule matched and why
        #[arg(long)]
        explain: bool,
    },
    /// List the active rules in priority order
    Rules {
        /// Built-in ruleset (orders, certifications)
        #[arg(long)]
        ruleset: Option<RulesetKind>,
        /// TOML rule file (overrides --ruleset)
        #[arg(long)]
        rules_file: Option<String>,
    },
    /// Hash a password in the stored user format
    HashPassword {
        /// Password to hash
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let is_serve = matches!(args.command, Some(Command::Serve { .. }) | None);

    if !is_serve {
        // Minimal logging for CLI commands
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_writer(std::io::stderr)
            .init();
    }

    match args.command {
        Some(Command::Serve { port, json_logs }) => run_server(&args.config, port, json_logs).await,
        Some(Command::Classify {
            text,
            ruleset,
            rules_file,
            explain,
        }) => {
            let config = load_config(&args.config)?;
            let engine = cli::select_engine(&config, ruleset, rules_file)?;
            cli::run_classify(&engine, &text, explain, args.json)
        }
        Some(Command::Rules {
            ruleset,
            rules_file,
        }) => {
            let config = load_config(&args.config)?;
            let engine = cli::select_engine(&config, ruleset, rules_file)?;
            cli::run_rules(&engine, args.json)
        }
        Some(Command::HashPassword { password }) => {
            let config = load_config(&args.config)?;
            cli::run_hash_password(&config, &password)
        }
        None => run_server(&args.config, None, false).await,
    }
}

fn load_config(config_path: &Option<String>) -> anyhow::Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::from_file(path)?,
        None => Config::load()?,
    };
    config.apply_env_overrides()?;
    Ok(config)
}

async fn run_server(
    config_path: &Option<String>,
    port: Option<u16>,
    json_logs: bool,
) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if let Some(p) = port {
        config.server.port = p;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if json_logs || config.logging.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting supportbot v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        ruleset = %config.classifier.ruleset,
        rules_file = ?config.classifier.rules_file,
        auth = config.auth.enabled,
        rate_limit = config.rate_limit.enabled,
        "Configuration loaded"
    );

    let server = SupportServer::new(config).await?;
    server.run().await?;

    Ok(())
}
