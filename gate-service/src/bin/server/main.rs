use std::io::BufRead;

use basic_auth::htpasswd;
use clap::Parser;
use clap::Subcommand;
use gate_service::authenticator::build_authenticator;
use gate_service::authenticator::build_hasher;
use gate_service::config::Config;
use gate_service::inbound::http::router::create_router;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Debug, Parser)]
#[command(name = "gate-service", version, about = "HTTP Basic auth gate")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Print a credential file line for a password read from stdin
    Hash { username: String },
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gate_service=debug,basic_auth=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::load()?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::Hash { username } => hash(&config, &username),
    }
}

async fn serve(config: Config) -> Result<(), anyhow::Error> {
    tracing::info!(
        service = "gate-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    tracing::info!(
        http_port = config.server.http_port,
        realm = %config.auth.realm,
        htpasswd_file = ?config.auth.htpasswd_file,
        strict_reload = config.auth.strict_reload,
        "Configuration loaded"
    );

    let hasher = build_hasher(&config.hashing)?;
    let authenticator = build_authenticator(&config.auth, &hasher)?;

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(authenticator, config.auth.strict_reload);

    if let Err(e) = axum::serve(http_listener, http_application).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}

fn hash(config: &Config, username: &str) -> Result<(), anyhow::Error> {
    if username.is_empty() || username.contains(':') {
        anyhow::bail!("username must be non-empty and must not contain ':'");
    }

    let mut password = String::new();
    std::io::stdin().lock().read_line(&mut password)?;
    let password = password.trim_end_matches(['\r', '\n']);

    let digest = build_hasher(&config.hashing)?.hash(password)?;
    println!("{}", htpasswd::format_record(username, &digest));

    Ok(())
}
