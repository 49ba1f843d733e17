use std::path::PathBuf;

use {
    clap::Parser,
    tracing::info,
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

use {
    parlance_domain::load_domain,
    parlance_server::server::{DEFAULT_PORT, ServerOptions, start_server},
};

#[derive(Parser)]
#[command(name = "parlance", about = "parlance — templated NLG endpoint server")]
struct Cli {
    /// Port to run the server at.
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Path of the domain file to load responses from.
    #[arg(short, long)]
    domain: PathBuf,

    /// Interface to bind the listener to.
    #[arg(long, default_value = "0.0.0.0")]
    bind: String,

    /// Path of the file containing the ssl private key.
    #[arg(long)]
    keyfile: Option<PathBuf>,

    /// Path of the file containing the ssl certificate.
    #[arg(long)]
    certfile: Option<PathBuf>,

    /// Path of a file containing root certificates for client verification.
    #[arg(long)]
    ca_certs: Option<PathBuf>,

    /// TLS protocol version to accept (tls12, tls13).
    #[arg(long)]
    ssl_version: Option<String>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, default_value_t = false)]
    json_logs: bool,
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "parlance starting");

    #[cfg(not(feature = "tls"))]
    if cli.keyfile.is_some() || cli.certfile.is_some() || cli.ca_certs.is_some() {
        anyhow::bail!("this build has no tls support; rebuild with the `tls` feature");
    }
    #[cfg(not(feature = "tls"))]
    let _ = cli.ssl_version;

    let domain = load_domain(&cli.domain)?;

    let opts = ServerOptions {
        bind: cli.bind,
        port: cli.port,
        #[cfg(feature = "tls")]
        tls: parlance_server::tls::TlsOptions {
            keyfile: cli.keyfile,
            certfile: cli.certfile,
            ca_certs: cli.ca_certs,
            ssl_version: cli.ssl_version,
        },
    };

    start_server(domain, opts).await
}
