use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tower_lsp::{LspService, Server};
use tracing::info;

use tentiris_language_server::backend::TentirisBackend;
use tentiris_language_server::logging;

#[derive(Debug, Parser)]
#[command(
    name = "tentiris-language-server",
    about = "Language server for Markdown documents",
    version
)]
struct Cli {
    /// Serve a single client over TCP instead of stdio
    #[arg(long)]
    tcp: bool,

    /// Bind to this address when serving over TCP
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind to this port when serving over TCP
    #[arg(long, default_value_t = 32123)]
    port: u16,

    /// Override the log level (otherwise RUST_LOG, defaulting to "info")
    #[arg(long)]
    log_level: Option<String>,

    /// Disable ANSI colors on stderr
    #[arg(long)]
    no_color: bool,

    /// Disable the session log file
    #[arg(long)]
    no_file_log: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init_logger(cli.no_color, cli.log_level.as_deref(), !cli.no_file_log)?;

    let (service, socket) = LspService::new(TentirisBackend::new);

    if cli.tcp {
        let listener = TcpListener::bind((cli.host.as_str(), cli.port)).await?;
        info!("Listening on {}:{}", cli.host, cli.port);
        let (stream, peer) = listener.accept().await?;
        info!("Client connected from {}", peer);
        let (read, write) = stream.into_split();
        Server::new(read, write, socket).serve(service).await;
    } else {
        Server::new(tokio::io::stdin(), tokio::io::stdout(), socket)
            .serve(service)
            .await;
    }

    Ok(())
}
