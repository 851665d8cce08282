use anyhow::Context;
use bookshelf_kernel::Settings;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "bookshelf-cli", version, about = "Bookshelf service tooling")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP server
    Serve {
        /// Override `server.host`
        #[arg(long)]
        host: Option<String>,
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
        /// Override `server.api_prefix`
        #[arg(long)]
        api_prefix: Option<String>,
    },
    /// Print the merged OpenAPI document to stdout
    Openapi {
        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::load().with_context(|| "failed to load bookshelf settings")?;

    match cli.command {
        Command::Serve {
            host,
            port,
            api_prefix,
        } => {
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(api_prefix) = api_prefix {
                settings.server.api_prefix = api_prefix;
            }

            bookshelf_telemetry::init(&settings.telemetry)
                .context("failed to initialize telemetry")?;
            tracing::info!(env = ?settings.environment, "bookshelf-cli serve");

            let runtime = tokio::runtime::Runtime::new().context("failed to start runtime")?;
            runtime.block_on(bookshelf_app::run(settings))
        }
        Command::Openapi { pretty } => {
            let registry = bookshelf_app::build_registry(&settings);
            let spec = bookshelf_http::openapi::collect(&registry, &settings.server.api_prefix);
            let rendered = if pretty {
                serde_json::to_string_pretty(&spec)?
            } else {
                serde_json::to_string(&spec)?
            };
            println!("{}", rendered);
            Ok(())
        }
    }
}
