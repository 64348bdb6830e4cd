use anyhow::Context;
use bookshelf_kernel::settings::Settings;
use clap::{Parser, Subcommand};

/// Book catalog service
#[derive(Debug, Parser)]
#[command(name = "bookshelf", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// Override `server.port`
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the table definitions the service creates at startup
    Schema,
    /// Print the resolved configuration
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema => {
            for (module, def) in bookshelf_app::schema_definitions() {
                println!("-- {}/{}", module, def.id);
                println!("{}", def.ddl.trim());
            }
            Ok(())
        }
        Command::Config => {
            let settings = load_settings()?;
            print_settings(&settings);
            Ok(())
        }
        Command::Serve { port } => {
            let mut settings = load_settings()?;
            if let Some(port) = port {
                settings.server.port = port;
            }
            bookshelf_telemetry::init(&settings.telemetry);
            tracing::info!(env = ?settings.environment, "bookshelf CLI starting service");

            let runtime = tokio::runtime::Runtime::new().context("failed to start tokio runtime")?;
            runtime.block_on(bookshelf_app::run(settings))
        }
    }
}

fn load_settings() -> anyhow::Result<Settings> {
    Settings::load().with_context(|| "failed to load bookshelf settings")
}

fn print_settings(settings: &Settings) {
    println!("environment        = {}", settings.environment.as_str());
    println!("server.address     = {}", settings.server.bind_address());
    println!("server.timeout_ms  = {}", settings.server.request_timeout_ms);
    println!("database.backend   = {:?}", settings.database.backend);
    println!("database.url       = {}", settings.database.redacted_url());
    println!("database.pool_size = {}", settings.database.max_connections);
    println!("telemetry.format   = {:?}", settings.telemetry.log_format);
    println!("telemetry.filter   = {}", settings.telemetry.filter);
}
