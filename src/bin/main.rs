use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use hello_mcp::logging::{self, DEFAULT_FILTER};
use hello_mcp::{CONFIG_ENV, DrainingReader, ServerConfig, create_server};
use tracing::{error, info};

// rmcp imports for MCP stdio server mode
use rmcp::service::ServiceExt;

/// Exit status when the server cannot start.
const FATAL_EXIT_CODE: u8 = 1;

#[derive(Parser)]
#[command(name = "hello-mcp")]
#[command(about = "Hello world MCP server over stdio")]
struct Cli {
    /// Path to a JSON config file with the server identity
    #[arg(long, env = CONFIG_ENV)]
    config: Option<PathBuf>,
    /// Log filter directives, written to stderr
    #[arg(long, env = "HELLO_MCP_LOG", default_value = DEFAULT_FILTER)]
    log_filter: String,
    /// Print the advertised tools as JSON and exit
    #[arg(long, default_value_t = false)]
    list_tools: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = logging::init(&cli.log_filter) {
        eprintln!("Invalid log filter `{}`: {}", cli.log_filter, e);
        return ExitCode::from(FATAL_EXIT_CODE);
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Fatal error: {:#}", e);
            ExitCode::from(FATAL_EXIT_CODE)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = ServerConfig::load(cli.config.as_deref())?;
    let server = create_server(config);

    if cli.list_tools {
        let tools = server.list_tools_result().tools;
        println!("{}", serde_json::to_string_pretty(&tools)?);
        return Ok(());
    }

    info!(
        "Starting server {} v{} with tools: {}",
        server.config().name,
        server.config().version,
        server.tool_registry().list_names().join(", ")
    );

    // Run as an MCP stdio server. HelloServer implements ServerHandler.
    // EOF on stdin is held back until pending tool calls have answered.
    let stdin = DrainingReader::new(tokio::io::stdin(), server.in_flight().clone());
    let service = server
        .serve((stdin, tokio::io::stdout()))
        .await
        .inspect_err(|e| error!("serving error: {:?}", e))?;
    info!("Server connected and running");

    // Block until the MCP session ends.
    service.waiting().await?;
    info!("Server session ended");

    Ok(())
}
