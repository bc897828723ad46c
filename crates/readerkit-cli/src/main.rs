//! Reader MCP - expose Reader URL-to-content conversion to MCP clients

mod http;
mod stdio;

use clap::{Parser, Subcommand};
use readerkit::registry::tool_for_kind;
use readerkit::{Adapter, ReaderClient, ResponseKind, DEFAULT_BASE_URL, DEFAULT_PORT, TOOL_LLMTXT};
use serde_json::json;
use std::io::{self, Write};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Reader MCP - URL to LLM-friendly content tools
#[derive(Parser, Debug)]
#[command(name = "reader-mcp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the Reader engine
    #[arg(long, env = "READER_URL", default_value = DEFAULT_BASE_URL, global = true)]
    reader_url: String,

    /// Total timeout for one upstream request, in seconds
    #[arg(long, default_value_t = 60, global = true)]
    timeout_secs: u64,

    /// Custom User-Agent sent to the Reader engine
    #[arg(long, global = true)]
    user_agent: Option<String>,

    /// Port for the HTTP transport
    #[arg(long, env = "MCP_PORT", default_value_t = DEFAULT_PORT, global = true)]
    port: u16,

    /// Host for the HTTP transport
    #[arg(long, default_value = "0.0.0.0", global = true)]
    host: String,

    /// Print full help with examples (llmtxt)
    #[arg(long)]
    llmtxt: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Serve MCP over HTTP (default)
    Serve,
    /// Serve MCP over stdio
    Stdio,
    /// Fetch one URL through the Reader engine and print the result
    Fetch {
        /// URL to convert
        url: String,

        /// Representation to request
        #[arg(long, short, default_value = "markdown")]
        kind: ResponseKind,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle --llmtxt flag
    if cli.llmtxt {
        writeln_safe(TOOL_LLMTXT);
        std::process::exit(0);
    }

    init_tracing();

    let mut builder = ReaderClient::builder()
        .base_url(&cli.reader_url)
        .timeout(Duration::from_secs(cli.timeout_secs));
    if let Some(ua) = cli.user_agent {
        builder = builder.user_agent(ua);
    }

    let client = match builder.build() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(reader_url = client.base_url(), "Reader service configured");

    let adapter = Adapter::with_reader(client);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let addr = format!("{}:{}", cli.host, cli.port);
            if let Err(e) = http::serve(&addr, adapter).await {
                eprintln!("Error: failed to serve on {}: {}", addr, e);
                std::process::exit(1);
            }
        }
        Commands::Stdio => {
            if let Err(e) = stdio::run_server(adapter).await {
                eprintln!("Error: stdio transport failed: {}", e);
                std::process::exit(1);
            }
        }
        Commands::Fetch { url, kind } => run_fetch(&adapter, &url, kind).await,
    }
}

/// Log to stderr so stdout stays reserved for the stdio transport
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run_fetch(adapter: &Adapter, url: &str, kind: ResponseKind) {
    let tool = tool_for_kind(kind);
    let outcome = adapter.call_tool(tool.name, &json!({ "url": url })).await;

    if outcome.is_ok() {
        writeln_safe(outcome.text());
    } else {
        eprintln!("{}", outcome.text());
        std::process::exit(1);
    }
}

/// Write to stdout, exit silently on broken pipe
fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_kind_parses() {
        let cli = Cli::try_parse_from(["reader-mcp", "fetch", "example.com", "--kind", "pageshot"])
            .unwrap();
        match cli.command {
            Some(Commands::Fetch { url, kind }) => {
                assert_eq!(url, "example.com");
                assert_eq!(kind, ResponseKind::Pageshot);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_fetch_rejects_unknown_kind() {
        let result = Cli::try_parse_from(["reader-mcp", "fetch", "example.com", "--kind", "pdf"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "reader-mcp",
            "serve",
            "--port",
            "9001",
            "--reader-url",
            "http://reader:3000",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.port, 9001);
        assert_eq!(cli.reader_url, "http://reader:3000");
    }
}
