//! Gemini CLI MCP Server — entry point.

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use gemini_cli_mcp::config::ServerConfig;
use gemini_cli_mcp::protocol::ProtocolHandler;
use gemini_cli_mcp::tools::ToolRegistry;
use gemini_cli_mcp::transport::StdioTransport;

#[derive(Parser)]
#[command(
    name = "gemini-cli-mcp",
    about = "MCP server exposing the Gemini CLI as a tool over stdio",
    version
)]
struct Cli {
    /// Gemini CLI executable (default: $GEMINI_CLI_PATH, then `gemini` on PATH).
    #[arg(long, global = true)]
    gemini: Option<String>,

    /// Maximum concurrent Gemini processes, 0 for unbounded
    /// (default: $GEMINI_MCP_MAX_CONCURRENT, then 4).
    #[arg(long, global = true)]
    max_concurrent: Option<usize>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start MCP server over stdio (default).
    Serve,

    /// Run a single prompt through the Gemini CLI and print the output.
    Run {
        /// Prompt text, passed to the tool unmodified.
        prompt: String,
    },

    /// Print server capabilities as JSON.
    Info,

    /// Generate shell completion scripts.
    ///
    /// Examples:
    ///   gemini-cli-mcp completions bash > /etc/bash_completion.d/gemini-cli-mcp
    ///   gemini-cli-mcp completions zsh > ~/.zfunc/_gemini-cli-mcp
    Completions {
        /// Shell type (bash, zsh, fish, powershell, elvish).
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::resolve(cli.gemini.as_deref(), cli.max_concurrent);

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            tracing::info!("Gemini MCP server started");
            tracing::info!("Gemini CLI: {}", config.program.display());
            if config.max_concurrent_calls == 0 {
                tracing::info!("Concurrent calls: unbounded");
            } else {
                tracing::info!("Concurrent calls: {}", config.max_concurrent_calls);
            }

            let handler = ProtocolHandler::new(config.executor(), config.max_concurrent_calls);
            let transport = StdioTransport::new(handler);
            transport.run().await?;
        }

        Commands::Run { prompt } => match config.executor().run(&prompt).await {
            Ok(output) => println!("{output}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },

        Commands::Info => {
            let capabilities = gemini_cli_mcp::types::InitializeResult::default_result();
            let tools = ToolRegistry::list_tools();
            let info = serde_json::json!({
                "server": capabilities.server_info,
                "protocol_version": capabilities.protocol_version,
                "capabilities": capabilities.capabilities,
                "tools": tools.iter().map(|t| &t.name).collect::<Vec<_>>(),
                "gemini": config.program.display().to_string(),
                "max_concurrent_calls": config.max_concurrent_calls,
            });
            println!("{}", serde_json::to_string_pretty(&info)?);
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "gemini-cli-mcp", &mut std::io::stdout());
        }
    }

    Ok(())
}
