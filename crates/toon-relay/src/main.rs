//! MCP server binary.
//!
//! Exposes `to_toon` and `to_toon_from_string` over newline-delimited
//! JSON-RPC on stdio. Conversion is delegated to an external TOON converter
//! executable; token savings are measured with a tiktoken encoding.
//!
//! # Examples
//!
//! ```sh
//! # Serve with the default `toon-format` converter from PATH
//! toon-relay
//!
//! # Point at a specific converter build and validate tool arguments
//! toon-relay --converter /opt/toon/bin/toon-format --validate-args
//!
//! # Use a different tokenizer encoding for the savings report
//! toon-relay --encoding cl100k_base
//! ```

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use toon_relay::pipeline::{
    DEFAULT_CONVERTER, TokenEncoding, ToonCli, ToonPipeline, init_tokenizer,
};
use toon_relay::server::McpServer;
use toon_relay::tools::core::ToolSet;
use tracing::Level;

/// Serve the JSON-to-TOON conversion tools over MCP stdio.
#[derive(Parser)]
#[command(name = "toon-relay", version)]
struct Cli {
    // ── Conversion ─────────────────────────────────────────────────
    /// TOON converter executable (a bare name is resolved via PATH)
    #[arg(long, default_value = DEFAULT_CONVERTER)]
    converter: PathBuf,

    /// Tokenizer encoding for the savings report
    #[arg(long, default_value_t = TokenEncoding::default())]
    encoding: TokenEncoding,

    // ── Server ─────────────────────────────────────────────────────
    /// Validate tool arguments against their JSON Schema before executing
    #[arg(long)]
    validate_args: bool,

    /// Log at DEBUG instead of INFO
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // stdout carries the JSON-RPC transport; every log line goes to stderr.
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    init_tokenizer(cli.encoding);

    let pipeline = Arc::new(ToonPipeline::new(ToonCli::new(&cli.converter)));
    let tools = ToolSet::new()
        .with_arg_validation(cli.validate_args)
        .with_toon_tools(&pipeline);

    let server = McpServer::new(tools).with_instructions(
        "Converts JSON-like data to TOON, a compact text encoding, and reports how many \
         tokens the conversion saves. Use to_toon for structured values and \
         to_toon_from_string for raw JSON text.",
    );

    if let Err(e) = server.serve_stdio().await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
