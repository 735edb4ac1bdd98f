//! JSON-to-TOON conversion over MCP.
//!
//! `toon-relay` converts arbitrary JSON-like data into TOON, a compact text
//! encoding produced by an external converter executable, and reports how
//! many tokens the conversion saves under a tiktoken encoding. It speaks
//! newline-delimited JSON-RPC over stdio, so any MCP-capable agent runtime
//! can call it.
//!
//! # Getting started
//!
//! Serve the tools over stdio:
//!
//! ```sh
//! toon-relay --converter toon-format
//! ```
//!
//! Or embed the pipeline directly:
//!
//! ```ignore
//! use toon_relay::pipeline::{ToonCli, ToonPipeline};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = ToonPipeline::new(ToonCli::default());
//!     let report = pipeline.run(serde_json::json!({"id": 1}).into()).await;
//!     println!("{report}");
//! }
//! ```
//!
//! # Where to find things
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`pipeline`] | canonicalization, token counting, converter invocation, report assembly |
//! | [`tools`]    | the [`Tool`](tools::core::Tool) trait, [`ToolSet`](tools::core::ToolSet), and the two TOON tools |
//! | [`server`]   | newline-delimited JSON-RPC over stdio |
//!
//! # Design notes
//!
//! 1. **Failures become reports.** Below the tool entry points everything is
//!    recovered and rendered into the report text. A converter failure or an
//!    unavailable tokenizer still yields a payload the caller can use. The
//!    one exception is malformed text handed to `to_toon_from_string`, which
//!    is the caller's contract violation and comes back as a tool error.
//!
//! 2. **The converter is a seam.** The pipeline knows only "JSON text in,
//!    outcome out" ([`Convert`](pipeline::convert::Convert)). The subprocess
//!    and temp file mechanics live behind it, and tests swap in mocks.
//!
//! 3. **One tokenizer per process.** Loaded once at startup. If loading
//!    fails, savings reporting degrades to an unavailable marker and nothing
//!    else is affected.

pub mod pipeline;
pub mod server;
pub mod tools;

use schemars::JsonSchema;

// ── Constants ──────────────────────────────────────────────────────

/// Server name reported during the MCP handshake.
pub const SERVER_NAME: &str = "toon-relay";

/// Server version reported during the MCP handshake.
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

// Re-export the types most embedders need.
pub use pipeline::{InputValue, ToonCli, ToonPipeline};
pub use server::McpServer;
pub use tools::core::{Tool, ToolDef, ToolFuture, ToolSet};

// ── Schema generation ──────────────────────────────────────────────

/// Generate a JSON Schema `serde_json::Value` from a type that implements
/// `schemars::JsonSchema`. This bridges typed argument structs and the
/// schema object advertised in a tool definition.
///
/// # Example
///
/// ```
/// use schemars::JsonSchema;
/// use serde::Deserialize;
/// use toon_relay::json_schema_for;
///
/// #[derive(Deserialize, JsonSchema)]
/// struct ConvertArgs {
///     data: serde_json::Value,
/// }
///
/// let schema = json_schema_for::<ConvertArgs>();
/// assert_eq!(schema["type"], "object");
/// assert_eq!(schema["required"][0], "data");
/// ```
pub fn json_schema_for<T: JsonSchema>() -> serde_json::Value {
    let schema = schemars::schema_for!(T);
    serde_json::to_value(schema)
        .unwrap_or_else(|_| serde_json::json!({"type": "object", "properties": {}}))
}
