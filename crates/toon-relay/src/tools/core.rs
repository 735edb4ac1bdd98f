//! Core tool abstractions for the MCP surface.
//!
//! Every operation this server exposes implements the [`Tool`] trait: a
//! definition (name, description, JSON Schema for the arguments) plus an
//! async `execute` over the raw JSON argument text. Tools are collected into
//! a [`ToolSet`], which owns dispatch, optional schema validation, and call
//! logging.

use crate::pipeline::ToonPipeline;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Boxed future returned by [`Tool::execute`].
///
/// `Err` is reserved for caller contract violations such as unparseable or
/// invalid arguments. Anything recoverable belongs inside the `Ok` report.
pub type ToolFuture<'a> = Pin<Box<dyn Future<Output = Result<String, String>> + Send + 'a>>;

// ── ToolDef ────────────────────────────────────────────────────────

/// Tool definition advertised to MCP clients via `tools/list`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

impl ToolDef {
    /// Create a tool definition from a name, description, and input schema.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }
}

// ── Tool trait ─────────────────────────────────────────────────────

/// An operation exposed to MCP clients.
///
/// Implementors provide:
/// - A definition ([`Tool::definition`]) carrying the name, description, and
///   JSON Schema for the arguments.
/// - An async [`Tool::execute`] method that receives the raw JSON arguments
///   string.
///
/// `execute` returns `Err` only when the caller broke the contract, for
/// example by sending malformed arguments. Those surface to the client as
/// tool-level errors. Internal problems must be rendered into the `Ok`
/// report instead, so the caller always receives a usable payload.
///
/// # Example
///
/// ```ignore
/// struct Reverse;
///
/// impl Tool for Reverse {
///     fn definition(&self) -> ToolDef {
///         ToolDef::new("reverse", "Reverse a string", json_schema_for::<ReverseArgs>())
///     }
///
///     fn execute(&self, arguments: &str) -> ToolFuture<'_> {
///         let arguments = arguments.to_string();
///         Box::pin(async move {
///             let args: ReverseArgs = parse_tool_args(&arguments)?;
///             Ok(args.text.chars().rev().collect())
///         })
///     }
/// }
/// ```
pub trait Tool: Send + Sync {
    /// The definition advertised to clients.
    fn definition(&self) -> ToolDef;

    /// Execute the tool with the raw JSON arguments string.
    ///
    /// Returns a boxed future so the trait stays dyn-compatible.
    fn execute(&self, arguments: &str) -> ToolFuture<'_>;

    /// The tool's name. Delegates to the definition.
    fn name(&self) -> String {
        self.definition().name
    }
}

// ── ToolSet ────────────────────────────────────────────────────────

/// A collection of tools dispatched by name.
///
/// # Example
///
/// ```ignore
/// let tools = ToolSet::new()
///     .with_arg_validation(true)
///     .with_toon_tools(&pipeline);
/// let defs = tools.definitions();
/// ```
pub struct ToolSet {
    tools: HashMap<String, Box<dyn Tool>>,
    /// Validate arguments against the declared schema before executing.
    validate_args: bool,
}

impl fmt::Debug for ToolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolSet")
            .field("tools", &self.tools.keys().collect::<Vec<_>>())
            .field("validate_args", &self.validate_args)
            .finish()
    }
}

impl ToolSet {
    /// Create an empty tool set. Validation is off by default.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
            validate_args: false,
        }
    }

    /// Enable or disable JSON Schema argument validation.
    pub fn with_arg_validation(mut self, enabled: bool) -> Self {
        self.validate_args = enabled;
        self
    }

    /// Register a tool. Replaces any existing tool with the same name.
    pub fn register(&mut self, tool: impl Tool + 'static) {
        self.tools.insert(tool.name(), Box::new(tool));
    }

    /// Register a tool (builder form).
    pub fn with(mut self, tool: impl Tool + 'static) -> Self {
        self.register(tool);
        self
    }

    /// Register the two JSON-to-TOON tools backed by `pipeline`.
    pub fn with_toon_tools(self, pipeline: &Arc<ToonPipeline>) -> Self {
        use crate::tools::toon::{ToToon, ToToonFromString};

        self.with(ToToon::new(pipeline.clone()))
            .with(ToToonFromString::new(pipeline.clone()))
    }

    /// All tool definitions, for `tools/list`.
    pub fn definitions(&self) -> Vec<ToolDef> {
        self.tools.values().map(|t| t.definition()).collect()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool call by name.
    ///
    /// When validation is enabled the arguments are checked against the
    /// tool's declared schema first. `Err` means the caller broke the
    /// contract: unknown tool, invalid arguments, or a tool-level rejection.
    pub async fn execute(&self, name: &str, arguments: &str) -> Result<String, String> {
        let Some(tool) = self.tools.get(name) else {
            return Err(format!("unknown tool '{name}'"));
        };

        if self.validate_args
            && let Some(error) = validate_tool_arguments(tool.as_ref(), arguments)
        {
            return Err(error);
        }

        log_tool_call(name, arguments);
        let start = std::time::Instant::now();
        let result = tool.execute(arguments).await;

        let elapsed = start.elapsed();
        match &result {
            Ok(report) => debug!(
                "[tool] {name} completed in {:.0}ms ({} bytes)",
                elapsed.as_secs_f64() * 1000.0,
                report.len()
            ),
            Err(error) => info!("[tool] {name} rejected the call: {error}"),
        }

        result
    }
}

impl Default for ToolSet {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ────────────────────────────────────────────────────────

/// Validate tool arguments against the tool's declared JSON Schema.
///
/// Returns `None` if valid, or `Some(error)` describing every failing path
/// so the caller can correct the arguments in one round.
pub fn validate_tool_arguments(tool: &dyn Tool, arguments: &str) -> Option<String> {
    let args_value: serde_json::Value = match serde_json::from_str(arguments) {
        Ok(v) => v,
        Err(e) => {
            return Some(format!(
                "invalid JSON arguments for tool '{}': {e}",
                tool.name()
            ));
        }
    };

    let schema = tool.definition().input_schema;

    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        // If the schema itself is invalid, skip validation.
        Err(_) => return None,
    };

    let errors: Vec<String> = validator
        .iter_errors(&args_value)
        .map(|e| format!("  - {}: {e}", e.instance_path()))
        .collect();

    if errors.is_empty() {
        None
    } else {
        Some(format!(
            "argument validation failed for tool '{}':\n{}",
            tool.name(),
            errors.join("\n")
        ))
    }
}

/// Log a tool call at INFO with a truncated preview of the arguments.
pub fn log_tool_call(name: &str, arguments: &str) {
    let args_preview: String = arguments.chars().take(120).collect();
    info!(
        "[tool] {}({args_preview}{})",
        name,
        if arguments.len() > 120 { "..." } else { "" }
    );
    trace!("[tool] {name} arguments: {arguments}");
}

/// Parse raw JSON arguments into a typed struct.
///
/// The error string is ready to be returned from [`Tool::execute`] as a
/// caller contract violation.
pub fn parse_tool_args<T: serde::de::DeserializeOwned>(arguments: &str) -> Result<T, String> {
    serde_json::from_str(arguments).map_err(|e| format!("invalid tool arguments: {e}"))
}
