//! Tool abstractions and the tools this server ships.
//!
//! Submodules:
//!
//! - [`core`]: the [`Tool`] trait, [`ToolSet`], [`ToolDef`], and argument
//!   helpers.
//! - [`spec`]: the [`ToolSpec`](spec::ToolSpec) builder for structured tool
//!   descriptions with usage guidance.
//! - [`toon`]: the `to_toon` and `to_toon_from_string` tools.

pub mod core;
pub mod spec;
pub mod toon;

// Re-export the items most callers need.
pub use self::core::{
    Tool, ToolDef, ToolFuture, ToolSet, log_tool_call, parse_tool_args, validate_tool_arguments,
};
pub use self::spec::{ToolSpec, ToolSpecBuilder};
pub use self::toon::{ToToon, ToToonFromString};
