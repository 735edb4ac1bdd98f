//! The JSON-to-TOON conversion pipeline.
//!
//! [`ToonPipeline`] turns an arbitrary value graph into one report string in
//! four stages:
//!
//! | Stage | Module | What it does |
//! |-------|--------|--------------|
//! | Canonicalize | [`canonical`] | rewrite the graph into JSON-safe data |
//! | Serialize    | (here)        | pretty-print the canonical value |
//! | Convert      | [`convert`]   | run the external TOON converter |
//! | Report       | [`report`]    | fenced TOON plus savings, or fenced error |
//!
//! Everything below the entry points degrades into report text instead of
//! failing. The one exception is [`ToonPipeline::run_json_text`]: malformed
//! input text is the caller's contract violation and propagates as an error.

pub mod canonical;
pub mod convert;
pub mod report;
pub mod tokens;

pub use canonical::{InputValue, canonicalize};
pub use convert::{
    Convert, ConvertError, ConvertFuture, DEFAULT_CONVERTER, FailureKind, Outcome, ToonCli,
};
pub use report::format_report;
pub use tokens::{TokenEncoding, count_tokens, init_tokenizer};

use tracing::debug;

/// End-to-end JSON-to-TOON conversion with token savings reporting.
pub struct ToonPipeline {
    converter: Box<dyn Convert>,
}

impl ToonPipeline {
    /// Build a pipeline around any converter implementation.
    pub fn new(converter: impl Convert + 'static) -> Self {
        Self {
            converter: Box::new(converter),
        }
    }

    /// Convert a value graph and return the composite report.
    ///
    /// Total: converter failures and tokenizer unavailability come back
    /// rendered inside the report, never as errors.
    pub async fn run(&self, input: InputValue) -> String {
        let canon = canonical::canonicalize(input);
        // Pretty-printing a canonical value cannot fail; the fallback keeps
        // this path total without a panic.
        let json_text =
            serde_json::to_string_pretty(&canon).unwrap_or_else(|_| canon.to_string());
        debug!("[toon] canonical JSON is {} bytes", json_text.len());

        let outcome = self.converter.convert(&json_text).await;
        report::format_report(&outcome, &json_text)
    }

    /// Parse raw text as JSON, then convert.
    ///
    /// Handing over text that is not valid JSON is the one fault that is
    /// reported to the caller instead of being rendered into the report.
    pub async fn run_json_text(&self, text: &str) -> Result<String, String> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| format!("could not parse JSON string: {e}"))?;
        Ok(self.run(InputValue::from(value)).await)
    }
}

impl Default for ToonPipeline {
    /// A pipeline over the default converter executable.
    fn default() -> Self {
        Self::new(ToonCli::default())
    }
}
