//! The JSON-to-TOON conversion tools.
//!
//! Two entry points over one pipeline: [`ToToon`] takes a structured JSON
//! value and [`ToToonFromString`] takes raw text and parses it first. Both
//! return the composite report produced by the pipeline, which is why a
//! converter failure comes back as a successful call carrying an error
//! report rather than a tool error.

use crate::pipeline::{InputValue, ToonPipeline};
use crate::tools::core::{Tool, ToolDef, ToolFuture, parse_tool_args};
use crate::tools::spec::ToolSpec;
use schemars::JsonSchema;
use serde::Deserialize;
use std::sync::Arc;

// ── to_toon ────────────────────────────────────────────────────────

/// Convert structured JSON data to TOON with token savings stats.
pub struct ToToon {
    pipeline: Arc<ToonPipeline>,
}

impl ToToon {
    pub fn new(pipeline: Arc<ToonPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Arguments for the `to_toon` tool.
#[derive(Deserialize, JsonSchema)]
pub struct ToToonArgs {
    /// The JSON data to convert. Any object, array, or scalar.
    pub data: serde_json::Value,
}

impl Tool for ToToon {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder("to_toon")
            .purpose(
                "Convert JSON data to TOON, a compact text encoding, and report the token savings",
            )
            .when_to_use(
                "when a structured payload is about to be handed to a model and a cheaper \
                 representation is wanted",
            )
            .when_not_to_use(
                "when the payload is a string of JSON text rather than structured data; \
                 to_toon would treat it as one long scalar",
            )
            .parameters_for::<ToToonArgs>()
            .example(
                r#"to_toon(data={"users": [{"id": 1}, {"id": 2}]})"#,
                "the TOON encoding in a fenced block plus a Token Savings section",
            )
            .output_format(
                "a ```toon fenced block followed by a '# Token Savings' section; if the \
                 converter fails, a ```error fenced block that still carries the JSON",
            )
            .disambiguate(
                "the payload is already serialized JSON text",
                "to_toon_from_string",
                "it parses the text before converting",
            )
            .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let pipeline = self.pipeline.clone();
        let arguments = arguments.to_string();
        Box::pin(async move {
            let args: ToToonArgs = parse_tool_args(&arguments)?;
            Ok(pipeline.run(InputValue::from(args.data)).await)
        })
    }
}

// ── to_toon_from_string ────────────────────────────────────────────

/// Parse a JSON string, then convert it to TOON with token savings stats.
pub struct ToToonFromString {
    pipeline: Arc<ToonPipeline>,
}

impl ToToonFromString {
    pub fn new(pipeline: Arc<ToonPipeline>) -> Self {
        Self { pipeline }
    }
}

/// Arguments for the `to_toon_from_string` tool.
#[derive(Deserialize, JsonSchema)]
pub struct ToToonFromStringArgs {
    /// A string containing JSON to parse and convert.
    pub json_text: String,
}

impl Tool for ToToonFromString {
    fn definition(&self) -> ToolDef {
        ToolSpec::builder("to_toon_from_string")
            .purpose("Parse a JSON string and convert it to TOON with token savings stats")
            .when_to_use(
                "when the payload is raw JSON text, for example read from a file or \
                 produced by another tool",
            )
            .when_not_to_use("when the data is already structured; hand it to to_toon directly")
            .parameters_for::<ToToonFromStringArgs>()
            .example(
                r#"to_toon_from_string(json_text="{\"id\": 1}")"#,
                "parses the text, then returns the TOON fenced block and savings section",
            )
            .output_format(
                "same as to_toon; text that is not valid JSON is rejected as a tool error",
            )
            .disambiguate(
                "the payload is a structured object or array",
                "to_toon",
                "no parsing step is needed",
            )
            .to_tool_def()
    }

    fn execute(&self, arguments: &str) -> ToolFuture<'_> {
        let pipeline = self.pipeline.clone();
        let arguments = arguments.to_string();
        Box::pin(async move {
            let args: ToToonFromStringArgs = parse_tool_args(&arguments)?;
            pipeline.run_json_text(&args.json_text).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Convert, ConvertFuture};

    /// Converter that uppercases the JSON text, so output is recognizable.
    struct UppercaseConverter;

    impl Convert for UppercaseConverter {
        fn convert(&self, json_text: &str) -> ConvertFuture<'_> {
            let toon = json_text.to_uppercase();
            Box::pin(async move { Ok(toon) })
        }
    }

    fn pipeline() -> Arc<ToonPipeline> {
        Arc::new(ToonPipeline::new(UppercaseConverter))
    }

    #[tokio::test]
    async fn to_toon_converts_structured_data() {
        let tool = ToToon::new(pipeline());
        let report = tool
            .execute(r#"{"data": {"id": 7}}"#)
            .await
            .unwrap();

        assert!(report.starts_with("```toon\n"));
        assert!(report.contains(r#""ID": 7"#));
        assert!(report.contains("# Token Savings"));
    }

    #[tokio::test]
    async fn to_toon_rejects_malformed_arguments() {
        let tool = ToToon::new(pipeline());
        let err = tool.execute("{oops").await.unwrap_err();
        assert!(err.contains("invalid tool arguments"));
    }

    #[tokio::test]
    async fn to_toon_from_string_parses_then_converts() {
        let tool = ToToonFromString::new(pipeline());
        let report = tool
            .execute(r#"{"json_text": "{\"id\": 7}"}"#)
            .await
            .unwrap();

        assert!(report.starts_with("```toon\n"));
        assert!(report.contains(r#""ID": 7"#));
    }

    #[tokio::test]
    async fn to_toon_from_string_rejects_text_that_is_not_json() {
        let tool = ToToonFromString::new(pipeline());
        let err = tool
            .execute(r#"{"json_text": "{not valid json"}"#)
            .await
            .unwrap_err();

        assert!(err.contains("could not parse JSON string"));
    }

    #[test]
    fn definitions_advertise_required_arguments() {
        let to_toon = ToToon::new(pipeline()).definition();
        assert_eq!(to_toon.name, "to_toon");
        assert!(to_toon.description.contains("When NOT to use:"));
        assert!(
            to_toon.input_schema["required"]
                .as_array()
                .is_some_and(|r| r.iter().any(|v| v == "data"))
        );

        let from_string = ToToonFromString::new(pipeline()).definition();
        assert_eq!(from_string.name, "to_toon_from_string");
        assert!(
            from_string.input_schema["required"]
                .as_array()
                .is_some_and(|r| r.iter().any(|v| v == "json_text"))
        );
    }
}
