//! Structured tool descriptions.
//!
//! A [`ToolSpec`] assembles the free-text description advertised for a tool
//! out of named parts: purpose, usage guidance, examples, output format, and
//! disambiguation against sibling tools. Agent runtimes pick tools from
//! descriptions alone, so spelling out when NOT to use a tool matters as
//! much as what it does.

use crate::tools::core::ToolDef;

/// A structured description of a tool, rendered into the definition text.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name, e.g. `to_toon`.
    pub name: String,
    /// One-sentence statement of what the tool does.
    pub purpose: String,
    /// Situations where this tool is the right choice.
    pub when_to_use: String,
    /// Situations where a different tool (or none) is the right choice.
    pub when_not_to_use: String,
    /// JSON Schema for the arguments.
    pub parameters: serde_json::Value,
    /// (input, expected outcome) pairs.
    pub examples: Vec<(String, String)>,
    /// What the output looks like.
    pub output_format: Option<String>,
    /// (scenario, other tool, reason) triples pointing callers elsewhere.
    pub disambiguation: Vec<(String, String, String)>,
}

impl ToolSpec {
    /// Start building a spec for the named tool.
    pub fn builder(name: impl Into<String>) -> ToolSpecBuilder {
        ToolSpecBuilder::new(name)
    }

    /// Render the description text advertised to clients.
    pub fn to_description(&self) -> String {
        let mut desc = format!("{}.", self.purpose.trim_end_matches('.'));

        if !self.when_to_use.is_empty() {
            desc.push_str(&format!("\nWhen to use: {}", self.when_to_use));
        }
        if !self.when_not_to_use.is_empty() {
            desc.push_str(&format!("\nWhen NOT to use: {}", self.when_not_to_use));
        }
        if !self.examples.is_empty() {
            desc.push_str("\nExamples:");
            for (input, output) in &self.examples {
                desc.push_str(&format!("\n  - Input: {input} → {output}"));
            }
        }
        if let Some(format) = &self.output_format {
            desc.push_str(&format!("\nOutput format: {format}"));
        }
        if !self.disambiguation.is_empty() {
            desc.push_str("\nDisambiguation:");
            for (scenario, tool, reason) in &self.disambiguation {
                desc.push_str(&format!("\n  - {scenario}: use '{tool}' instead ({reason})"));
            }
        }

        desc
    }

    /// The definition carrying this spec's rendered description.
    pub fn to_tool_def(&self) -> ToolDef {
        ToolDef::new(
            self.name.clone(),
            self.to_description(),
            self.parameters.clone(),
        )
    }
}

/// Builder for [`ToolSpec`].
pub struct ToolSpecBuilder {
    name: String,
    purpose: Option<String>,
    when_to_use: Option<String>,
    when_not_to_use: Option<String>,
    parameters: Option<serde_json::Value>,
    examples: Vec<(String, String)>,
    output_format: Option<String>,
    disambiguation: Vec<(String, String, String)>,
}

impl ToolSpecBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            purpose: None,
            when_to_use: None,
            when_not_to_use: None,
            parameters: None,
            examples: Vec::new(),
            output_format: None,
            disambiguation: Vec::new(),
        }
    }

    pub fn purpose(mut self, purpose: impl Into<String>) -> Self {
        self.purpose = Some(purpose.into());
        self
    }

    pub fn when_to_use(mut self, guidance: impl Into<String>) -> Self {
        self.when_to_use = Some(guidance.into());
        self
    }

    pub fn when_not_to_use(mut self, guidance: impl Into<String>) -> Self {
        self.when_not_to_use = Some(guidance.into());
        self
    }

    /// Set the argument schema directly.
    pub fn parameters(mut self, schema: serde_json::Value) -> Self {
        self.parameters = Some(schema);
        self
    }

    /// Derive the argument schema from a typed arguments struct.
    pub fn parameters_for<T: schemars::JsonSchema>(mut self) -> Self {
        self.parameters = Some(crate::json_schema_for::<T>());
        self
    }

    pub fn example(mut self, input: impl Into<String>, output: impl Into<String>) -> Self {
        self.examples.push((input.into(), output.into()));
        self
    }

    pub fn output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    /// Point callers at another tool for a scenario this one does not cover.
    pub fn disambiguate(
        mut self,
        scenario: impl Into<String>,
        other_tool: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        self.disambiguation
            .push((scenario.into(), other_tool.into(), reason.into()));
        self
    }

    /// Finish the spec.
    ///
    /// Panics when `purpose` was not set; specs are assembled at registration
    /// time, so an incomplete one is a programming error.
    pub fn build(self) -> ToolSpec {
        ToolSpec {
            name: self.name,
            purpose: self.purpose.expect("ToolSpec requires 'purpose'"),
            when_to_use: self.when_to_use.unwrap_or_default(),
            when_not_to_use: self.when_not_to_use.unwrap_or_default(),
            parameters: self
                .parameters
                .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}})),
            examples: self.examples,
            output_format: self.output_format,
            disambiguation: self.disambiguation,
        }
    }

    /// Finish the spec and render it straight into a [`ToolDef`].
    pub fn to_tool_def(self) -> ToolDef {
        self.build().to_tool_def()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_renders_all_sections_in_order() {
        let spec = ToolSpec::builder("demo")
            .purpose("Do the demo thing")
            .when_to_use("when demonstrating")
            .when_not_to_use("in production")
            .example("demo(x=1)", "returns the demo output")
            .output_format("plain text")
            .disambiguate("the real thing is needed", "real_tool", "it does real work")
            .build();

        let desc = spec.to_description();
        let positions: Vec<usize> = [
            "Do the demo thing.",
            "When to use: when demonstrating",
            "When NOT to use: in production",
            "Examples:",
            "- Input: demo(x=1) → returns the demo output",
            "Output format: plain text",
            "Disambiguation:",
            "- the real thing is needed: use 'real_tool' instead (it does real work)",
        ]
        .iter()
        .map(|part| desc.find(part).unwrap_or_else(|| panic!("missing: {part}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn purpose_gets_a_single_trailing_period() {
        let spec = ToolSpec::builder("demo").purpose("Trailing dot.").build();
        assert!(spec.to_description().starts_with("Trailing dot."));
        assert!(!spec.to_description().starts_with("Trailing dot.."));
    }

    #[test]
    fn empty_sections_are_omitted() {
        let spec = ToolSpec::builder("demo").purpose("Minimal").build();
        let desc = spec.to_description();
        assert_eq!(desc, "Minimal.");
    }

    #[test]
    #[should_panic(expected = "requires 'purpose'")]
    fn build_without_purpose_panics() {
        ToolSpec::builder("demo").build();
    }

    #[test]
    fn to_tool_def_carries_name_and_schema() {
        let def = ToolSpec::builder("demo")
            .purpose("Do the demo thing")
            .parameters(serde_json::json!({"type": "object", "required": ["x"]}))
            .to_tool_def();

        assert_eq!(def.name, "demo");
        assert!(def.description.starts_with("Do the demo thing."));
        assert_eq!(def.input_schema["required"][0], "x");
    }

    #[test]
    fn parameters_for_derives_a_schema() {
        #[derive(serde::Deserialize, schemars::JsonSchema)]
        struct DemoArgs {
            #[allow(dead_code)]
            x: i64,
        }

        let spec = ToolSpec::builder("demo")
            .purpose("Typed args")
            .parameters_for::<DemoArgs>()
            .build();

        assert_eq!(spec.parameters["type"], "object");
        assert!(
            spec.parameters["required"]
                .as_array()
                .is_some_and(|r| r.iter().any(|v| v == "x"))
        );
    }
}
