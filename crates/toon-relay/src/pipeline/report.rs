//! Report rendering.
//!
//! The pipeline's user-facing output is a single composite string. Success
//! and failure both land here; the caller always gets a payload it can use.

use crate::pipeline::convert::Outcome;
use crate::pipeline::tokens;

/// Render the final report for a conversion attempt.
///
/// On success: the TOON text in a fenced block, followed by a token savings
/// section. On failure: a fenced error block that carries the failure text
/// and the original JSON, so the caller still receives the data it asked
/// about. This function cannot fail.
pub fn format_report(outcome: &Outcome, json_text: &str) -> String {
    match outcome {
        Ok(toon) => {
            let savings =
                savings_section(tokens::count_tokens(json_text), tokens::count_tokens(toon));
            format!("```toon\n{toon}\n```{savings}")
        }
        Err(error) => format!("```error\n{error}\n\nJSON OUTPUT:\n{json_text}\n```"),
    }
}

/// The token savings section. The percentage is computed only when both
/// counts are known and positive; anything else renders an explicit
/// unavailable marker rather than risking a zero denominator.
fn savings_section(json_tokens: Option<usize>, toon_tokens: Option<usize>) -> String {
    match (json_tokens, toon_tokens) {
        (Some(json), Some(toon)) if json > 0 && toon > 0 => {
            let saved = 100.0 * (1.0 - toon as f64 / json as f64);
            format!(
                "\n\n# Token Savings\n- JSON tokens: {json}\n- TOON tokens: {toon}\n- Saved: {saved:.1}%\n"
            )
        }
        _ => "\n\n# Token Savings\n(unavailable)\n".to_string(),
    }
}
