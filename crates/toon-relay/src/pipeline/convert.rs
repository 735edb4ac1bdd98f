//! Converter invocation.
//!
//! TOON encoding itself lives in an external executable; this module owns
//! the seam to it. [`Convert`] is the trait the pipeline depends on and
//! [`ToonCli`] is the production implementation that shells out to the
//! converter with temp files on both sides.

use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error};

/// Converter executable used when none is configured. Resolved via PATH.
pub const DEFAULT_CONVERTER: &str = "toon-format";

// ── Errors ─────────────────────────────────────────────────────────

/// How a conversion attempt failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The converter ran and exited non-zero. The detail is its stderr.
    ConverterFailed,
    /// The converter never produced a verdict: temp file handling, process
    /// launch, or reading the output failed.
    Invocation,
}

/// A failed conversion, kept as data so the report layer can render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertError {
    pub kind: FailureKind,
    pub detail: String,
}

impl ConvertError {
    /// Non-zero converter exit; `stderr` is the captured diagnostic.
    pub fn converter_failed(stderr: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::ConverterFailed,
            detail: stderr.into(),
        }
    }

    /// A fault outside the converter itself.
    pub fn invocation(detail: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Invocation,
            detail: detail.into(),
        }
    }
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            FailureKind::ConverterFailed => write!(f, "TOON converter failed:\n{}", self.detail),
            FailureKind::Invocation => write!(f, "TOON conversion error:\n{}", self.detail),
        }
    }
}

impl std::error::Error for ConvertError {}

/// Result of one conversion attempt: TOON text, or the failure as data.
pub type Outcome = Result<String, ConvertError>;

// ── Convert trait ──────────────────────────────────────────────────

/// Boxed future returned by [`Convert::convert`].
pub type ConvertFuture<'a> = Pin<Box<dyn Future<Output = Outcome> + Send + 'a>>;

/// A JSON-to-TOON converter.
///
/// The pipeline depends only on this seam (canonical JSON text in, outcome
/// out), which keeps the subprocess mechanics swappable in tests.
pub trait Convert: Send + Sync {
    /// Convert pretty-printed JSON text to TOON text.
    fn convert<'a>(&'a self, json_text: &'a str) -> ConvertFuture<'a>;
}

// ── CLI converter ──────────────────────────────────────────────────

/// Invokes the external TOON converter executable.
///
/// Each call writes the JSON to a fresh uniquely named `*.json` file in the
/// platform temp directory and runs `<program> <input> -o <input>.toon`.
/// Both files are left behind after the call, which makes failed conversions
/// inspectable but means the temp directory grows under sustained use.
/// There is no timeout; a hung converter hangs the call.
#[derive(Debug, Clone)]
pub struct ToonCli {
    program: PathBuf,
}

impl ToonCli {
    /// Use the given converter executable. A bare name is resolved via PATH.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    async fn run(&self, json_text: &str) -> Outcome {
        let file = match tempfile::Builder::new()
            .prefix("toon-")
            .suffix(".json")
            .tempfile()
        {
            Ok(f) => f,
            Err(e) => {
                return Err(ConvertError::invocation(format!(
                    "could not create temp file: {e}"
                )));
            }
        };
        // keep() persists the file past drop; the converter reads it by path.
        let src = match file.keep() {
            Ok((_, path)) => path,
            Err(e) => {
                return Err(ConvertError::invocation(format!(
                    "could not persist temp file: {e}"
                )));
            }
        };

        if let Err(e) = tokio::fs::write(&src, json_text).await {
            return Err(ConvertError::invocation(format!(
                "could not write {}: {e}",
                src.display()
            )));
        }

        let mut dst = src.clone().into_os_string();
        dst.push(".toon");
        let dst = PathBuf::from(dst);

        debug!(
            "[toon] {} {} -o {}",
            self.program.display(),
            src.display(),
            dst.display()
        );

        // The converter must not inherit stdin; that would race the MCP
        // transport when serving over stdio.
        let output = match Command::new(&self.program)
            .arg(&src)
            .arg("-o")
            .arg(&dst)
            .stdin(Stdio::null())
            .output()
            .await
        {
            Ok(o) => o,
            Err(e) => {
                error!("[toon] could not launch {}: {e}", self.program.display());
                return Err(ConvertError::invocation(format!(
                    "could not launch {}: {e}",
                    self.program.display()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            error!(
                "[toon] converter exited with {}: {}",
                output.status,
                stderr.trim()
            );
            return Err(ConvertError::converter_failed(stderr));
        }

        match tokio::fs::read_to_string(&dst).await {
            Ok(toon) => {
                debug!("[toon] converter produced {} bytes", toon.len());
                Ok(toon)
            }
            Err(e) => Err(ConvertError::invocation(format!(
                "could not read {}: {e}",
                dst.display()
            ))),
        }
    }
}

impl Default for ToonCli {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

impl Convert for ToonCli {
    fn convert<'a>(&'a self, json_text: &'a str) -> ConvertFuture<'a> {
        Box::pin(self.run(json_text))
    }
}
