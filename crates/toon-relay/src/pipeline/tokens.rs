//! Process-wide token counting.
//!
//! One tokenizer serves the whole process. It is selected once at startup
//! via [`init_tokenizer`] and every later count reuses it; if loading fails
//! the failure is logged once and counting degrades to `None` instead of
//! erroring on every call.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;
use tiktoken_rs::CoreBPE;
use tracing::{info, warn};

static TOKENIZER: OnceLock<Option<CoreBPE>> = OnceLock::new();

/// Tokenizer encodings selectable at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TokenEncoding {
    /// GPT-4o family encoding. The default, matching common agent runtimes.
    #[default]
    O200kBase,
    /// GPT-4 and GPT-3.5 family encoding.
    Cl100kBase,
    /// Older completion-model encoding.
    P50kBase,
}

impl TokenEncoding {
    fn as_str(self) -> &'static str {
        match self {
            TokenEncoding::O200kBase => "o200k_base",
            TokenEncoding::Cl100kBase => "cl100k_base",
            TokenEncoding::P50kBase => "p50k_base",
        }
    }
}

impl fmt::Display for TokenEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "o200k_base" => Ok(TokenEncoding::O200kBase),
            "cl100k_base" => Ok(TokenEncoding::Cl100kBase),
            "p50k_base" => Ok(TokenEncoding::P50kBase),
            other => Err(format!(
                "unknown encoding '{other}' (expected o200k_base, cl100k_base, or p50k_base)"
            )),
        }
    }
}

/// Select and load the process-wide tokenizer.
///
/// The first initialization wins; a [`count_tokens`] call that arrives
/// before any explicit init falls back to the default encoding. Returns
/// whether a tokenizer is available.
pub fn init_tokenizer(encoding: TokenEncoding) -> bool {
    TOKENIZER.get_or_init(|| load(encoding)).is_some()
}

/// Token count of `text` under the process-wide encoding.
///
/// `None` means the tokenizer could not be loaded. Savings reporting
/// degrades in that case; nothing else is affected.
pub fn count_tokens(text: &str) -> Option<usize> {
    TOKENIZER
        .get_or_init(|| load(TokenEncoding::default()))
        .as_ref()
        .map(|bpe| bpe.encode_ordinary(text).len())
}

fn load(encoding: TokenEncoding) -> Option<CoreBPE> {
    let loaded = match encoding {
        TokenEncoding::O200kBase => tiktoken_rs::o200k_base(),
        TokenEncoding::Cl100kBase => tiktoken_rs::cl100k_base(),
        TokenEncoding::P50kBase => tiktoken_rs::p50k_base(),
    };
    match loaded {
        Ok(bpe) => {
            info!("loaded {encoding} tokenizer for token savings reporting");
            Some(bpe)
        }
        Err(e) => {
            warn!("could not load {encoding} tokenizer, token savings will be unavailable: {e}");
            None
        }
    }
}
