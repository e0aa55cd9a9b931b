//! Praxis Intent - deterministic mandate intent normalizer
//!
//! `normalize` is a pure function: identical input always yields identical
//! output, no side effects, no I/O. The stages run in a fixed order:
//! filler stripping, whitespace collapse, optional aggressive token
//! filtering, bounded phrase rewriting, then length fallbacks down to a
//! fixed sentinel.

use std::sync::LazyLock;

use regex::Regex;

/// Sentinel returned when normalization leaves nothing usable
pub const FALLBACK_INTENT: &str = "baseline_directive";

/// Results shorter than this fall back to the pre-filter text
const MIN_MEANINGFUL_LEN: usize = 10;

/// A phrase rewrite is kept only if it shrinks the text to at most this
/// fraction of its pre-rewrite length
const REWRITE_BUDGET: f64 = 0.8;

/// Tokens dropped wholesale by the aggressive filter
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he",
    "in", "is", "it", "its", "of", "on", "that", "the", "to", "was", "will",
    "with", "would", "could", "should", "may", "might", "must", "can", "shall",
    "this", "these", "those",
];

/// Punctuation trimmed from a token before classification
const TOKEN_TRIM: &[char] = &['.', ',', '!', '?', ';', ':', '"', '(', ')'];

struct PatternTable {
    filler: Regex,
    whitespace: Regex,
    /// Ordered longest/most-specific first so broader phrases never
    /// shadow narrower ones
    rewrites: Vec<(Regex, &'static str)>,
}

static PATTERNS: LazyLock<PatternTable> = LazyLock::new(|| PatternTable {
    filler: Regex::new(
        r"(?i)\b(?:sort\s+of|kind\s+of|you\s+know|actually|really|very|quite|rather|fluff|noise|like|um)\b",
    )
    .expect("valid filler pattern"),
    whitespace: Regex::new(r"\s+").expect("valid whitespace pattern"),
    rewrites: vec![
        (
            Regex::new(r"(?i)\bunassailable\s+market\s+dominance\b")
                .expect("valid rewrite pattern"),
            "supremacy",
        ),
        (
            Regex::new(r"(?i)\bstrategic\s+complexity\s+management\b")
                .expect("valid rewrite pattern"),
            "complexity_governance",
        ),
        (
            Regex::new(r"(?i)\bmarket\s+dominance\b").expect("valid rewrite pattern"),
            "dominance",
        ),
        (
            Regex::new(r"(?i)\bverifiable\s+systems\b").expect("valid rewrite pattern"),
            "attestation",
        ),
    ],
});

/// Normalize a raw intent string
///
/// `aggressive` enables the token-level filter (short tokens, stop-words,
/// non-alphanumerics, pure digits are dropped); callers derive it from the
/// active configuration's noise weight.
pub fn normalize(raw: &str, aggressive: bool) -> String {
    let table = &*PATTERNS;

    let stripped = table.filler.replace_all(raw.trim(), "");
    let sharpened = table
        .whitespace
        .replace_all(stripped.trim(), " ")
        .into_owned();

    let filtered = if aggressive {
        filter_tokens(&sharpened)
    } else {
        sharpened.clone()
    };

    let rewritten = apply_rewrites(&filtered, &table.rewrites);
    let densified = if rewritten.len() as f64 > filtered.len() as f64 * REWRITE_BUDGET {
        filtered
    } else {
        rewritten
    };

    let result = if densified.trim().len() < MIN_MEANINGFUL_LEN {
        sharpened
    } else {
        densified
    };

    let result = result.trim();
    if result.is_empty() {
        FALLBACK_INTENT.to_string()
    } else {
        result.to_string()
    }
}

fn filter_tokens(text: &str) -> String {
    text.split_whitespace()
        .filter(|word| {
            let bare = word.trim_matches(TOKEN_TRIM).to_lowercase();
            bare.chars().count() > 2
                && !STOP_WORDS.contains(&bare.as_str())
                && bare.chars().all(char::is_alphanumeric)
                && !bare.chars().all(|c| c.is_ascii_digit())
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn apply_rewrites(text: &str, rewrites: &[(Regex, &'static str)]) -> String {
    let mut rewritten = text.to_string();
    for (pattern, replacement) in rewrites {
        rewritten = pattern.replace_all(&rewritten, *replacement).into_owned();
    }
    rewritten
}
