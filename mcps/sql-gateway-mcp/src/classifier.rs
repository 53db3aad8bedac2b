//! Query classifier - admission guard for untrusted SQL
//!
//! Decides whether a query may run at all. The policy is layered rather than
//! a parser:
//!
//! 1. comments are stripped (see [`crate::comments`])
//! 2. the normalized text must begin with `select` or `with`
//! 3. no whole word token may appear in [`WRITE_KEYWORDS`]
//!
//! Whole-token matching keeps identifiers such as `created_at` or
//! `last_update` admissible while still catching `CREATE TABLE` and
//! `PRAGMA foreign_keys=off`. The executor's read-only connection backs this
//! up at the engine level.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::comments::strip_comments;
use crate::error::{GatewayError, Rejection};

/// Keywords that can mutate state, change schema, or control transactions
pub const WRITE_KEYWORDS: &[&str] = &[
    "insert",
    "update",
    "delete",
    "drop",
    "alter",
    "create",
    "replace",
    "truncate",
    "attach",
    "detach",
    "reindex",
    "vacuum",
    "analyze",
    "pragma",
    "transaction",
    "commit",
    "rollback",
    "savepoint",
    "release",
];

/// Statement prefixes that may be admitted
const READ_PREFIXES: &[&str] = &["select", "with"];

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid regex"));

static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z_]+\b").expect("Invalid regex"));

/// Admission decision for one query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Admitted,
    Rejected(Rejection),
}

impl Verdict {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Verdict::Admitted)
    }

    /// Convert into a `Result` so callers can use `?`
    pub fn into_result(self) -> Result<(), Rejection> {
        match self {
            Verdict::Admitted => Ok(()),
            Verdict::Rejected(reason) => Err(reason),
        }
    }
}

/// Classify a raw, untrusted query
pub fn classify(raw: &str) -> Verdict {
    classify_cleaned(&strip_comments(raw))
}

/// Classify a query whose comments have already been removed
pub fn classify_cleaned(cleaned: &str) -> Verdict {
    if cleaned.trim().is_empty() {
        return Verdict::Rejected(Rejection::EmptyQuery);
    }

    let normalized = normalize(cleaned);

    if !READ_PREFIXES.iter().any(|p| normalized.starts_with(p)) {
        return Verdict::Rejected(Rejection::NotReadOnly);
    }

    let forbidden: Vec<String> = tokens(&normalized)
        .into_iter()
        .filter(|t| WRITE_KEYWORDS.contains(&t.as_str()))
        .collect();

    if forbidden.is_empty() {
        Verdict::Admitted
    } else {
        Verdict::Rejected(Rejection::ForbiddenOperation(forbidden))
    }
}

/// Classify and fail with a [`GatewayError`] on rejection
pub fn validate(raw: &str) -> Result<(), GatewayError> {
    classify(raw).into_result().map_err(GatewayError::from)
}

/// Collapse whitespace runs, trim, and lowercase
///
/// Only used for matching; the original query text is what gets executed.
pub fn normalize(cleaned: &str) -> String {
    WHITESPACE
        .replace_all(cleaned, " ")
        .trim()
        .to_lowercase()
}

/// Distinct word tokens of a normalized query, sorted
pub fn tokens(normalized: &str) -> BTreeSet<String> {
    WORD_TOKEN
        .find_iter(normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}
