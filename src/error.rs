//! The errors used by the library.
use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::term_id::TermId;

/// The result type used throughout the crate.
pub type Result<T> = std::result::Result<T, PhenographError>;

/// The error taxonomy of the crate.
///
/// Structural failures (a document that is not an OBO graph, an annotation row
/// with the wrong number of fields) abort the operation that encountered them.
/// Per-element failures are reported as [`ParseIssue`]s instead and never
/// surface through this enum.
#[derive(Error, Debug)]
pub enum PhenographError {
    /// The input could not be interpreted as an OBO-graph JSON document.
    #[error("malformed ontology document: {0}")]
    MalformedDocument(String),

    /// A string could not be parsed into a [`TermId`].
    #[error("malformed ontology term id: {0}")]
    MalformedId(String),

    /// A string could not be parsed into a calendar date.
    #[error("malformed date: {0}")]
    MalformedDate(String),

    /// An annotation row did not have the expected 12 fields.
    #[error("malformed annotation row {row}: expected 12 fields, got {fields}")]
    MalformedAnnotationRow { row: u64, fields: usize },

    /// An ontology edge used a predicate that is not in the registry.
    #[error("unknown edge predicate: {0}")]
    UnknownPredicate(String),

    /// An edge endpoint did not resolve to a current term (strict mode only).
    #[error("invalid edge: {0}")]
    InvalidEdge(String),

    /// A term could not be assigned to any top-level category.
    #[error("could not resolve top-level category for {0}")]
    UnresolvedTopLevel(TermId),

    /// An analysis that needs a target term was run without one.
    #[error("no target term supplied")]
    MissingTarget,

    /// A query was made with a term id the ontology does not contain.
    #[error("unrecognized term id: {0}")]
    UnknownTermId(TermId),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

/// How bad a non-fatal parse problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warn,
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warn => f.write_str("WARN"),
            Severity::Error => f.write_str("ERROR"),
        }
    }
}

/// A non-fatal problem encountered while parsing or analyzing.
///
/// The element that produced the issue is skipped; the issue itself is handed
/// to an [`IssueSink`] so that quality-control reports can print it verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIssue {
    pub severity: Severity,
    /// A short machine-readable code, e.g. `"unknown_synonym_type"`.
    pub code: &'static str,
    pub message: String,
}

impl ParseIssue {
    pub fn warn(code: &'static str, message: impl Into<String>) -> Self {
        ParseIssue {
            severity: Severity::Warn,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: &'static str, message: impl Into<String>) -> Self {
        ParseIssue {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }
}

impl Display for ParseIssue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.code, self.message)
    }
}

/// Observer for non-fatal parse and resolution problems.
pub trait IssueSink {
    fn report(&mut self, issue: ParseIssue);
}

impl IssueSink for Vec<ParseIssue> {
    fn report(&mut self, issue: ParseIssue) {
        self.push(issue);
    }
}
