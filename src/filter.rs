//! Boolean full-text filter over chapter text.
//!
//! Queries use a small language: whitespace and `+`/`&` mean AND, `|` means OR, `-`/`!` mean
//! NOT, parentheses group, double quotes make a phrase literal, `*` is a wildcard and a
//! backslash escapes the next character. NOT binds tighter than AND, AND tighter than OR.
//!
//! ```
//! use manual_sitemap::filter::{compile, evaluate};
//!
//! let query = compile("setup + (linux | windows)");
//! assert_eq!(evaluate(&query, "setup on linux"), Ok(true));
//! assert_eq!(evaluate(&query, "setup on macos"), Ok(false));
//! ```

pub mod lexer;
pub mod parser;
pub mod state;

pub use lexer::Token;
pub use parser::{Expr, Pattern};
pub use state::FilterState;

use crate::error::FilterSyntaxError;
use crate::normalize::normalize_text;

#[derive(Clone, Debug)]
/// A query ready to be evaluated against chapter texts.
///
/// Compilation never fails. A malformed query keeps its syntax error, which every evaluation
/// reports, so callers can flag the input while leaving match states alone.
pub struct CompiledQuery {
    source: String,
    tokens: Vec<Token>,
    expr: Result<Option<Expr>, FilterSyntaxError>,
}

/// Normalizes and tokenizes a raw query and parses it into an expression.
#[must_use]
pub fn compile(raw: &str) -> CompiledQuery {
    let source = normalize_text(raw);
    let tokens = lexer::tokenize(&source);
    let expr = parser::parse(&tokens);
    CompiledQuery {
        source,
        tokens,
        expr,
    }
}

/// Evaluates a compiled query against normalized chapter text.
///
/// # Errors
///
/// Returns the query's [`FilterSyntaxError`] if it is malformed.
pub fn evaluate(query: &CompiledQuery, text: &str) -> Result<bool, FilterSyntaxError> {
    match &query.expr {
        Ok(Some(expr)) => Ok(expr.matches(text)),
        Ok(None) => Ok(true),
        Err(err) => Err(err.clone()),
    }
}

impl CompiledQuery {
    #[must_use]
    /// The normalized query text.
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    /// Token stream the expression was parsed from.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    #[must_use]
    /// Whether the query matches everything.
    pub fn is_empty(&self) -> bool {
        matches!(self.expr, Ok(None))
    }

    #[must_use]
    /// Syntax error of a malformed query.
    pub fn error(&self) -> Option<&FilterSyntaxError> {
        self.expr.as_ref().err()
    }
}

#[cfg(test)]
#[path = "tests/filter.rs"]
mod tests;
