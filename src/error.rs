//! Error types surfaced by the loader and the filter engine.

use std::path::PathBuf;
use thiserror::Error;

/// Ways a filter query can be malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// The query ended where an operand was required, e.g. `a |` or `(`.
    MissingOperand,
    /// A `(` without its closing `)`.
    UnclosedGroup,
    /// A `)` without a matching `(`.
    UnexpectedGroupClose,
    /// A group with nothing inside, `()`.
    EmptyGroup,
    /// A binary operator where an operand was expected, e.g. `| a`.
    DanglingOperator,
    /// An operand directly followed by a group or a negation without whitespace, e.g. `a(b)`.
    MissingOperator,
    /// A term whose pattern exceeds the matcher's size limits.
    TermTooComplex,
    /// Groups or negations nested deeper than the parser allows.
    TooDeep,
}

/// A filter query that tokenized but does not form a boolean expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("filter syntax error at token {position}: {kind:?}")]
pub struct FilterSyntaxError {
    /// Classification of the problem.
    pub kind: SyntaxErrorKind,
    /// Index of the offending token in the compiled token stream.
    pub position: usize,
}

/// Failures while turning manual files into a document tree.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The grammar could not be loaded into the parser.
    #[error("failed to load grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),

    /// The structure query does not compile against the grammar.
    #[error("invalid structure query: {0}")]
    Query(#[from] tree_sitter::QueryError),

    /// The parser produced no tree.
    #[error("failed to parse {0}")]
    Parse(PathBuf),
}

impl From<LoadError> for std::io::Error {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Io { source, .. } => source,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
