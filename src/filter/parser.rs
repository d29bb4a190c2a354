//! Recursive descent over filter tokens.
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! or      := and ( '|' and )*
//! and     := unary ( '+' unary )*
//! unary   := '-' unary | primary
//! primary := term | '(' or ')'
//! term    := ( literal | wildcard )+
//! ```
//!
//! AND and OR chains are kept flat, so only groups and negations nest. Their depth is bounded
//! by [`MAX_DEPTH`].

use super::lexer::Token;
use crate::error::{FilterSyntaxError, SyntaxErrorKind};
use regex::{Regex, RegexBuilder};

/// Deepest nesting of groups and negations a query may use.
pub const MAX_DEPTH: usize = 256;

#[derive(Clone, Debug)]
/// Boolean expression over chapter text.
pub enum Expr {
    /// Whole-word match of a pattern.
    Term(Pattern),
    /// Negation.
    Not(Box<Expr>),
    /// Every operand must match.
    And(Vec<Expr>),
    /// At least one operand must match.
    Or(Vec<Expr>),
}

impl Expr {
    #[must_use]
    /// Evaluates the expression against normalized chapter text.
    pub fn matches(&self, text: &str) -> bool {
        match self {
            Self::Term(pattern) => pattern.is_match(text),
            Self::Not(inner) => !inner.matches(text),
            Self::And(operands) => operands.iter().all(|operand| operand.matches(text)),
            Self::Or(operands) => operands.iter().any(|operand| operand.matches(text)),
        }
    }
}

#[derive(Clone, Debug)]
/// Case-insensitive, word-bounded pattern built from literal text and wildcards.
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    fn new(parts: &[&Token], position: usize) -> Result<Self, FilterSyntaxError> {
        let mut source = String::new();
        let mut expression = String::new();
        for part in parts {
            match part {
                Token::Literal(text) => {
                    source.push_str(text);
                    expression.push_str(&regex::escape(text));
                }
                _ => {
                    source.push('*');
                    expression.push_str(".*");
                }
            }
        }

        // Word boundaries only make sense next to word characters, so `c++` still matches
        // before a space.
        let starts_with_word = matches!(
            parts.first(),
            Some(Token::Literal(text)) if text.chars().next().is_some_and(is_word_char)
        );
        let ends_with_word = matches!(
            parts.last(),
            Some(Token::Literal(text)) if text.chars().last().is_some_and(is_word_char)
        );
        if starts_with_word {
            expression.insert_str(0, r"\b");
        }
        if ends_with_word {
            expression.push_str(r"\b");
        }

        let regex = RegexBuilder::new(&expression)
            .case_insensitive(true)
            .build()
            .map_err(|_| FilterSyntaxError {
                kind: SyntaxErrorKind::TermTooComplex,
                position,
            })?;
        Ok(Self { source, regex })
    }

    #[must_use]
    /// Term as written, `*` marking wildcards.
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    /// Whether the pattern occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// Parses a token stream. An empty stream yields `Ok(None)`, the query that matches everything.
///
/// # Errors
///
/// Returns [`FilterSyntaxError`] if the tokens do not form a complete expression.
pub fn parse(tokens: &[Token]) -> Result<Option<Expr>, FilterSyntaxError> {
    if tokens.is_empty() {
        return Ok(None);
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let expr = parser.or()?;
    match parser.peek() {
        None => Ok(Some(expr)),
        Some(Token::GroupClose) => Err(parser.error(SyntaxErrorKind::UnexpectedGroupClose)),
        Some(_) => Err(parser.error(SyntaxErrorKind::MissingOperator)),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn error(&self, kind: SyntaxErrorKind) -> FilterSyntaxError {
        FilterSyntaxError {
            kind,
            position: self.pos,
        }
    }

    fn descend(&mut self) -> Result<(), FilterSyntaxError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error(SyntaxErrorKind::TooDeep));
        }
        self.depth += 1;
        Ok(())
    }

    fn or(&mut self) -> Result<Expr, FilterSyntaxError> {
        let mut operands = vec![self.and()?];
        while self.peek() == Some(&Token::Or) {
            self.pos += 1;
            operands.push(self.and()?);
        }
        Ok(flatten(operands, Expr::Or))
    }

    fn and(&mut self) -> Result<Expr, FilterSyntaxError> {
        let mut operands = vec![self.unary()?];
        while self.peek() == Some(&Token::And) {
            self.pos += 1;
            operands.push(self.unary()?);
        }
        Ok(flatten(operands, Expr::And))
    }

    fn unary(&mut self) -> Result<Expr, FilterSyntaxError> {
        if self.peek() != Some(&Token::Not) {
            return self.primary();
        }
        self.pos += 1;
        self.descend()?;
        let inner = self.unary()?;
        self.depth -= 1;
        Ok(Expr::Not(Box::new(inner)))
    }

    fn primary(&mut self) -> Result<Expr, FilterSyntaxError> {
        match self.peek() {
            None | Some(Token::GroupClose) => Err(self.error(SyntaxErrorKind::MissingOperand)),
            Some(Token::And | Token::Or) => Err(self.error(SyntaxErrorKind::DanglingOperator)),
            Some(Token::Not) => self.unary(),
            Some(Token::GroupOpen) => {
                self.pos += 1;
                if self.peek() == Some(&Token::GroupClose) {
                    return Err(self.error(SyntaxErrorKind::EmptyGroup));
                }
                self.descend()?;
                let inner = self.or()?;
                match self.peek() {
                    Some(Token::GroupClose) => {
                        self.pos += 1;
                        self.depth -= 1;
                        Ok(inner)
                    }
                    None => Err(self.error(SyntaxErrorKind::UnclosedGroup)),
                    Some(_) => Err(self.error(SyntaxErrorKind::MissingOperator)),
                }
            }
            Some(Token::Literal(_) | Token::Wildcard) => {
                let start = self.pos;
                let parts: Vec<&Token> = self.tokens[start..]
                    .iter()
                    .take_while(|token| matches!(token, Token::Literal(_) | Token::Wildcard))
                    .collect();
                self.pos += parts.len();
                Ok(Expr::Term(Pattern::new(&parts, start)?))
            }
        }
    }
}

/// Unwraps single-operand chains.
fn flatten(mut operands: Vec<Expr>, chain: fn(Vec<Expr>) -> Expr) -> Expr {
    if operands.len() == 1 {
        operands.remove(0)
    } else {
        chain(operands)
    }
}
