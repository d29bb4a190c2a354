//! Tokenizer for filter queries.
//!
//! Quoted phrases and backslash escapes are resolved here, so everything after this stage sees
//! plain literal text and never has to re-interpret operator characters.

#[derive(Clone, Debug, PartialEq, Eq)]
/// A token of a compiled filter query.
pub enum Token {
    /// Literal text, already unescaped.
    Literal(String),
    /// `*`: any run of characters.
    Wildcard,
    /// `+`, `&` or whitespace between operands.
    And,
    /// `|`.
    Or,
    /// `-` or `!`.
    Not,
    /// `(`.
    GroupOpen,
    /// `)`.
    GroupClose,
}

enum Lexeme {
    Token(Token),
    Space,
}

/// Splits a query into tokens, turning meaningful whitespace into [`Token::And`].
///
/// Whitespace right after `(`, `+`, `-` or `|`, right before `+`, `|` or `)`, and at either end
/// of the query carries no meaning and is dropped.
#[must_use]
pub fn tokenize(query: &str) -> Vec<Token> {
    resolve_spaces(lex(query))
}

fn lex(query: &str) -> Vec<Lexeme> {
    let chars: Vec<char> = query.chars().collect();
    let mut lexemes = Vec::new();
    let mut literal = String::new();
    let mut pos = 0;

    while pos < chars.len() {
        let ch = chars[pos];
        let operator = match ch {
            '\\' => {
                match chars.get(pos + 1) {
                    Some(next) => {
                        literal.push(*next);
                        pos += 2;
                    }
                    None => {
                        literal.push('\\');
                        pos += 1;
                    }
                }
                continue;
            }
            '"' => {
                match closing_quote(&chars, pos + 1) {
                    Some(end) => {
                        push_phrase(&mut literal, &chars[pos + 1..end]);
                        pos = end + 1;
                    }
                    None => {
                        literal.push('"');
                        pos += 1;
                    }
                }
                continue;
            }
            '*' => Lexeme::Token(Token::Wildcard),
            '+' | '&' => Lexeme::Token(Token::And),
            '-' | '!' => Lexeme::Token(Token::Not),
            '|' => Lexeme::Token(Token::Or),
            '(' => Lexeme::Token(Token::GroupOpen),
            ')' => Lexeme::Token(Token::GroupClose),
            ch if ch.is_whitespace() => Lexeme::Space,
            ch => {
                literal.push(ch);
                pos += 1;
                continue;
            }
        };

        if !literal.is_empty() {
            lexemes.push(Lexeme::Token(Token::Literal(std::mem::take(&mut literal))));
        }
        let repeated_space =
            matches!(operator, Lexeme::Space) && matches!(lexemes.last(), Some(Lexeme::Space));
        if !repeated_space {
            lexemes.push(operator);
        }
        pos += 1;
    }

    if !literal.is_empty() {
        lexemes.push(Lexeme::Token(Token::Literal(literal)));
    }
    lexemes
}

/// Position of the quote closing a phrase opened before `start`, skipping escaped quotes.
fn closing_quote(chars: &[char], start: usize) -> Option<usize> {
    let mut pos = start;
    while pos < chars.len() {
        match chars[pos] {
            '\\' => pos += 2,
            '"' => return Some(pos),
            _ => pos += 1,
        }
    }
    None
}

fn push_phrase(literal: &mut String, phrase: &[char]) {
    let mut escaped = false;
    for ch in phrase {
        if escaped || *ch != '\\' {
            literal.push(*ch);
            escaped = false;
        } else {
            escaped = true;
        }
    }
}

fn resolve_spaces(lexemes: Vec<Lexeme>) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::with_capacity(lexemes.len());
    let mut lexemes = lexemes.into_iter().peekable();

    while let Some(lexeme) = lexemes.next() {
        match lexeme {
            Lexeme::Token(token) => tokens.push(token),
            Lexeme::Space => {
                let after_operator = matches!(
                    tokens.last(),
                    None | Some(Token::GroupOpen | Token::And | Token::Not | Token::Or)
                );
                let before_operator = matches!(
                    lexemes.peek(),
                    None | Some(Lexeme::Token(Token::And | Token::Or | Token::GroupClose))
                );
                if !after_operator && !before_operator {
                    tokens.push(Token::And);
                }
            }
        }
    }
    tokens
}
