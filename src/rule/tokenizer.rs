//! Rule string tokenizer

use crate::config::KeywordCasing;
use std::fmt;

/// Lexical token of a rule string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Run of word characters: field names, bare values, numbers
    Identifier(String),
    /// Single-quoted span, quotes included
    Literal(String),
    /// Run of `>`, `<`, `=` characters, e.g. `>` or `>>`
    Comparison(String),
    And,
    Or,
    OpenParen,
    CloseParen,
}

impl Token {
    /// Source text of the token, with connectives in canonical casing
    pub fn text(&self) -> &str {
        match self {
            Token::Identifier(s) | Token::Literal(s) | Token::Comparison(s) => s,
            Token::And => "AND",
            Token::Or => "OR",
            Token::OpenParen => "(",
            Token::CloseParen => ")",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Tokenize a rule string, recognizing only upper-case `AND` / `OR`
pub fn tokenize(rule: &str) -> Vec<Token> {
    tokenize_with(rule, KeywordCasing::Upper)
}

/// Tokenize a rule string.
///
/// Whitespace separates tokens. Characters that start no token, including an
/// unterminated quote, are skipped.
pub fn tokenize_with(rule: &str, casing: KeywordCasing) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(c) = rule[pos..].chars().next() {
        if is_word_char(c) {
            let end = scan_while(rule, pos, is_word_char);
            tokens.push(classify_word(&rule[pos..end], casing));
            pos = end;
        } else if is_comparison_char(c) {
            let end = scan_while(rule, pos, is_comparison_char);
            tokens.push(Token::Comparison(rule[pos..end].to_string()));
            pos = end;
        } else if c == '\'' {
            match rule[pos + 1..].find('\'') {
                Some(offset) => {
                    let end = pos + offset + 2;
                    tokens.push(Token::Literal(rule[pos..end].to_string()));
                    pos = end;
                }
                None => pos += 1,
            }
        } else {
            match c {
                '(' => tokens.push(Token::OpenParen),
                ')' => tokens.push(Token::CloseParen),
                _ => {}
            }
            pos += c.len_utf8();
        }
    }

    tokens
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[inline]
fn is_comparison_char(c: char) -> bool {
    matches!(c, '>' | '<' | '=')
}

/// Byte offset of the first char at or after `start` that fails `pred`
fn scan_while(s: &str, start: usize, pred: fn(char) -> bool) -> usize {
    s[start..]
        .char_indices()
        .find(|&(_, c)| !pred(c))
        .map_or(s.len(), |(i, _)| start + i)
}

fn classify_word(word: &str, casing: KeywordCasing) -> Token {
    let is_keyword = |keyword: &str| match casing {
        KeywordCasing::Upper => word == keyword,
        KeywordCasing::Any => word.eq_ignore_ascii_case(keyword),
    };
    if is_keyword("AND") {
        Token::And
    } else if is_keyword("OR") {
        Token::Or
    } else {
        Token::Identifier(word.to_string())
    }
}
