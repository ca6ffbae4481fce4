use crate::lex::input::is_whitespace;
use crate::tokens::TokenContents;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start {} cannot come after end {}",
            start,
            end
        );
        Self { start, end }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub contents: TokenContents<'a>,
    pub span: Span,
}

impl<'a> Token<'a> {
    pub fn new(contents: TokenContents<'a>, span: Span) -> Self {
        Self { contents, span }
    }
}

/// Splits a single pipeline stage into tokens.
///
/// Tokens are separated by whitespace only. There is no quoting or escaping, so
/// an operator that is not surrounded by whitespace is part of a word.
pub fn lex(src: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (pos, ch) in src.char_indices() {
        match (is_whitespace(ch), start) {
            (true, Some(word_start)) => {
                tokens.push(word_token(src, Span::new(word_start, pos)));
                start = None;
            }
            (false, None) => start = Some(pos),
            _ => (),
        }
    }

    // Push the final word.
    if let Some(word_start) = start {
        tokens.push(word_token(src, Span::new(word_start, src.len())));
    }

    tokens
}

fn word_token(src: &str, span: Span) -> Token<'_> {
    Token::new(TokenContents::from_word(&src[span.start..span.end]), span)
}
