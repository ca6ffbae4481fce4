#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenContents<'a> {
    /// Any whitespace-delimited word that is not an operator.
    Word(&'a str),

    /// ">"
    Write,
    /// ">>"
    Append,
    /// "<"
    Read,
}

impl<'a> TokenContents<'a> {
    /// Classifies a whitespace-delimited word.
    pub fn from_word(word: &'a str) -> Self {
        match word {
            ">" => TokenContents::Write,
            ">>" => TokenContents::Append,
            "<" => TokenContents::Read,
            _ => TokenContents::Word(word),
        }
    }

    /// Returns the source text of the token.
    ///
    /// Operators are returned as-is, which allows them to be used as plain words
    /// where a word is expected.
    pub fn as_str(&self) -> &'a str {
        match self {
            TokenContents::Word(word) => word,
            TokenContents::Write => ">",
            TokenContents::Append => ">>",
            TokenContents::Read => "<",
        }
    }
}
