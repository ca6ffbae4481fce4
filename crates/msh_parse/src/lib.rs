mod error;
mod lex;
mod parse;
mod tokens;

pub use error::ParseError;
pub use lex::input::is_whitespace;
pub use lex::lexer::{lex, Span, Token};
pub use parse::parser::{parse, parse_with, ParseOptions, MAX_STAGES};
pub use tokens::TokenContents;
