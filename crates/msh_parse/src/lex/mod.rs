pub mod input;
pub mod lexer;
