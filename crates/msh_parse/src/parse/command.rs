use msh_ast::Command;

use crate::{lex::lexer::Token, tokens::TokenContents};

/// Parses a single pipeline stage into a [`Command`].
///
/// Redirect operators consume the following token as their target, regardless
/// of what that token is. A trailing redirect operator without a target is
/// ignored.
pub fn parse_command(tokens: &[Token]) -> Command {
    let mut command = Command::default();
    let mut tokens = tokens.iter();

    while let Some(token) = tokens.next() {
        match token.contents {
            TokenContents::Word(word) => command.arg(word),
            TokenContents::Write => {
                if let Some(target) = tokens.next() {
                    command.write_to(target.contents.as_str(), false);
                }
            }
            TokenContents::Append => {
                if let Some(target) = tokens.next() {
                    command.write_to(target.contents.as_str(), true);
                }
            }
            TokenContents::Read => {
                if let Some(source) = tokens.next() {
                    command.read_from(source.contents.as_str());
                }
            }
        }
    }

    command
}
