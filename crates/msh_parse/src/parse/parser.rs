use msh_ast::Pipeline;

use crate::{lex::lexer::lex, ParseError};

use super::command::parse_command;

/// Default maximum number of stages in a pipeline.
pub const MAX_STAGES: usize = 10;

/// Separates pipeline stages.
const PIPE: char = '|';

/// Marks a pipeline for background execution when it ends the input.
const BACKGROUND: char = '&';

/// Options controlling how input is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum number of stages in a pipeline.
    pub max_stages: usize,

    /// Reject pipelines with more than [`ParseOptions::max_stages`] stages rather
    /// than discarding the excess stages.
    pub strict_stages: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_stages: MAX_STAGES,
            strict_stages: false,
        }
    }
}

/// Parses a line of input into a [`Pipeline`] using the default options.
///
/// Parsing never fails. Degenerate input, such as an empty line, results in a
/// pipeline without stages.
pub fn parse(line: &str) -> Pipeline {
    let (pipeline, discarded) = split_pipeline(line, MAX_STAGES);
    if discarded > 0 {
        warn_discarded(MAX_STAGES, discarded);
    }
    pipeline
}

/// Parses a line of input into a [`Pipeline`].
pub fn parse_with(line: &str, options: &ParseOptions) -> Result<Pipeline, ParseError> {
    let (pipeline, discarded) = split_pipeline(line, options.max_stages);

    if discarded > 0 {
        if options.strict_stages {
            return Err(ParseError::TooManyStages {
                max: options.max_stages,
                found: options.max_stages + discarded,
            });
        }

        warn_discarded(options.max_stages, discarded);
    }

    Ok(pipeline)
}

/// Splits a line into at most `max_stages` parsed stages.
///
/// Returns the pipeline along with the number of discarded stages.
fn split_pipeline(line: &str, max_stages: usize) -> (Pipeline, usize) {
    let mut pipeline = Pipeline::default();
    let mut body = line.trim();

    if let Some(rest) = body.strip_suffix(BACKGROUND) {
        pipeline.background = true;
        body = rest.trim_end();
    }

    // Adjacent delimiters do not produce empty stages.
    let mut segments = body.split(PIPE).filter(|segment| !segment.is_empty());

    for segment in segments.by_ref().take(max_stages) {
        pipeline.stages.push(parse_command(&lex(segment)));
    }

    (pipeline, segments.count())
}

fn warn_discarded(max: usize, discarded: usize) {
    tracing::warn!(max, discarded, "discarding excess pipeline stages");
}
