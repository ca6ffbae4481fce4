use msh_ast::{Command, Pipeline};

use super::parser::*;
use crate::ParseError;

/// Constructs a command from arguments, and optional redirects.
fn command(args: &[&str], input: Option<&str>, output: Option<(&str, bool)>) -> Command {
    let mut command = Command::new(args.iter().copied());
    if let Some(input) = input {
        command.read_from(input);
    }
    if let Some((output, append)) = output {
        command.write_to(output, append);
    }
    command
}

#[test]
fn parse_empty_input() {
    assert_eq!(parse(""), Pipeline::default());
    assert_eq!(parse("   \t  \n"), Pipeline::default());
}

#[test]
fn parse_single_command() {
    assert_eq!(
        parse("  ls -la /tmp  \n"),
        Pipeline {
            background: false,
            stages: vec![command(&["ls", "-la", "/tmp"], None, None)],
        }
    );
}

#[test]
fn parse_background_marker() {
    let expected = Pipeline {
        background: true,
        stages: vec![command(&["sleep", "2"], None, None)],
    };
    assert_eq!(parse("sleep 2 &"), expected);
    assert_eq!(parse("sleep 2&"), expected);
    assert_eq!(parse("sleep 2 \t &  "), expected);
}

#[test]
fn parse_background_marker_only() {
    assert_eq!(
        parse("&"),
        Pipeline {
            background: true,
            stages: Vec::new(),
        }
    );
}

#[test]
fn parse_ampersand_within_line_is_a_word() {
    assert_eq!(
        parse("echo a & b"),
        Pipeline {
            background: false,
            stages: vec![command(&["echo", "a", "&", "b"], None, None)],
        }
    );
}

#[test]
fn parse_pipeline_stages() {
    assert_eq!(
        parse("cat file.txt | grep error|wc -l"),
        Pipeline {
            background: false,
            stages: vec![
                command(&["cat", "file.txt"], None, None),
                command(&["grep", "error"], None, None),
                command(&["wc", "-l"], None, None),
            ],
        }
    );
}

#[test]
fn parse_adjacent_pipes_without_empty_stages() {
    assert_eq!(parse("a || b").stages.len(), 2);
    assert_eq!(parse("| a |").stages, vec![command(&["a"], None, None)]);
}

#[test]
fn parse_whitespace_stage_has_no_program() {
    let pipeline = parse("a | | b");
    assert_eq!(pipeline.stages.len(), 3);
    assert!(pipeline.stages[1].is_empty());
}

#[test]
fn parse_redirects() {
    assert_eq!(
        parse("sort < input.txt > output.txt").stages,
        vec![command(&["sort"], Some("input.txt"), Some(("output.txt", false)))]
    );
    assert_eq!(
        parse("echo hello >> log.txt").stages,
        vec![command(&["echo", "hello"], None, Some(("log.txt", true)))]
    );
}

#[test]
fn parse_redirects_between_arguments() {
    assert_eq!(
        parse("grep > out.txt error < in.txt -n").stages,
        vec![command(
            &["grep", "error", "-n"],
            Some("in.txt"),
            Some(("out.txt", false))
        )]
    );
}

#[test]
fn parse_last_redirect_wins() {
    assert_eq!(
        parse("cmd > a.txt >> b.txt < c.txt < d.txt").stages,
        vec![command(&["cmd"], Some("d.txt"), Some(("b.txt", true)))]
    );
    assert_eq!(
        parse("cmd >> a.txt > b.txt").stages,
        vec![command(&["cmd"], None, Some(("b.txt", false)))]
    );
}

#[test]
fn parse_dangling_redirect() {
    assert_eq!(
        parse("ls >").stages,
        vec![command(&["ls"], None, None)]
    );
    assert_eq!(
        parse("cat <").stages,
        vec![command(&["cat"], None, None)]
    );
}

#[test]
fn parse_operator_as_redirect_target() {
    assert_eq!(
        parse("echo > >").stages,
        vec![command(&["echo"], None, Some((">", false)))]
    );
}

#[test]
fn parse_redirects_without_program() {
    let pipeline = parse("> out.txt");
    assert_eq!(pipeline.stages.len(), 1);
    assert!(pipeline.stages[0].is_empty());
    assert_eq!(pipeline.stages[0].output_target.as_deref(), Some("out.txt"));
    assert!(pipeline.is_empty());
}

#[test]
fn parse_redirects_in_every_stage() {
    assert_eq!(
        parse("cat < in.txt | sort | uniq > out.txt &"),
        Pipeline {
            background: true,
            stages: vec![
                command(&["cat"], Some("in.txt"), None),
                command(&["sort"], None, None),
                command(&["uniq"], None, Some(("out.txt", false))),
            ],
        }
    );
}

#[test]
fn parse_truncates_excess_stages() {
    let line = vec!["cat"; MAX_STAGES + 3].join(" | ");
    assert_eq!(parse(&line).stages.len(), MAX_STAGES);
}

#[test]
fn parse_with_custom_stage_limit() {
    let options = ParseOptions {
        max_stages: 2,
        strict_stages: false,
    };
    let pipeline = parse_with("a | b | c", &options).expect("non-strict parsing succeeds");
    assert_eq!(
        pipeline.stages,
        vec![command(&["a"], None, None), command(&["b"], None, None)]
    );
}

#[test]
fn parse_with_strict_stage_limit() {
    let options = ParseOptions {
        max_stages: 2,
        strict_stages: true,
    };
    assert_eq!(
        parse_with("a | b | c | d", &options),
        Err(ParseError::TooManyStages { max: 2, found: 4 })
    );
    assert!(parse_with("a | b", &options).is_ok());
}
