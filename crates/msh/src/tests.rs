use mockall::{mock, predicate::eq, Sequence};
use msh_core::{Host, MAX_JOBS};

use crate::shell::{MockShell, ShellInput};

use super::*;

mock! {
    TestHost {}

    impl Host for TestHost {
        fn println(&mut self, text: &str);
        fn eprintln(&mut self, text: &str);
    }
}

fn context_with(host: MockTestHost) -> Context {
    Context::new(Arc::new(Mutex::new(host)), MAX_JOBS)
}

fn lines(mut inputs: Vec<ShellInput>) -> impl FnMut(&str) -> ShellInput {
    inputs.reverse();
    move |_| inputs.pop().unwrap_or(ShellInput::None)
}

fn default_options() -> ParseOptions {
    ParseOptions {
        max_stages: msh_parse::MAX_STAGES,
        strict_stages: false,
    }
}

#[test]
fn shell_interrupt_then_end_of_input() {
    let mut context = context_with(MockTestHost::new());

    let mut mock_shell = MockShell::new();
    mock_shell.expect_is_interactive().returning(|| false);
    mock_shell
        .expect_prompt_line()
        .times(2)
        .returning(lines(vec![ShellInput::Interrupt, ShellInput::Logout]));

    run_shell(
        &mut mock_shell,
        &Executor::default(),
        &mut context,
        &default_options(),
    );
    assert_eq!(context.commands_executed(), 0);
}

#[test]
fn shell_interactive_logout_prints_hint() {
    let mut mock_host = MockTestHost::new();
    mock_host
        .expect_println()
        .with(eq("Use 'exit' to quit"))
        .times(1)
        .return_const(());
    let mut context = context_with(mock_host);

    let mut mock_shell = MockShell::new();
    mock_shell.expect_is_interactive().returning(|| true);
    mock_shell
        .expect_prompt_line()
        .times(2)
        .returning(lines(vec![ShellInput::Logout, ShellInput::None]));

    run_shell(
        &mut mock_shell,
        &Executor::default(),
        &mut context,
        &default_options(),
    );
}

#[test]
fn shell_counts_and_records_non_empty_lines() {
    let mut context = context_with(MockTestHost::new());

    let mut seq = Sequence::new();
    let mut mock_shell = MockShell::new();
    mock_shell.expect_is_interactive().returning(|| false);
    mock_shell.expect_prompt_line().returning(lines(vec![
        ShellInput::Line("   ".to_owned()),
        ShellInput::Line(" true \n".to_owned()),
        ShellInput::Line("true | true".to_owned()),
    ]));
    mock_shell
        .expect_add_history_entry()
        .with(eq("true"))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    mock_shell
        .expect_add_history_entry()
        .with(eq("true | true"))
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());

    run_shell(
        &mut mock_shell,
        &Executor::default(),
        &mut context,
        &default_options(),
    );

    assert_eq!(context.commands_executed(), 2);
    assert_eq!(context.history(), &["true", "true | true"]);
    assert_eq!(context.last_exit(), 0);
}

#[test]
fn shell_stops_when_exit_is_requested() {
    let mut mock_host = MockTestHost::new();
    mock_host.expect_println().return_const(());
    let mut context = context_with(mock_host);

    let mut mock_shell = MockShell::new();
    mock_shell.expect_is_interactive().returning(|| false);
    mock_shell.expect_add_history_entry().return_const(());
    mock_shell
        .expect_prompt_line()
        .times(1)
        .returning(lines(vec![
            ShellInput::Line("exit 3".to_owned()),
            ShellInput::Line("false".to_owned()),
        ]));

    run_shell(
        &mut mock_shell,
        &Executor::new(msh_builtins::all_builtins()),
        &mut context,
        &default_options(),
    );

    assert_eq!(context.exit_request(), Some(3));
    assert_eq!(context.commands_executed(), 1);
}

#[test]
fn shell_reports_rejected_pipelines() {
    let mut mock_host = MockTestHost::new();
    mock_host
        .expect_eprintln()
        .withf(|text| text.starts_with("msh: too many pipeline stages"))
        .times(1)
        .return_const(());
    mock_host
        .expect_eprintln()
        .withf(|text| text.starts_with("help: "))
        .times(1)
        .return_const(());
    let mut context = context_with(mock_host);

    let mut mock_shell = MockShell::new();
    mock_shell.expect_is_interactive().returning(|| false);
    mock_shell.expect_add_history_entry().return_const(());
    mock_shell
        .expect_prompt_line()
        .returning(lines(vec![ShellInput::Line("true | true | true".to_owned())]));

    let options = ParseOptions {
        max_stages: 2,
        strict_stages: true,
    };
    run_shell(&mut mock_shell, &Executor::default(), &mut context, &options);

    assert_eq!(context.commands_executed(), 1);
    assert_eq!(context.jobs().lock().list().len(), 0);
}
