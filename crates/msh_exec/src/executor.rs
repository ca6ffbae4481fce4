use std::{collections::HashMap, io::Write, time::Instant};

use msh_ast::Pipeline;
use msh_core::{
    command::{self, Action, Args},
    status, Context, JobTableError, Reaper,
};
use nix::unistd::Pid;

use crate::{
    error::{ExecError, ExecResult},
    redirect::open_io,
    spawn::{spawn_pipeline, Program},
};

/// A pipeline stage in runnable form.
enum Stage<'a> {
    /// A built-in command that runs within the shell's own process.
    Builtin(&'a dyn command::Command, &'a msh_ast::Command),

    /// A program that runs in a child process.
    External(Program),

    /// A stage without a program. Nothing is started for it.
    Empty,
}

/// An executor is responsible for executing parsed pipelines.
#[derive(Clone, Default)]
pub struct Executor {
    /// Built-in commands keyed by their name.
    builtins: HashMap<String, Box<dyn command::Command>>,
}

impl Executor {
    /// Creates an executor with some built-in commands.
    pub fn new(commands: Vec<Box<dyn command::Command>>) -> Self {
        let mut builtins = HashMap::with_capacity(commands.len());
        for command in commands {
            builtins.insert(command.name().to_owned(), command);
        }

        Self { builtins }
    }

    /// Registers a built-in [`command::Command`] within the executor.
    ///
    /// Any previous built-in command with the same name is replaced.
    pub fn register_command(&mut self, builtin: Box<dyn command::Command>) {
        self.builtins.insert(builtin.name().to_string(), builtin);
    }

    /// Returns `true` if a built-in command is registered with a name.
    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtins.contains_key(name)
    }

    /// Executes a [`Pipeline`].
    ///
    /// Foreground pipelines are waited for, and their exit code is returned.
    /// Background pipelines are registered as jobs and return immediately with
    /// a successful exit code. Empty pipelines do nothing.
    ///
    /// Errors are returned only if the pipeline could not be started. Failures
    /// within started stages are reported through exit codes.
    pub fn execute(&self, pipeline: &Pipeline, context: &mut Context) -> ExecResult<i32> {
        if pipeline.is_empty() {
            return Ok(status::SUCCESS);
        }

        let mut stages = self.resolve(pipeline)?;
        if let [Stage::Builtin(builtin, command)] = stages.as_slice() {
            return Ok(self.run_builtin(*builtin, command, context));
        }

        let programs: Vec<_> = stages
            .drain(..)
            .map(|stage| match stage {
                Stage::External(program) => Some(program),
                Stage::Builtin(..) | Stage::Empty => None,
            })
            .collect();

        let reaper = Reaper::global()?;
        if pipeline.background {
            let jobs = context.jobs();
            let table = jobs.lock();
            if !table.has_capacity() {
                return Err(JobTableError::Full(table.capacity()).into());
            }
        }

        let started = Instant::now();
        let pids = spawn_pipeline(&programs, reaper)?;
        drop(programs);

        if pipeline.background {
            return self.track(pipeline, &pids, reaper, context);
        }

        let codes = reaper.wait_all(&pids);
        let code = codes.last().copied().unwrap_or(status::SUCCESS);
        tracing::debug!(?codes, "foreground pipeline exited");
        context.register_exit(code);

        if context.show_stats() {
            let elapsed = started.elapsed().as_secs_f64();
            context
                .host
                .lock()
                .println(&format!("[Execution time: {elapsed:.3}s]"));
        }

        Ok(code)
    }

    /// Resolves every stage of a pipeline into a runnable form.
    ///
    /// Built-in commands are only recognized in single-stage pipelines. Within
    /// longer pipelines, all stages run as external programs.
    fn resolve<'a>(&'a self, pipeline: &'a Pipeline) -> ExecResult<Vec<Stage<'a>>> {
        if let [command] = pipeline.stages.as_slice() {
            if let Some(builtin) = self.builtins.get(&command.program) {
                return Ok(vec![Stage::Builtin(builtin.as_ref(), command)]);
            }
        }

        pipeline
            .stages
            .iter()
            .map(|command| {
                if command.is_empty() {
                    Ok(Stage::Empty)
                } else {
                    Program::prepare(command).map(Stage::External)
                }
            })
            .collect()
    }

    /// Runs a built-in command within the shell's process and performs the
    /// actions that it requests.
    ///
    /// Returns an exit code.
    fn run_builtin(
        &self,
        builtin: &dyn command::Command,
        command: &msh_ast::Command,
        context: &mut Context,
    ) -> i32 {
        let mut io = match open_io(command) {
            Ok(io) => io,
            Err(err) => {
                context.host.lock().eprintln(&format!("msh: {err}"));
                context.register_exit(status::GENERAL_ERROR);
                return status::GENERAL_ERROR;
            }
        };

        tracing::debug!(builtin = builtin.name(), "running built-in command");
        let result = builtin.run(&mut Args::new(context, &mut io, &command.arguments));
        let _ = io.stdout.flush();

        for action in result.actions {
            self.perform_action(action, context);
        }

        context.register_exit(result.code);
        result.code
    }

    /// Performs an action that was requested by a built-in command.
    fn perform_action(&self, action: Action, context: &mut Context) {
        match action {
            Action::Exit(code) => context.request_exit(code),
        }
    }

    /// Registers a started background pipeline as a job.
    ///
    /// The job follows the pipeline's last started stage. Exit codes of the
    /// other stages are discarded.
    fn track(
        &self,
        pipeline: &Pipeline,
        pids: &[Pid],
        reaper: &Reaper,
        context: &mut Context,
    ) -> ExecResult<i32> {
        let Some((&last, others)) = pids.split_last() else {
            return Ok(status::SUCCESS);
        };

        let jobs = context.jobs();
        let registered = jobs.lock().register(last, pipeline.command_line());
        let ordinal = match registered {
            Ok(ordinal) => ordinal,
            Err(err) => {
                for pid in pids {
                    reaper.detach(*pid);
                }
                return Err(ExecError::from(err));
            }
        };

        for pid in others {
            reaper.detach(*pid);
        }
        reaper.watch(last, move |code| {
            jobs.lock().mark_done(last, code);
        });

        context.host.lock().println(&format!("[{ordinal}] {last}"));
        context.register_exit(status::SUCCESS);
        Ok(status::SUCCESS)
    }
}

#[cfg(test)]
mod tests {
    use msh_core::command::CommandResult;

    use super::*;

    #[derive(Clone)]
    struct Marker;

    impl command::Command for Marker {
        fn name(&self) -> &str {
            "marker"
        }

        fn run(&self, args: &mut Args) -> CommandResult {
            let code = args.iter().count() as i32;
            CommandResult::with_actions(code, vec![Action::Exit(code)])
        }
    }

    fn pipeline(stages: &[&[&str]]) -> Pipeline {
        Pipeline {
            background: false,
            stages: stages
                .iter()
                .map(|args| msh_ast::Command::new(args.iter().copied()))
                .collect(),
        }
    }

    #[test]
    fn it_registers_builtins_by_name() {
        let mut executor = Executor::default();
        assert!(!executor.is_builtin("marker"));
        executor.register_command(Box::new(Marker));
        assert!(executor.is_builtin("marker"));
    }

    #[test]
    fn it_resolves_builtins_only_in_single_stage_pipelines() {
        let executor = Executor::new(vec![Box::new(Marker)]);

        let single = pipeline(&[&["marker"]]);
        let stages = executor.resolve(&single).unwrap();
        assert!(matches!(stages.as_slice(), [Stage::Builtin(..)]));

        let multi = pipeline(&[&["marker"], &["cat"]]);
        let stages = executor.resolve(&multi).unwrap();
        assert!(matches!(
            stages.as_slice(),
            [Stage::External(_), Stage::External(_)]
        ));
    }

    #[test]
    fn it_resolves_stages_without_programs_as_empty() {
        let executor = Executor::default();
        let mut pipeline = pipeline(&[&["echo", "hi"]]);
        let mut redirect_only = msh_ast::Command::default();
        redirect_only.write_to("/tmp/out", false);
        pipeline.stages.push(redirect_only);

        let stages = executor.resolve(&pipeline).unwrap();
        assert!(matches!(stages.as_slice(), [Stage::External(_), Stage::Empty]));
    }

    #[test]
    fn it_performs_builtin_actions() {
        let executor = Executor::new(vec![Box::new(Marker)]);
        let mut context = Context::default();

        let code = executor
            .execute(&pipeline(&[&["marker", "a", "b"]]), &mut context)
            .unwrap();
        assert_eq!(code, 3);
        assert_eq!(context.last_exit(), 3);
        assert_eq!(context.exit_request(), Some(3));
    }

    #[test]
    fn it_ignores_empty_pipelines() {
        let executor = Executor::default();
        let mut context = Context::default();
        context.register_exit(5);

        let code = executor.execute(&Pipeline::default(), &mut context).unwrap();
        assert_eq!(code, 0);
        assert_eq!(context.last_exit(), 5);
    }
}
