//! Sequential playbook execution.

use serde::Serialize;
use std::fmt;
use std::process::{Command, Stdio};

use crate::error::{SequencerError, FAILURE_EXIT_CODE};

/// Extra arguments appended to every runner invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraArgs {
    args: Vec<String>,
}

impl ExtraArgs {
    /// Split a flat argument string on single spaces.
    ///
    /// No quoting is understood, so an argument cannot contain a space.
    /// Consecutive spaces yield empty arguments. An empty string yields none.
    pub fn from_flat(flat: &str) -> Self {
        if flat.is_empty() {
            return Self::default();
        }
        Self {
            args: flat.split(' ').map(str::to_string).collect(),
        }
    }

    /// Append arguments verbatim, after the split ones.
    pub fn with_trailing(mut self, trailing: impl IntoIterator<Item = String>) -> Self {
        self.args.extend(trailing);
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.args
    }
}

/// One runner invocation: `<program> <playbook> <args...>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlannedCommand {
    pub playbook: String,
    pub program: String,
    pub args: Vec<String>,
}

impl PlannedCommand {
    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg(&self.playbook)
            .args(&self.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }
}

impl fmt::Display for PlannedCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.program, self.playbook)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Progress of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    /// Executing the playbook at this index of the plan.
    Running(usize),
    Failed { index: usize, code: i32 },
    Done,
}

/// Runs playbooks one at a time, stopping at the first failure.
pub struct PlaybookRunner {
    program: String,
    extra_args: ExtraArgs,
    dry_run: bool,
    state: RunState,
}

impl PlaybookRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: ExtraArgs::default(),
            dry_run: false,
            state: RunState::Idle,
        }
    }

    pub fn with_extra_args(mut self, extra_args: ExtraArgs) -> Self {
        self.extra_args = extra_args;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Commands that `run` would execute, in order.
    pub fn plan(&self, playbooks: &[String]) -> Vec<PlannedCommand> {
        playbooks
            .iter()
            .map(|playbook| PlannedCommand {
                playbook: playbook.clone(),
                program: self.program.clone(),
                args: self.extra_args.as_slice().to_vec(),
            })
            .collect()
    }

    /// Execute every playbook in order.
    ///
    /// Each command line is echoed to stdout first. The child inherits the
    /// parent's stdio and is waited on before the next one starts.
    pub fn run(&mut self, playbooks: &[String]) -> Result<(), SequencerError> {
        for (index, command) in self.plan(playbooks).into_iter().enumerate() {
            self.state = RunState::Running(index);
            println!("{}", command);

            if self.dry_run {
                continue;
            }

            tracing::debug!(index, playbook = %command.playbook, "Running playbook");

            if let Err(e) = Self::execute(&command) {
                self.state = RunState::Failed {
                    index,
                    code: e.exit_code(),
                };
                return Err(e);
            }
        }

        self.state = RunState::Done;
        Ok(())
    }

    fn execute(command: &PlannedCommand) -> Result<(), SequencerError> {
        let status = command.to_command().status().map_err(|e| SequencerError::Execution {
            playbook: command.playbook.clone(),
            code: FAILURE_EXIT_CODE,
            message: format!("failed to spawn {}: {}", command.program, e),
        })?;

        if !status.success() {
            // A child killed by a signal has no exit code.
            return Err(SequencerError::Execution {
                playbook: command.playbook.clone(),
                code: status.code().unwrap_or(FAILURE_EXIT_CODE),
                message: status.to_string(),
            });
        }

        Ok(())
    }
}
