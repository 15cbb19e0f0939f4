//! Post-merge hook.
//!
//! After resources change, the project's dependencies are refreshed with
//! `flutter pub get` so the generated localizations pick up the new key.
//! The hook is best effort: its failures are logged and never returned.

use std::{
    fmt, io,
    path::Path,
    process::{Command, Stdio},
};

pub const HOOK_PROGRAM: &str = "flutter";
pub const HOOK_ARGS: &[&str] = &["pub", "get"];

/// Captured result of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs an external program to completion.
pub trait ProcessRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<CommandOutput>;
}

/// Spawns real processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], cwd: &Path) -> io::Result<CommandOutput> {
        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .output()?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    Succeeded,
    Failed { code: Option<i32> },
    NotStarted { error: String },
}

impl HookOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, HookOutcome::Succeeded)
    }
}

impl fmt::Display for HookOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let command = hook_command_line();
        match self {
            HookOutcome::Succeeded => write!(f, "`{}` succeeded", command),
            HookOutcome::Failed { code: Some(code) } => {
                write!(f, "`{}` exited with status {}", command, code)
            }
            HookOutcome::Failed { code: None } => {
                write!(f, "`{}` was terminated by a signal", command)
            }
            HookOutcome::NotStarted { error } => {
                write!(f, "`{}` could not be started: {}", command, error)
            }
        }
    }
}

pub fn hook_command_line() -> String {
    std::iter::once(HOOK_PROGRAM)
        .chain(HOOK_ARGS.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Run the dependency refresh in `project_root` and wait for it.
///
/// Output lines go to the log. Nothing here fails the caller.
pub fn run_post_merge_hook(runner: &dyn ProcessRunner, project_root: &Path) -> HookOutcome {
    tracing::info!(
        "Running `{}` in {}",
        hook_command_line(),
        project_root.display()
    );

    let output = match runner.run(HOOK_PROGRAM, HOOK_ARGS, project_root) {
        Ok(output) => output,
        Err(err) => {
            let outcome = HookOutcome::NotStarted {
                error: err.to_string(),
            };
            tracing::warn!("{}", outcome);
            return outcome;
        }
    };

    for line in output.stdout.lines().chain(output.stderr.lines()) {
        tracing::info!(target: "arbify::hook", "{}", line);
    }

    if output.success() {
        tracing::info!("{}", HookOutcome::Succeeded);
        HookOutcome::Succeeded
    } else {
        let outcome = HookOutcome::Failed { code: output.code };
        tracing::warn!("{}", outcome);
        outcome
    }
}
