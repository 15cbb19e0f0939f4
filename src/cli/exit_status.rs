use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): the literal was extracted and every resource file updated
/// - `Failure` (1): nothing to extract, or some resource files were not updated
/// - `Error` (2): the command could not run (bad arguments, unreadable file, config error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    /// Command ran but did not fully do its job.
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
