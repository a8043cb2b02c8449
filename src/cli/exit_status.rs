use std::process::ExitCode;

/// Process outcome of a glean run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Extraction finished; warnings (unknown calls, unparseable sources) may
    /// have been reported.
    Success,
    /// `--strict` was given and translation calls with unknown keys remain.
    Failure,
    /// Fatal error: bad config, unreadable locale file, failed write.
    Error,
}

impl ExitStatus {
    pub const fn code(self) -> u8 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code())
    }
}
