//! Turns the outcome of a script into its output and exit status.
//!
//! On success the result is written as a single line to `out`. On failure
//! the whole error report, causes included, goes to `err` and nothing is
//! written to `out`.

use clap::Parser;
use std::{ffi::OsString, fmt::Display, io::Write, process::ExitCode};

/// Terminal state of a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Success,
    Failure,
}

impl Status {
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
        }
    }
}

impl From<Status> for ExitCode {
    fn from(status: Status) -> Self {
        Self::from(status.code())
    }
}

/// Await `flow` and report its outcome.
pub async fn run<T, F>(flow: F, out: &mut impl Write, err: &mut impl Write) -> Status
where
    T: Display,
    F: Future<Output = eyre::Result<T>>,
{
    let result = flow.await.and_then(|value| {
        writeln!(out, "{value}")?;
        out.flush()?;
        Ok(())
    });

    match result {
        Ok(()) => Status::Success,
        Err(report) => {
            // Nothing sensible is left to do if stderr itself is gone.
            let _ = writeln!(err, "Error: {report:?}");
            Status::Failure
        }
    }
}

/// Parse the command line.
///
/// Usage errors are written to `err` and end with [`Status::Failure`]; help
/// and version output goes to `out` and ends with [`Status::Success`].
pub fn parse_args<P, I, A>(args: I, out: &mut impl Write, err: &mut impl Write) -> Result<P, Status>
where
    P: Parser,
    I: IntoIterator<Item = A>,
    A: Into<OsString> + Clone,
{
    P::try_parse_from(args).map_err(|error| {
        let rendered = error.render();
        if error.use_stderr() {
            let _ = write!(err, "{rendered}");
            Status::Failure
        } else {
            let _ = write!(out, "{rendered}");
            Status::Success
        }
    })
}
