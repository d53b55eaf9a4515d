//! attendance-automator main entrypoint.

use attendance_automator::run;
use std::process::ExitCode;

fn main() -> ExitCode {
    ExitCode::from(run())
}
