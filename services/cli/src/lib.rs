mod cli;
mod commands;
mod infra;

use kmb_filtering::error::AppError;
use kmb_filtering::workflows::filtering::ErrorKind;

pub fn run() -> Result<(), AppError> {
    cli::run()
}

/// Process exit status for a failed command.
pub fn exit_code(err: &AppError) -> i32 {
    match err.kind() {
        ErrorKind::Internal => 1,
        ErrorKind::BadRequest => 2,
        ErrorKind::NotFound => 3,
        ErrorKind::UpstreamTimeout => 4,
        ErrorKind::UpstreamError => 5,
    }
}
