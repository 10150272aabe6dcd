use std::process::ExitCode;

use newman_batch::cli::{CliApp, USAGE};
use newman_batch::errors::AppError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let Err(err) = CliApp::run().await else {
        return ExitCode::SUCCESS;
    };

    let usage_error = matches!(
        err.downcast_ref::<AppError>(),
        Some(AppError::MissingArgument { .. } | AppError::InvalidArgument { .. })
    );
    if usage_error {
        eprintln!("✗ {err}");
        eprintln!("{USAGE}");
    } else {
        eprintln!("\n✗ Error executing collections: {err}");
    }
    ExitCode::FAILURE
}
