use clap::Parser;
use std::process::ExitCode;
use studypal::cli::Cli;
use studypal_core::CoreError;

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    studypal::init_logging();
    let cli = Cli::parse();

    match studypal::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let Some(CoreError::NotFound(id)) = e.downcast_ref::<CoreError>() {
                tracing::debug!("Card {} not found", id);
                eprintln!("Card not found.");
            } else {
                eprintln!("error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}
