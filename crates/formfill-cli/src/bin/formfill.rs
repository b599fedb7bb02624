use clap::Parser;
use formfill_cli::fill::{self, FillArgs};
use formfill_filler::RunError;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let args = FillArgs::parse();
    formfill_cli::init_tracing(args.verbose);
    tracing::info!("Starting formfill v{}", env!("CARGO_PKG_VERSION"));

    match fill::run(&args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            // Pipeline failures were already printed as an `Error:` progress line
            if e.downcast_ref::<RunError>().is_none() {
                eprintln!("Error: {e:#}");
            }
            tracing::debug!("{e:?}");
            ExitCode::FAILURE
        }
    }
}
