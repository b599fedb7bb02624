use clap::Parser;
use formfill_cli::detect::{self, DetectArgs};

fn main() -> anyhow::Result<()> {
    let args = DetectArgs::parse();
    formfill_cli::init_tracing(args.verbose);

    detect::run(&args)?;
    Ok(())
}
