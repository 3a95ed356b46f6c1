use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use dotenvy::dotenv;
use tracing::error;

use wasps::{
    app::{run, setup_logging},
    cli::Args,
    configs::WaspsConfig,
};

fn main() -> ExitCode {
    dotenv().ok();

    let args = Args::parse();
    setup_logging(args.verbose);

    match start(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn start(args: Args) -> anyhow::Result<()> {
    let config = WaspsConfig::try_from(args)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start the async runtime")?;

    let mut stdout = std::io::stdout().lock();
    runtime.block_on(run(config, &mut stdout))?;

    Ok(())
}
