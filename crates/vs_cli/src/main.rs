use clap::Parser;
use std::sync::Arc;
use tracing::info;
use vs_core::{Result, Sha256Hasher};
use vs_verify::Verifier;
use vs_web::{create_app, AppState};
use vs_worker::Worker;

mod config;
mod logging;

use config::{Cli, Commands, ServeArgs, VerifyArgs, WorkerArgs};

async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.service_config();
    let state = AppState::new(Arc::new(Sha256Hasher));
    info!(
        "🚀 Starting {} v{} with the {} endpoint",
        state.title,
        state.version,
        config.variant()
    );

    let app = create_app(&config, &args.cors_config(), state)?;
    vs_web::serve(app, args.addr()).await
}

async fn run_verify(args: VerifyArgs) -> Result<()> {
    let verifier = Verifier::new(args.timeout())?;
    let report = verifier.verify(&args.endpoints()).await?;

    for result in &report.results {
        println!(
            "{} {} {} ({})",
            if result.passed { "PASS" } else { "FAIL" },
            result.variant,
            result.endpoint,
            result.http_status
        );
    }

    report.ensure_passed()?;
    info!("✨ Both variants verified");
    Ok(())
}

async fn run_worker(args: WorkerArgs) -> Result<()> {
    let mut worker = Worker::new(args.worker_config(), std::io::stdout());
    worker.run().await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level);

    match cli.command {
        Commands::Serve(args) => run_serve(args).await,
        Commands::Verify(args) => run_verify(args).await,
        Commands::Worker(args) => run_worker(args).await,
    }
}
