//! Deploys a social contract build into fresh sandboxes and runs the smoke
//! scenarios against it, one sandbox per scenario.

use std::{path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use sandbox_harness::{
    BoxError, DEFAULT_ACCOUNT_PREFIX, DEFAULT_SETTLE_DELAY, HarnessConfig, SandboxEnvironment,
    logging, run_case, scenarios::Scenario,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "social-sandbox", about = "Run the social contract smoke scenarios in a NEAR sandbox")]
struct Args {
    /// Path to the compiled contract wasm.
    wasm: PathBuf,

    /// Prefix of the contract sub-account created in each sandbox.
    #[arg(long, default_value = DEFAULT_ACCOUNT_PREFIX)]
    account_prefix: String,

    /// Pause after deployment before the first call, in milliseconds.
    #[arg(long, default_value_t = DEFAULT_SETTLE_DELAY.as_millis() as u64)]
    settle_delay_ms: u64,

    /// Log level used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init_tracing(&args.log_level);

    match run(args).await {
        Ok(0) => ExitCode::SUCCESS,
        Ok(failed) => {
            error!(failed, "some scenarios failed");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(error = %e, "could not run scenarios");
            ExitCode::FAILURE
        }
    }
}

fn harness_config(args: Args) -> Result<HarnessConfig, BoxError> {
    Ok(HarnessConfig::new(args.wasm)
        .with_account_prefix(args.account_prefix)?
        .with_settle_delay(Duration::from_millis(args.settle_delay_ms)))
}

// Teardown diagnostics are already logged by `run_case`.
async fn run(args: Args) -> Result<usize, BoxError> {
    let environment = SandboxEnvironment::new(harness_config(args)?);

    let mut failed = 0;
    for scenario in Scenario::ALL {
        let report = run_case(&environment, |ctx| scenario.run(ctx)).await;

        match &report.outcome {
            Ok(()) => info!(scenario = scenario.name(), "passed"),
            Err(e) => {
                failed += 1;
                error!(scenario = scenario.name(), error = %e, "failed");
            }
        }
    }
    Ok(failed)
}
