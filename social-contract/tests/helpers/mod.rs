// Test Helpers
use sandbox_harness::{
    BoxError, SandboxEnvironment, TestContext, WASM_PATH_ENV, logging, run_case,
};
use std::future::Future;

/// Runs `body` in its own sandbox with a freshly deployed contract.
/// The sandbox is torn down afterwards whatever the body did.
///
/// Returns `None` without starting a sandbox when `SOCIAL_CONTRACT_WASM` is unset
/// and `cargo near build` has not produced the contract yet. An explicitly set
/// path that does not exist fails the test.
#[allow(dead_code)]
pub async fn in_sandbox<F, Fut, T>(body: F) -> Result<Option<T>, BoxError>
where
    F: FnOnce(TestContext) -> Fut,
    Fut: Future<Output = Result<T, BoxError>>,
{
    logging::init_test_tracing();
    let environment = SandboxEnvironment::from_env()?;

    let wasm_path = environment.config().wasm_path();
    if std::env::var_os(WASM_PATH_ENV).is_none() && !wasm_path.exists() {
        println!(
            "Skipping sandbox test: no contract build at {} (run `cargo near build` or set {WASM_PATH_ENV})",
            wasm_path.display()
        );
        return Ok(None);
    }

    Ok(Some(run_case(&environment, body).await.into_result()?))
}
