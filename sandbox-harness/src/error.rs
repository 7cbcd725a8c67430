use std::path::PathBuf;

use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while provisioning a sandbox or talking to a deployed contract.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The sandbox node could not be started.
    #[error("failed to start sandbox: {0}")]
    Provision(#[source] BoxError),
    /// The contract binary could not be read from disk.
    #[error("failed to read contract wasm at {path}: {source}")]
    ReadWasm {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// A sub-account could not be created under the root account.
    #[error("failed to create account {account_id}: {reason}")]
    CreateAccount { account_id: String, reason: String },
    /// The chain rejected the contract deployment.
    #[error("failed to deploy contract to {account_id}: {reason}")]
    Deploy { account_id: String, reason: String },
    /// A change call failed to send or the contract rejected it.
    #[error("call to `{method}` failed: {reason}")]
    Call { method: String, reason: String },
    /// A view call failed.
    #[error("view of `{method}` failed: {reason}")]
    View { method: String, reason: String },
    /// A result did not match the expected schema.
    #[error("could not decode result of `{method}`: {reason}")]
    Decode { method: String, reason: String },
    /// A scenario check did not hold.
    #[error("{what}: expected {expected}, got {actual}")]
    Mismatch {
        what: String,
        expected: String,
        actual: String,
    },
    /// The sandbox did not stop cleanly.
    #[error("failed to stop sandbox: {0}")]
    Teardown(String),
    /// Invalid harness configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}
