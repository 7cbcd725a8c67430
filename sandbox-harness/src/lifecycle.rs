//! Per-case lifecycle: start an isolated worker, prepare a context on it, run
//! the case body, and always tear the worker down afterwards.
//!
//! The case outcome is settled before teardown runs. A teardown failure is
//! reported as [`TeardownOutcome::Diagnostic`] and logged; it never turns a
//! passing case into a failing one or the other way round.

use std::{any::Any, future::Future, panic::AssertUnwindSafe};

use futures::FutureExt as _;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{BoxError, HarnessError};

/// A provisioned resource that must be released exactly once.
pub trait Teardown {
    fn tear_down(self) -> impl Future<Output = Result<(), HarnessError>>;
}

/// Source of isolated workers and the per-case context built on top of them.
pub trait Environment {
    type Worker: Teardown;
    type Context;

    /// Starts a fresh worker that no other case can see.
    fn start(&self) -> impl Future<Output = Result<Self::Worker, HarnessError>>;

    /// Builds the context handed to the case body, e.g. deploys the contract.
    fn prepare(
        &self,
        worker: &Self::Worker,
    ) -> impl Future<Output = Result<Self::Context, HarnessError>>;
}

/// How the worker was released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TeardownOutcome {
    Clean,
    Diagnostic(String),
}

impl From<Result<(), HarnessError>> for TeardownOutcome {
    fn from(result: Result<(), HarnessError>) -> Self {
        match result {
            Ok(()) => Self::Clean,
            Err(e) => Self::Diagnostic(e.to_string()),
        }
    }
}

/// Why a case did not pass.
#[derive(Debug, Error)]
pub enum CaseFailure {
    /// No worker could be started, nothing was torn down.
    #[error("provisioning failed: {0}")]
    Provision(#[source] HarnessError),
    /// The worker started but the context could not be prepared.
    #[error("setup failed: {0}")]
    Setup(#[source] HarnessError),
    /// The case body returned an error.
    #[error("case failed: {0}")]
    Body(#[source] BoxError),
    /// The case body panicked, usually on a failed assertion.
    #[error("case panicked: {0}")]
    Panicked(String),
}

/// Result of one case together with what happened at teardown.
#[derive(Debug)]
pub struct CaseReport<T> {
    pub outcome: Result<T, CaseFailure>,
    /// `None` when provisioning failed and there was no worker to release.
    pub teardown: Option<TeardownOutcome>,
}

impl<T> CaseReport<T> {
    pub fn passed(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Drops the teardown outcome, which never affects the verdict.
    pub fn into_result(self) -> Result<T, CaseFailure> {
        self.outcome
    }
}

/// Runs `body` against a freshly provisioned context.
///
/// The worker is torn down exactly once on every path past a successful start:
/// setup error, body error, body panic, or success.
pub async fn run_case<E, F, Fut, T>(environment: &E, body: F) -> CaseReport<T>
where
    E: Environment,
    F: FnOnce(E::Context) -> Fut,
    Fut: Future<Output = Result<T, BoxError>>,
{
    let worker = match environment.start().await {
        Ok(worker) => worker,
        Err(e) => {
            warn!(error = %e, "sandbox provisioning failed");
            return CaseReport {
                outcome: Err(CaseFailure::Provision(e)),
                teardown: None,
            };
        }
    };
    debug!("worker started");

    let outcome = AssertUnwindSafe(async {
        let context = environment
            .prepare(&worker)
            .await
            .map_err(CaseFailure::Setup)?;
        body(context).await.map_err(CaseFailure::Body)
    })
    .catch_unwind()
    .await
    .unwrap_or_else(|payload| Err(CaseFailure::Panicked(panic_message(payload))));

    match &outcome {
        Ok(_) => info!("case passed"),
        Err(e) => warn!(error = %e, "case failed"),
    }

    let teardown = TeardownOutcome::from(worker.tear_down().await);
    if let TeardownOutcome::Diagnostic(message) = &teardown {
        warn!(%message, "sandbox teardown failed, ignoring");
    }

    CaseReport {
        outcome,
        teardown: Some(teardown),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
