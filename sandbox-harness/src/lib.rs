//! Per-test NEAR sandbox lifecycle for exercising the social posts contract.
//!
//! Each case gets its own sandbox node and its own contract account:
//!
//! ```no_run
//! use sandbox_harness::{BoxError, NewPost, SandboxEnvironment, TestContext, run_case};
//!
//! async fn add_one(ctx: TestContext) -> Result<(), BoxError> {
//!     let post = ctx.social().add_post(&ctx.root, &NewPost::new("Test")).await?;
//!     assert_eq!(post.title, "Test");
//!     Ok(())
//! }
//!
//! # async fn example() -> Result<(), BoxError> {
//! let environment = SandboxEnvironment::from_env()?;
//! run_case(&environment, add_one).await.into_result()?;
//! # Ok(())
//! # }
//! ```

mod account;
pub use account::AccountHandle;

mod config;
pub use config::{
    DEFAULT_ACCOUNT_PREFIX, DEFAULT_SETTLE_DELAY, DEFAULT_WASM_PATH, HarnessConfig,
    SETTLE_DELAY_ENV, WASM_PATH_ENV,
};

mod contract;
pub use contract::ContractHandle;

mod environment;
pub use environment::{SandboxEnvironment, TestContext};

mod error;
pub use error::{BoxError, HarnessError};

pub mod lifecycle;
pub use lifecycle::{CaseFailure, CaseReport, TeardownOutcome, run_case};

pub mod logging;

pub mod scenarios;

pub mod social;
pub use social::{NewPost, Post, PostId, SocialClient};

mod worker;
pub use worker::Worker;

pub use near_api::{AccountId, NearToken};
