use std::sync::atomic::{AtomicU64, Ordering};

use near_api::NetworkConfig;
use tracing::debug;

use crate::{
    AccountHandle, ContractHandle, HarnessConfig, HarnessError, SocialClient, Worker,
    lifecycle::Environment,
};

/// Everything a case body needs, handed over by value.
#[derive(Clone)]
pub struct TestContext {
    pub network: NetworkConfig,
    pub root: AccountHandle,
    pub contract_account: AccountHandle,
    pub contract: ContractHandle,
}

impl std::fmt::Debug for TestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestContext")
            .field("root", &self.root)
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

impl TestContext {
    pub fn social(&self) -> SocialClient {
        SocialClient::new(self.contract.clone())
    }
}

/// Starts one sandbox per case and deploys the configured contract into a
/// fresh sub-account of the genesis account.
#[derive(Debug)]
pub struct SandboxEnvironment {
    config: HarnessConfig,
    deployments: AtomicU64,
}

impl SandboxEnvironment {
    pub fn new(config: HarnessConfig) -> Self {
        Self {
            config,
            deployments: AtomicU64::new(0),
        }
    }

    pub fn from_env() -> Result<Self, HarnessError> {
        HarnessConfig::from_env().map(Self::new)
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    // Unique within the process. Every case has its own chain anyway.
    fn next_account_name(&self) -> String {
        let n = self.deployments.fetch_add(1, Ordering::Relaxed);
        format!("{}-{n}", self.config.account_prefix)
    }

    async fn read_wasm(&self) -> Result<Vec<u8>, HarnessError> {
        let path = self.config.wasm_path();
        tokio::fs::read(path)
            .await
            .map_err(|source| HarnessError::ReadWasm {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Environment for SandboxEnvironment {
    type Worker = Worker;
    type Context = TestContext;

    async fn start(&self) -> Result<Worker, HarnessError> {
        Worker::start().await
    }

    async fn prepare(&self, worker: &Worker) -> Result<TestContext, HarnessError> {
        let wasm = self.read_wasm().await?;
        let network = worker.network().clone();
        let root = worker.root_account().clone();

        let contract_account = root
            .create_sub_account(&network, &self.next_account_name(), self.config.contract_balance)
            .await?;
        let contract = contract_account.deploy(&network, wasm).await?;

        debug!(delay = ?self.config.settle_delay, "waiting for deployment to settle");
        tokio::time::sleep(self.config.settle_delay).await;

        Ok(TestContext {
            network,
            root,
            contract_account,
            contract,
        })
    }
}
