use std::{fmt::Display, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use near_api::{AccountId, NetworkConfig, RPCEndpoint, Signer};
use near_sandbox::{GenesisAccount, Sandbox};
use reqwest::Url;
use tokio::{net::TcpStream, time::Instant};
use tracing::{debug, info};

use crate::{AccountHandle, HarnessError, lifecycle::Teardown};

/// How long a stopped node may keep its RPC port open before teardown fails.
pub(crate) const STOP_TIMEOUT: Duration = Duration::from_secs(5);
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// A running sandbox node together with the RPC config and genesis identity
/// needed to drive it. Owned by exactly one case.
pub struct Worker {
    sandbox: Sandbox,
    rpc_url: Url,
    network: NetworkConfig,
    root: AccountHandle,
}

impl Worker {
    /// Starts a new sandbox node with its own home directory and ports.
    pub async fn start() -> Result<Self, HarnessError> {
        let sandbox = Sandbox::start_sandbox()
            .await
            .map_err(|e| HarnessError::Provision(e.into()))?;
        info!(rpc_addr = %sandbox.rpc_addr, "sandbox started");

        let rpc_url: Url = parse_provisioned(&sandbox.rpc_addr, "rpc address")?;
        let network = sandbox_network_config(rpc_url.clone());
        let root = genesis_account()?;
        debug!(root = %root.id, "using genesis account as root");

        Ok(Self {
            sandbox,
            rpc_url,
            network,
            root,
        })
    }

    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// The genesis account, which funds and owns every account the case creates.
    pub fn root_account(&self) -> &AccountHandle {
        &self.root
    }
}

impl Teardown for Worker {
    // Dropping the sandbox only signals the node to die, so the stop is confirmed
    // by waiting for its RPC port to close.
    async fn tear_down(self) -> Result<(), HarnessError> {
        let rpc_url = self.rpc_url;
        let sandbox = self.sandbox;

        tokio::task::spawn_blocking(move || drop(sandbox))
            .await
            .map_err(|e| HarnessError::Teardown(format!("sandbox at {rpc_url}: {e}")))?;

        let addrs = rpc_url
            .socket_addrs(|| None)
            .map_err(|e| HarnessError::Teardown(format!("sandbox at {rpc_url}: {e}")))?;
        wait_until_closed(&addrs, STOP_TIMEOUT, STOP_POLL_INTERVAL).await?;

        info!(%rpc_url, "sandbox stopped");
        Ok(())
    }
}

/// Polls until none of `addrs` accepts a connection, or fails after `timeout`.
pub(crate) async fn wait_until_closed(
    addrs: &[SocketAddr],
    timeout: Duration,
    interval: Duration,
) -> Result<(), HarnessError> {
    let deadline = Instant::now() + timeout;
    loop {
        let mut listening = None;
        for addr in addrs {
            if TcpStream::connect(addr).await.is_ok() {
                listening = Some(*addr);
                break;
            }
        }

        match listening {
            None => return Ok(()),
            Some(addr) if Instant::now() >= deadline => {
                return Err(HarnessError::Teardown(format!(
                    "node still accepting connections on {addr} after {timeout:?}"
                )));
            }
            Some(_) => tokio::time::sleep(interval).await,
        }
    }
}

pub(crate) fn sandbox_network_config(rpc_url: Url) -> NetworkConfig {
    NetworkConfig {
        network_name: "sandbox".to_string(),
        rpc_endpoints: vec![RPCEndpoint::new(rpc_url)],
        ..NetworkConfig::testnet()
    }
}

fn genesis_account() -> Result<AccountHandle, HarnessError> {
    let genesis = GenesisAccount::default();
    let id: AccountId = parse_provisioned(&genesis.account_id.to_string(), "genesis account id")?;
    let signer: Arc<Signer> =
        Signer::from_secret_key(parse_provisioned(&genesis.private_key, "genesis key")?)
            .map_err(|e| HarnessError::Provision(e.to_string().into()))?;

    Ok(AccountHandle::new(id, signer))
}

fn parse_provisioned<T>(raw: &str, what: &str) -> Result<T, HarnessError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| HarnessError::Provision(format!("invalid {what} {raw:?}: {e}").into()))
}
