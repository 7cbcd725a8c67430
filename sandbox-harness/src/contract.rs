use near_api::{AccountId, Contract, Data, NetworkConfig};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::debug;

use crate::{AccountHandle, HarnessError};

/// A deployed contract and the network it lives on.
#[derive(Clone)]
pub struct ContractHandle {
    id: AccountId,
    network: NetworkConfig,
}

impl std::fmt::Debug for ContractHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContractHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

impl ContractHandle {
    pub fn new(id: AccountId, network: NetworkConfig) -> Self {
        Self { id, network }
    }

    pub fn id(&self) -> &AccountId {
        &self.id
    }

    /// Sends a change call signed by `caller` and decodes the returned value.
    pub async fn call<A, R>(&self, caller: &AccountHandle, method: &str, args: A) -> Result<R, HarnessError>
    where
        A: Serialize,
        R: DeserializeOwned,
    {
        let args = encode_args(method, args)?;
        debug!(contract_id = %self.id, %method, caller = %caller.id, "call");

        let outcome = Contract(self.id.clone())
            .call_function(method, args)
            .transaction()
            .with_signer(caller.id.clone(), caller.signer.clone())
            .send_to(&self.network)
            .await
            .map_err(|e| HarnessError::Call {
                method: method.to_string(),
                reason: format!("{e:?}"),
            })?;

        let success = outcome.into_result().map_err(|e| HarnessError::Call {
            method: method.to_string(),
            reason: format!("{e:?}"),
        })?;
        success.json::<R>().map_err(|e| HarnessError::Decode {
            method: method.to_string(),
            reason: e.to_string(),
        })
    }

    /// Same as [`call`](Self::call), keeping the result untyped.
    pub async fn call_json<A: Serialize>(
        &self,
        caller: &AccountHandle,
        method: &str,
        args: A,
    ) -> Result<Value, HarnessError> {
        self.call(caller, method, args).await
    }

    /// Runs a read-only view and decodes the returned value.
    pub async fn view<A, R>(&self, method: &str, args: A) -> Result<R, HarnessError>
    where
        A: Serialize,
        R: DeserializeOwned + Send + Sync,
    {
        let args = encode_args(method, args)?;
        debug!(contract_id = %self.id, %method, "view");

        let result: Data<R> = Contract(self.id.clone())
            .call_function(method, args)
            .read_only()
            .fetch_from(&self.network)
            .await
            .map_err(|e| HarnessError::View {
                method: method.to_string(),
                reason: format!("{e:?}"),
            })?;
        Ok(result.data)
    }

    /// Same as [`view`](Self::view), keeping the result untyped.
    pub async fn view_json<A: Serialize>(&self, method: &str, args: A) -> Result<Value, HarnessError> {
        self.view(method, args).await
    }
}

fn encode_args<A: Serialize>(method: &str, args: A) -> Result<Value, HarnessError> {
    serde_json::to_value(args).map_err(|e| HarnessError::Call {
        method: method.to_string(),
        reason: format!("could not encode arguments: {e}"),
    })
}
