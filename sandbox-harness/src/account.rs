use std::sync::Arc;

use near_api::{Account, AccountId, Contract, NearToken, NetworkConfig, Signer, signer};
use tracing::{debug, info};

use crate::{ContractHandle, HarnessError};

/// An account the harness holds a full-access key for.
#[derive(Clone)]
pub struct AccountHandle {
    pub id: AccountId,
    pub signer: Arc<Signer>,
}

impl std::fmt::Debug for AccountHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountHandle").field("id", &self.id).finish_non_exhaustive()
    }
}

impl AccountHandle {
    pub fn new(id: AccountId, signer: Arc<Signer>) -> Self {
        Self { id, signer }
    }

    /// Creates `<name>.<self>` funded with `balance` from this account.
    pub async fn create_sub_account(
        &self,
        network: &NetworkConfig,
        name: &str,
        balance: NearToken,
    ) -> Result<AccountHandle, HarnessError> {
        let raw_id = format!("{name}.{}", self.id);
        let create_error = |reason: String| HarnessError::CreateAccount {
            account_id: raw_id.clone(),
            reason,
        };

        let account_id = raw_id
            .parse::<AccountId>()
            .map_err(|e| create_error(e.to_string()))?;
        let secret_key = signer::generate_secret_key().map_err(|e| create_error(e.to_string()))?;
        let account_signer =
            Signer::from_secret_key(secret_key.clone()).map_err(|e| create_error(e.to_string()))?;

        let outcome = Account::create_account(account_id.clone())
            .fund_myself(self.id.clone(), balance)
            .with_public_key(secret_key.public_key())
            .with_signer(self.signer.clone())
            .send_to(network)
            .await
            .map_err(|e| create_error(format!("{e:?}")))?;
        outcome
            .into_result()
            .map_err(|e| create_error(format!("{e:?}")))?;

        debug!(%account_id, %balance, "sub-account created");
        Ok(AccountHandle::new(account_id, account_signer))
    }

    /// Deploys `wasm` to this account without an init call.
    pub async fn deploy(
        &self,
        network: &NetworkConfig,
        wasm: Vec<u8>,
    ) -> Result<ContractHandle, HarnessError> {
        let deploy_error = |reason: String| HarnessError::Deploy {
            account_id: self.id.to_string(),
            reason,
        };
        let code_len = wasm.len();

        let outcome = Contract::deploy(self.id.clone())
            .use_code(wasm)
            .without_init_call()
            .with_signer(self.signer.clone())
            .send_to(network)
            .await
            .map_err(|e| deploy_error(format!("{e:?}")))?;
        outcome
            .into_result()
            .map_err(|e| deploy_error(format!("{e:?}")))?;

        info!(contract_id = %self.id, code_len, "contract deployed");
        Ok(ContractHandle::new(self.id.clone(), network.clone()))
    }
}
