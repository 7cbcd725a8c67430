use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use near_api::NearToken;

use crate::HarnessError;

/// Where `cargo near build` leaves the contract inside this workspace.
pub const DEFAULT_WASM_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../target/near/social_contract/social_contract.wasm"
);

/// Overrides [`DEFAULT_WASM_PATH`].
pub const WASM_PATH_ENV: &str = "SOCIAL_CONTRACT_WASM";
/// Overrides the settle delay, in milliseconds.
pub const SETTLE_DELAY_ENV: &str = "SOCIAL_SETTLE_DELAY_MS";

pub const DEFAULT_ACCOUNT_PREFIX: &str = "social";
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Settings shared by every case a harness provisions.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Compiled contract to deploy.
    pub wasm_path: PathBuf,
    /// Prefix of the generated contract sub-account names.
    pub account_prefix: String,
    /// Balance moved from the root account into the contract account.
    pub contract_balance: NearToken,
    /// Pause between deployment and the first call so the RPC reflects the new code.
    pub settle_delay: Duration,
}

impl HarnessConfig {
    pub fn new(wasm_path: impl Into<PathBuf>) -> Self {
        Self {
            wasm_path: wasm_path.into(),
            account_prefix: DEFAULT_ACCOUNT_PREFIX.to_string(),
            contract_balance: NearToken::from_near(10),
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }

    /// Reads [`WASM_PATH_ENV`] and [`SETTLE_DELAY_ENV`], falling back to defaults.
    pub fn from_env() -> Result<Self, HarnessError> {
        let wasm_path = std::env::var_os(WASM_PATH_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_WASM_PATH));

        let mut config = Self::new(wasm_path);
        if let Ok(raw) = std::env::var(SETTLE_DELAY_ENV) {
            config.settle_delay = parse_millis(&raw)?;
        }
        Ok(config)
    }

    pub fn with_account_prefix(mut self, prefix: impl Into<String>) -> Result<Self, HarnessError> {
        let prefix = prefix.into();
        validate_account_prefix(&prefix)?;
        self.account_prefix = prefix;
        Ok(self)
    }

    pub fn with_contract_balance(mut self, balance: NearToken) -> Self {
        self.contract_balance = balance;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn wasm_path(&self) -> &Path {
        &self.wasm_path
    }
}

fn parse_millis(raw: &str) -> Result<Duration, HarnessError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|e| HarnessError::Config(format!("{SETTLE_DELAY_ENV}={raw:?}: {e}")))
}

// A prefix becomes the leftmost segment of `<prefix>-<n>.<root>`, so it must be a
// valid account id segment on its own.
pub(crate) fn validate_account_prefix(prefix: &str) -> Result<(), HarnessError> {
    let is_separator = |c: char| c == '-' || c == '_';

    if prefix.is_empty() || prefix.len() > 32 {
        return Err(HarnessError::Config(format!(
            "account prefix {prefix:?} must be 1 to 32 characters"
        )));
    }
    if !prefix
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || is_separator(c))
    {
        return Err(HarnessError::Config(format!(
            "account prefix {prefix:?} may only contain a-z, 0-9, '-' and '_'"
        )));
    }
    if prefix.starts_with(is_separator) || prefix.ends_with(is_separator) {
        return Err(HarnessError::Config(format!(
            "account prefix {prefix:?} must start and end with a letter or digit"
        )));
    }
    if prefix
        .as_bytes()
        .windows(2)
        .any(|pair| is_separator(pair[0] as char) && is_separator(pair[1] as char))
    {
        return Err(HarnessError::Config(format!(
            "account prefix {prefix:?} has consecutive separators"
        )));
    }
    Ok(())
}
