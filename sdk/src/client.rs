//! [`CpmmClient`] — the fetch/decode pipeline over Solana JSON-RPC.

use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{commitment_config::CommitmentConfig, pubkey::Pubkey};

use crate::error::{Error, Result};
use crate::state::{CpAmm, CP_AMM_DISCRIMINATOR};
use crate::types::{CpAmmAccount, MaybeCpAmm};

// ─── Constants ────────────────────────────────────────────────────────────────

const DEVNET_RPC:  &str = "https://api.devnet.solana.com";
const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async client for reading `CpAmm` accounts.
///
/// Fetching comes in two tiers: the `maybe` methods report absence as a
/// value ([`MaybeCpAmm::Absent`]) and never fail for a missing account,
/// while the plain methods assert existence and fail with
/// [`Error::AccountNotFound`]. The batch asserting form is
/// all-or-nothing: one absent address fails the whole call.
///
/// ```rust,no_run
/// # use cpmm_sdk::CpmmClient;
/// # use solana_sdk::pubkey::Pubkey;
/// # use std::str::FromStr;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = CpmmClient::devnet();
/// let pool = Pubkey::from_str("2vDZwHSGBjNXdE5nE9BAcCsJfCK3dj66AGMWRpehDzfZ")?;
/// let amm = client.fetch_cp_amm(&pool).await?;
/// println!("base: {}  quote: {}", amm.state.base_liquidity, amm.state.quote_liquidity);
/// # Ok(())
/// # }
/// ```
pub struct CpmmClient {
    rpc_url:    String,
    commitment: CommitmentConfig,
}

impl CpmmClient {
    /// Create a client pointing at any RPC endpoint.
    pub fn new(rpc_url: impl Into<String>) -> Self {
        Self {
            rpc_url:    rpc_url.into(),
            commitment: CommitmentConfig::confirmed(),
        }
    }

    /// Pre-configured client for Solana devnet.
    pub fn devnet() -> Self {
        Self::new(DEVNET_RPC)
    }

    /// Pre-configured client for Solana mainnet-beta.
    pub fn mainnet() -> Self {
        Self::new(MAINNET_RPC)
    }

    /// Override the commitment level used for every fetch.
    pub fn with_commitment(mut self, commitment: CommitmentConfig) -> Self {
        self.commitment = commitment;
        self
    }

    // ── Fetch operations ──────────────────────────────────────────────────────

    /// Fetch a `CpAmm` that may not exist.
    ///
    /// Only transport failures and undecodable bytes are errors here;
    /// an empty address yields [`MaybeCpAmm::Absent`].
    pub async fn fetch_maybe_cp_amm(&self, address: &Pubkey) -> Result<MaybeCpAmm> {
        let rpc = self.rpc();
        let account = rpc
            .get_account_with_commitment(address, self.commitment)
            .await?
            .value;
        decode_maybe(*address, account.as_ref().map(|a| a.data.as_slice()))
    }

    /// Fetch a `CpAmm` that must exist.
    pub async fn fetch_cp_amm(&self, address: &Pubkey) -> Result<CpAmmAccount> {
        self.fetch_maybe_cp_amm(address).await?.into_existing()
    }

    /// Fetch many `CpAmm` accounts in one RPC call.
    ///
    /// The output has one entry per input address, in input order,
    /// whatever the store answered in.
    pub async fn fetch_all_maybe_cp_amm(&self, addresses: &[Pubkey]) -> Result<Vec<MaybeCpAmm>> {
        let rpc = self.rpc();
        let accounts = rpc.get_multiple_accounts(addresses).await?;
        addresses
            .iter()
            .zip(accounts)
            .map(|(address, account)| {
                decode_maybe(*address, account.as_ref().map(|a| a.data.as_slice()))
            })
            .collect()
    }

    /// Fetch many `CpAmm` accounts, asserting that every one exists.
    ///
    /// Fails on the first absent address and never returns a partial
    /// list.
    pub async fn fetch_all_cp_amm(&self, addresses: &[Pubkey]) -> Result<Vec<CpAmmAccount>> {
        self.fetch_all_maybe_cp_amm(addresses)
            .await?
            .into_iter()
            .map(MaybeCpAmm::into_existing)
            .collect()
    }

    fn rpc(&self) -> RpcClient {
        RpcClient::new_with_commitment(self.rpc_url.clone(), self.commitment)
    }
}

// ─── Decode decision ──────────────────────────────────────────────────────────

/// Turn "raw bytes or nothing" into the tagged fetch result.
///
/// Present accounts are tag-checked against [`CP_AMM_DISCRIMINATOR`]
/// before being returned; raw [`CpAmm::decode`] stays permissive for
/// callers probing arbitrary bytes.
fn decode_maybe(address: Pubkey, data: Option<&[u8]>) -> Result<MaybeCpAmm> {
    let Some(data) = data else {
        return Ok(MaybeCpAmm::Absent(address));
    };
    let state = CpAmm::decode(data)?;
    if state.discriminator != CP_AMM_DISCRIMINATOR {
        return Err(Error::DiscriminatorMismatch { address, found: state.discriminator });
    }
    Ok(MaybeCpAmm::Exists(CpAmmAccount { address, state }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::q64_128::Q64_128;
    use crate::state::CP_AMM_LEN;

    fn sample(base_liquidity: u64) -> CpAmm {
        CpAmm {
            discriminator:                   CP_AMM_DISCRIMINATOR,
            is_initialized:                  true,
            is_launched:                     true,
            initial_locked_liquidity:        100_000,
            constant_product_sqrt:           Q64_128::from_parts(447, 0),
            base_quote_ratio_sqrt:           Q64_128::from_parts(2, 0),
            base_liquidity,
            quote_liquidity:                 base_liquidity / 4,
            lp_tokens_supply:                447,
            providers_fee_rate_basis_points: 25,
            protocol_fee_rate_basis_points:  10,
            protocol_base_fees_to_redeem:    0,
            protocol_quote_fees_to_redeem:   0,
            base_mint:                       Pubkey::new_unique(),
            quote_mint:                      Pubkey::new_unique(),
            lp_mint:                         Pubkey::new_unique(),
            base_vault:                      Pubkey::new_unique(),
            quote_vault:                     Pubkey::new_unique(),
            locked_lp_vault:                 Pubkey::new_unique(),
            amms_config:                     Pubkey::new_unique(),
            bump:                            255,
        }
    }

    #[test]
    fn absence_is_a_value_not_an_error() {
        let address = Pubkey::new_unique();
        let result = decode_maybe(address, None).unwrap();
        assert_eq!(result, MaybeCpAmm::Absent(address));
        assert!(!result.exists());
    }

    #[test]
    fn present_bytes_decode_to_exists() {
        let address = Pubkey::new_unique();
        let amm = sample(1_000_000);
        let result = decode_maybe(address, Some(&amm.encode())).unwrap();
        assert_eq!(result, MaybeCpAmm::Exists(CpAmmAccount { address, state: amm }));
    }

    #[test]
    fn asserting_path_turns_absence_into_not_found() {
        let address = Pubkey::new_unique();
        let err = decode_maybe(address, None)
            .unwrap()
            .into_existing()
            .unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(a) if a == address));
    }

    #[test]
    fn wrong_tag_is_rejected_by_the_fetch_path() {
        let address = Pubkey::new_unique();
        let mut image = sample(1).encode();
        image[0] ^= 0xFF;
        let err = decode_maybe(address, Some(&image)).unwrap_err();
        assert!(matches!(err, Error::DiscriminatorMismatch { address: a, .. } if a == address));
    }

    #[test]
    fn truncated_present_bytes_fail() {
        let err = decode_maybe(Pubkey::new_unique(), Some(&[0u8; 40])).unwrap_err();
        assert!(matches!(err, Error::TruncatedInput { expected: CP_AMM_LEN, actual: 40 }));
    }

    #[test]
    fn batch_results_preserve_input_order() {
        let addresses = [Pubkey::new_unique(), Pubkey::new_unique(), Pubkey::new_unique()];
        let amm_a = sample(111);
        let amm_c = sample(333);
        let responses = [Some(amm_a.encode().to_vec()), None, Some(amm_c.encode().to_vec())];

        let results: Vec<MaybeCpAmm> = addresses
            .iter()
            .zip(responses.iter())
            .map(|(address, data)| decode_maybe(*address, data.as_deref()).unwrap())
            .collect();

        assert_eq!(results[0].address(), &addresses[0]);
        assert_eq!(results[0].account().unwrap().state.base_liquidity, 111);
        assert_eq!(results[1], MaybeCpAmm::Absent(addresses[1]));
        assert_eq!(results[2].address(), &addresses[2]);
        assert_eq!(results[2].account().unwrap().state.base_liquidity, 333);
    }

    #[test]
    fn asserting_batch_is_all_or_nothing() {
        let present = MaybeCpAmm::Exists(CpAmmAccount {
            address: Pubkey::new_unique(),
            state:   sample(1),
        });
        let missing_address = Pubkey::new_unique();
        let batch = vec![present, MaybeCpAmm::Absent(missing_address)];

        let collected: Result<Vec<CpAmmAccount>> =
            batch.into_iter().map(MaybeCpAmm::into_existing).collect();
        assert!(matches!(collected, Err(Error::AccountNotFound(a)) if a == missing_address));
    }
}
