//! CpAmm account layout and codec.
//!
//! Byte-exact mirror of the on-chain record: every encode produces the
//! complete fixed-size image, every decode either fully succeeds or
//! fails without a partially populated value.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};
use crate::q64_128::Q64_128;

/// 8-byte type tag prefixed to every `CpAmm` account.
pub const CP_AMM_DISCRIMINATOR: [u8; 8] = [105, 219, 233, 13, 147, 109, 73, 100];

/// Fixed size of the encoded account.
pub const CP_AMM_LEN: usize = 335;

/// Decoded `CpAmm` account state.
///
/// Layout (scalars little-endian, offsets absolute):
/// ```text
/// discriminator(8)  is_initialized(1)  is_launched(1)
/// initial_locked_liquidity(8)  constant_product_sqrt(24)
/// base_quote_ratio_sqrt(24)  base_liquidity(8)  quote_liquidity(8)
/// lp_tokens_supply(8)  providers_fee_rate_basis_points(2)
/// protocol_fee_rate_basis_points(2)  protocol_base_fees_to_redeem(8)
/// protocol_quote_fees_to_redeem(8)  base_mint(32)  quote_mint(32)
/// lp_mint(32)  base_vault(32)  quote_vault(32)  locked_lp_vault(32)
/// amms_config(32)  bump(1)  = 335 bytes
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpAmm {
    /// Type tag as found in the account data. [`CpAmm::encode`] ignores
    /// this field and always writes [`CP_AMM_DISCRIMINATOR`].
    pub discriminator: [u8; 8],
    /// Whether the AMM has been initialized.
    pub is_initialized: bool,
    /// Whether the AMM has been launched and is active.
    pub is_launched: bool,
    /// Liquidity permanently locked after launch so the pool can never
    /// empty completely.
    pub initial_locked_liquidity: u64,
    /// sqrt(base_liquidity × quote_liquidity) as Q64.128.
    pub constant_product_sqrt: Q64_128,
    /// sqrt(base_liquidity / quote_liquidity) as Q64.128.
    pub base_quote_ratio_sqrt: Q64_128,
    /// Base tokens currently in the pool's vault.
    pub base_liquidity: u64,
    /// Quote tokens currently in the pool's vault.
    pub quote_liquidity: u64,
    /// Total supply of LP tokens minted to liquidity providers.
    pub lp_tokens_supply: u64,
    /// Liquidity-provider fee rate in basis points (1 bp = 0.01%).
    pub providers_fee_rate_basis_points: u16,
    /// Protocol fee rate in basis points, copied from the `AmmsConfig`
    /// account at initialization.
    pub protocol_fee_rate_basis_points: u16,
    /// Accumulated base-token fees redeemable by the config authority.
    pub protocol_base_fees_to_redeem: u64,
    /// Accumulated quote-token fees redeemable by the config authority.
    pub protocol_quote_fees_to_redeem: u64,
    /// Mint of the base token.
    #[serde(with = "pubkey_string")]
    pub base_mint: Pubkey,
    /// Mint of the quote token.
    #[serde(with = "pubkey_string")]
    pub quote_mint: Pubkey,
    /// Mint of the LP token.
    #[serde(with = "pubkey_string")]
    pub lp_mint: Pubkey,
    /// Vault holding the base tokens.
    #[serde(with = "pubkey_string")]
    pub base_vault: Pubkey,
    /// Vault holding the quote tokens.
    #[serde(with = "pubkey_string")]
    pub quote_vault: Pubkey,
    /// Vault holding the locked LP tokens.
    #[serde(with = "pubkey_string")]
    pub locked_lp_vault: Pubkey,
    /// Associated `AmmsConfig` account.
    #[serde(with = "pubkey_string")]
    pub amms_config: Pubkey,
    /// Canonical bump seed of the account's PDA.
    pub bump: u8,
}

impl CpAmm {
    /// Encode to the fixed 335-byte account image.
    ///
    /// The first 8 bytes are always [`CP_AMM_DISCRIMINATOR`]; the
    /// record's own `discriminator` field is ignored, so a forged tag
    /// never reaches the wire.
    pub fn encode(&self) -> [u8; CP_AMM_LEN] {
        let mut out = [0u8; CP_AMM_LEN];
        out[0..8].copy_from_slice(&CP_AMM_DISCRIMINATOR);
        out[8] = self.is_initialized as u8;
        out[9] = self.is_launched as u8;
        out[10..18].copy_from_slice(&self.initial_locked_liquidity.to_le_bytes());
        out[18..42].copy_from_slice(&self.constant_product_sqrt.to_le_bytes());
        out[42..66].copy_from_slice(&self.base_quote_ratio_sqrt.to_le_bytes());
        out[66..74].copy_from_slice(&self.base_liquidity.to_le_bytes());
        out[74..82].copy_from_slice(&self.quote_liquidity.to_le_bytes());
        out[82..90].copy_from_slice(&self.lp_tokens_supply.to_le_bytes());
        out[90..92].copy_from_slice(&self.providers_fee_rate_basis_points.to_le_bytes());
        out[92..94].copy_from_slice(&self.protocol_fee_rate_basis_points.to_le_bytes());
        out[94..102].copy_from_slice(&self.protocol_base_fees_to_redeem.to_le_bytes());
        out[102..110].copy_from_slice(&self.protocol_quote_fees_to_redeem.to_le_bytes());
        out[110..142].copy_from_slice(&self.base_mint.to_bytes());
        out[142..174].copy_from_slice(&self.quote_mint.to_bytes());
        out[174..206].copy_from_slice(&self.lp_mint.to_bytes());
        out[206..238].copy_from_slice(&self.base_vault.to_bytes());
        out[238..270].copy_from_slice(&self.quote_vault.to_bytes());
        out[270..302].copy_from_slice(&self.locked_lp_vault.to_bytes());
        out[302..334].copy_from_slice(&self.amms_config.to_bytes());
        out[334] = self.bump;
        out
    }

    /// Decode from raw account bytes.
    ///
    /// Fails with [`Error::TruncatedInput`] on fewer than
    /// [`CP_AMM_LEN`] bytes; bytes past the fixed layout are ignored.
    /// The discriminator is returned as found and not checked against
    /// [`CP_AMM_DISCRIMINATOR`]: tag enforcement belongs to the fetch
    /// layer, which keeps this path usable for probing arbitrary bytes.
    pub fn decode(data: &[u8]) -> Result<Self> {
        if data.len() < CP_AMM_LEN {
            return Err(Error::TruncatedInput { expected: CP_AMM_LEN, actual: data.len() });
        }
        Ok(Self {
            discriminator:                   read_bytes8(data, 0)?,
            is_initialized:                  read_bool(data, 8)?,
            is_launched:                     read_bool(data, 9)?,
            initial_locked_liquidity:        read_u64(data, 10)?,
            constant_product_sqrt:           read_q64_128(data, 18)?,
            base_quote_ratio_sqrt:           read_q64_128(data, 42)?,
            base_liquidity:                  read_u64(data, 66)?,
            quote_liquidity:                 read_u64(data, 74)?,
            lp_tokens_supply:                read_u64(data, 82)?,
            providers_fee_rate_basis_points: read_u16(data, 90)?,
            protocol_fee_rate_basis_points:  read_u16(data, 92)?,
            protocol_base_fees_to_redeem:    read_u64(data, 94)?,
            protocol_quote_fees_to_redeem:   read_u64(data, 102)?,
            base_mint:                       read_pubkey(data, 110)?,
            quote_mint:                      read_pubkey(data, 142)?,
            lp_mint:                         read_pubkey(data, 174)?,
            base_vault:                      read_pubkey(data, 206)?,
            quote_vault:                     read_pubkey(data, 238)?,
            locked_lp_vault:                 read_pubkey(data, 270)?,
            amms_config:                     read_pubkey(data, 302)?,
            bump:                            data[334],
        })
    }
}

// ─── Serde helpers ────────────────────────────────────────────────────────────

/// Serialize a `Pubkey` as its base-58 string.
pub(crate) mod pubkey_string {
    use serde::Serializer;
    use solana_sdk::pubkey::Pubkey;

    pub fn serialize<S: Serializer>(key: &Pubkey, ser: S) -> Result<S::Ok, S::Error> {
        ser.collect_str(key)
    }
}

// ─── Byte-slice primitives ────────────────────────────────────────────────────

pub(crate) fn read_bool(data: &[u8], offset: usize) -> Result<bool> {
    data.get(offset)
        .map(|b| *b != 0)
        .ok_or(Error::TruncatedInput { expected: offset + 1, actual: data.len() })
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let b: [u8; 2] = data
        .get(offset..offset + 2)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TruncatedInput { expected: offset + 2, actual: data.len() })?;
    Ok(u16::from_le_bytes(b))
}

pub(crate) fn read_u64(data: &[u8], offset: usize) -> Result<u64> {
    let b: [u8; 8] = data
        .get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TruncatedInput { expected: offset + 8, actual: data.len() })?;
    Ok(u64::from_le_bytes(b))
}

pub(crate) fn read_bytes8(data: &[u8], offset: usize) -> Result<[u8; 8]> {
    data.get(offset..offset + 8)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TruncatedInput { expected: offset + 8, actual: data.len() })
}

pub(crate) fn read_pubkey(data: &[u8], offset: usize) -> Result<Pubkey> {
    let b: [u8; 32] = data
        .get(offset..offset + 32)
        .and_then(|s| s.try_into().ok())
        .ok_or(Error::TruncatedInput { expected: offset + 32, actual: data.len() })?;
    Ok(Pubkey::from(b))
}

pub(crate) fn read_q64_128(data: &[u8], offset: usize) -> Result<Q64_128> {
    Q64_128::read(data.get(offset..).unwrap_or(&[]))
}
