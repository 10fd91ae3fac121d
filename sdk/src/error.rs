//! SDK error type.

use solana_sdk::pubkey::Pubkey;

/// All errors returned by the cpmm SDK.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── RPC / transport ──────────────────────────────────────────────────────
    /// A Solana JSON-RPC call failed. Passed through unmodified; the SDK
    /// never retries on its own, so every call is retryable by the caller.
    #[error("RPC error: {0}")]
    Rpc(#[from] solana_client::client_error::ClientError),

    // ── Account existence ────────────────────────────────────────────────────
    /// An asserting fetch was issued for an address with no stored account.
    #[error("No CpAmm account found at {0}")]
    AccountNotFound(Pubkey),

    // ── Account decoding ─────────────────────────────────────────────────────
    /// The buffer holds fewer bytes than the fixed layout requires.
    #[error("Account data truncated: need {expected} bytes, got {actual}")]
    TruncatedInput { expected: usize, actual: usize },

    /// The account exists but its leading type tag is not the CpAmm one.
    #[error("Account {address} is not a CpAmm account (discriminator {found:?})")]
    DiscriminatorMismatch { address: Pubkey, found: [u8; 8] },
}

/// Convenience alias so every module can write `Result<T>`.
pub type Result<T> = std::result::Result<T, Error>;
