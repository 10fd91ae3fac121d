//! cpmm Rust SDK
//!
//! Client-side codec and account fetcher for the cpmm constant-product
//! AMM on Solana. The crate reproduces the on-chain `CpAmm` account
//! layout byte for byte and layers a two-tier fetch pipeline on top:
//! "maybe" fetches where a missing account is a value, and asserting
//! fetches where it is a hard error.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cpmm_sdk::CpmmClient;
//! use solana_sdk::pubkey::Pubkey;
//! use std::str::FromStr;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CpmmClient::mainnet();
//!     let pool = Pubkey::from_str("2vDZwHSGBjNXdE5nE9BAcCsJfCK3dj66AGMWRpehDzfZ")?;
//!
//!     // Assert existence: absence is a hard error here.
//!     let amm = client.fetch_cp_amm(&pool).await?;
//!     println!(
//!         "base: {}  quote: {}  lp supply: {}",
//!         amm.state.base_liquidity, amm.state.quote_liquidity, amm.state.lp_tokens_supply,
//!     );
//!
//!     // Or keep absence as a value.
//!     let maybe = client.fetch_maybe_cp_amm(&pool).await?;
//!     println!("exists: {}", maybe.exists());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Feature Overview
//!
//! | Item | Description |
//! |------|-------------|
//! | [`CpAmm`] | Decoded pool record, 335-byte fixed layout, `encode`/`decode` |
//! | [`Q64_128`] | Lossless 64.128 fixed-point value used for price/ratio terms |
//! | [`CpmmClient::fetch_cp_amm`] | Fetch one pool, asserting existence |
//! | [`CpmmClient::fetch_maybe_cp_amm`] | Fetch one pool, absence as a value |
//! | [`CpmmClient::fetch_all_cp_amm`] | Batch fetch, all-or-nothing |
//! | [`CpmmClient::fetch_all_maybe_cp_amm`] | Batch fetch, order-preserving maybe results |

pub mod client;
pub mod error;
pub mod q64_128;
pub mod state;
pub mod types;

pub use client::CpmmClient;
pub use error::{Error, Result};
pub use q64_128::Q64_128;
pub use state::{CpAmm, CP_AMM_DISCRIMINATOR, CP_AMM_LEN};
pub use types::{CpAmmAccount, MaybeCpAmm};
