use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use solana_sdk::pubkey::Pubkey;
use std::path::PathBuf;
use std::str::FromStr;

use cpmm_sdk::{CpAmm, CpmmClient, MaybeCpAmm};

const MAINNET_RPC: &str = "https://api.mainnet-beta.solana.com";

/// Read-only inspector for cpmm pool accounts.
#[derive(Parser)]
#[command(name = "cpmm", version, about)]
struct Cli {
    /// RPC endpoint to fetch from.
    #[arg(long, env = "CPMM_RPC_URL", default_value = MAINNET_RPC, global = true)]
    rpc_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch one pool account; fails if it does not exist.
    Fetch {
        /// Pool account address (base-58).
        address: String,
    },
    /// Fetch many pool accounts in one call; absent addresses are
    /// reported per entry, not fatal.
    FetchAll {
        /// Pool account addresses (base-58).
        #[arg(required = true)]
        addresses: Vec<String>,
    },
    /// Decode raw account bytes from a file, without fetching or
    /// checking the type tag.
    Decode {
        /// Path to a file holding the raw account data.
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = CpmmClient::new(cli.rpc_url);

    match cli.command {
        Command::Fetch { address } => {
            let address = parse_address(&address)?;
            let account = client.fetch_cp_amm(&address).await?;
            println!("{}", serde_json::to_string_pretty(&account)?);
        }

        Command::FetchAll { addresses } => {
            let addresses = addresses
                .iter()
                .map(|a| parse_address(a))
                .collect::<Result<Vec<_>>>()?;
            let results = client.fetch_all_maybe_cp_amm(&addresses).await?;

            let entries: Vec<_> = results
                .iter()
                .map(|result| match result {
                    MaybeCpAmm::Exists(account) => json!({
                        "address": account.address.to_string(),
                        "exists":  true,
                        "state":   account.state,
                    }),
                    MaybeCpAmm::Absent(address) => json!({
                        "address": address.to_string(),
                        "exists":  false,
                    }),
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }

        Command::Decode { path } => {
            let data = std::fs::read(&path)
                .with_context(|| format!("cannot read account dump '{}'", path.display()))?;
            let state = CpAmm::decode(&data)?;
            println!("{}", serde_json::to_string_pretty(&state)?);
        }
    }

    Ok(())
}

fn parse_address(s: &str) -> Result<Pubkey> {
    Pubkey::from_str(s).with_context(|| format!("'{s}' is not a valid base-58 address"))
}
