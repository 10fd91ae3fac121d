//! Account wrapper types returned by the fetch pipeline.

use serde::Serialize;
use solana_sdk::pubkey::Pubkey;

use crate::error::{Error, Result};
use crate::state::{pubkey_string, CpAmm};

/// A `CpAmm` account known to exist, paired with its address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CpAmmAccount {
    #[serde(with = "pubkey_string")]
    pub address: Pubkey,
    pub state:   CpAmm,
}

/// Result of a non-asserting fetch.
///
/// Absence is a value here, not an error; only the asserting fetch
/// variants upgrade it to [`Error::AccountNotFound`] via
/// [`MaybeCpAmm::into_existing`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaybeCpAmm {
    /// Bytes were stored at the address and decoded.
    Exists(CpAmmAccount),
    /// Nothing is stored at the address.
    Absent(Pubkey),
}

impl MaybeCpAmm {
    /// The address this result refers to, present or not.
    pub fn address(&self) -> &Pubkey {
        match self {
            Self::Exists(account) => &account.address,
            Self::Absent(address) => address,
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, Self::Exists(_))
    }

    /// The decoded account, if present.
    pub fn account(&self) -> Option<&CpAmmAccount> {
        match self {
            Self::Exists(account) => Some(account),
            Self::Absent(_) => None,
        }
    }

    /// Convert "may not exist" into the asserting contract.
    pub fn into_existing(self) -> Result<CpAmmAccount> {
        match self {
            Self::Exists(account) => Ok(account),
            Self::Absent(address) => Err(Error::AccountNotFound(address)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{CP_AMM_DISCRIMINATOR, CP_AMM_LEN};

    fn existing(address: Pubkey) -> MaybeCpAmm {
        let mut image = vec![0u8; CP_AMM_LEN];
        image[..8].copy_from_slice(&CP_AMM_DISCRIMINATOR);
        MaybeCpAmm::Exists(CpAmmAccount {
            address,
            state: CpAmm::decode(&image).unwrap(),
        })
    }

    #[test]
    fn address_is_reported_for_both_variants() {
        let address = Pubkey::new_unique();
        assert_eq!(existing(address).address(), &address);
        assert_eq!(MaybeCpAmm::Absent(address).address(), &address);
    }

    #[test]
    fn into_existing_upgrades_absence_to_not_found() {
        let address = Pubkey::new_unique();

        let account = existing(address).into_existing().unwrap();
        assert_eq!(account.address, address);

        let err = MaybeCpAmm::Absent(address).into_existing().unwrap_err();
        assert!(matches!(err, Error::AccountNotFound(a) if a == address));
    }

    #[test]
    fn exists_flag_matches_variant() {
        let address = Pubkey::new_unique();
        assert!(existing(address).exists());
        assert!(existing(address).account().is_some());
        assert!(!MaybeCpAmm::Absent(address).exists());
        assert!(MaybeCpAmm::Absent(address).account().is_none());
    }
}
