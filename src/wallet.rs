use serde::{Deserialize, Serialize};

use crate::coin::NameCoin;

pub type Hash256 = [u8; 32];

/// Points at a single output of a wallet transaction.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutPoint {
    pub txid: Hash256,
    pub vout: u32,
}

impl OutPoint {
    pub fn new(txid: Hash256, vout: u32) -> Self {
        OutPoint { txid, vout }
    }
}

impl std::fmt::Display for OutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", hex::encode(self.txid), self.vout)
    }
}

impl std::fmt::Debug for OutPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutPoint")
            .field("txid", &hex::encode(self.txid))
            .field("vout", &self.vout)
            .finish()
    }
}

/// Whether the wallet has frozen the coin, the address holding it, or both.
/// Frozen outputs are never selected as transaction inputs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrozenState {
    NotFrozen,
    Address,
    Coin,
    AddressAndCoin,
}

impl FrozenState {
    pub fn of(address_frozen: bool, coin_frozen: bool) -> Self {
        match (address_frozen, coin_frozen) {
            (false, false) => FrozenState::NotFrozen,
            (true, false) => FrozenState::Address,
            (false, true) => FrozenState::Coin,
            (true, true) => FrozenState::AddressAndCoin,
        }
    }

    pub fn is_frozen(&self) -> bool {
        !matches!(self, FrozenState::NotFrozen)
    }

    /// Annotation text for a frozen row, if any.
    pub fn annotation(&self) -> Option<&'static str> {
        match self {
            FrozenState::NotFrozen => None,
            FrozenState::Address => Some("Address is frozen"),
            FrozenState::Coin => Some("Coin is frozen"),
            FrozenState::AddressAndCoin => Some("Address and coin are frozen"),
        }
    }
}

/// The read surface the name-UTXO list needs from the host wallet. The wallet
/// owns the UTXO set, label store and transaction set; this crate only reads
/// them through this trait.
pub trait WalletView {
    /// The wallet's current unspent name outputs. Rebuilt on every refresh;
    /// coins are not cached or persisted by this crate.
    fn name_utxos(&self) -> Vec<NameCoin>;

    fn is_frozen_address(&self, address: &str) -> bool;

    fn is_frozen_coin(&self, outpoint: &OutPoint) -> bool;

    /// The user-assigned label for a transaction, if there is one.
    fn get_label(&self, txid: &Hash256) -> Option<String>;

    /// If the given output is a name_new the wallet has already queued a
    /// first-update for, returns that first-update output. Its name operation
    /// reveals the identifier and value ahead of the registration confirming.
    fn queued_firstupdate_from_new(&self, txid: &Hash256, vout: u32) -> Option<NameCoin>;

    /// Whether the wallet's transaction set contains the given transaction.
    fn has_transaction(&self, txid: &Hash256) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outpoint_display_is_txid_colon_vout() {
        let op = OutPoint::new([0xab; 32], 3);
        let text = op.to_string();
        assert!(text.starts_with("abab"));
        assert!(text.ends_with(":3"));
    }

    #[test]
    fn frozen_state_classification() {
        assert_eq!(FrozenState::of(false, false), FrozenState::NotFrozen);
        assert_eq!(FrozenState::of(true, false), FrozenState::Address);
        assert_eq!(FrozenState::of(false, true), FrozenState::Coin);
        assert_eq!(FrozenState::of(true, true), FrozenState::AddressAndCoin);
    }

    #[test]
    fn frozen_annotations() {
        assert_eq!(FrozenState::NotFrozen.annotation(), None);
        assert_eq!(FrozenState::Address.annotation(), Some("Address is frozen"));
        assert_eq!(FrozenState::Coin.annotation(), Some("Coin is frozen"));
        assert_eq!(
            FrozenState::AddressAndCoin.annotation(),
            Some("Address and coin are frozen")
        );
        assert!(!FrozenState::NotFrozen.is_frozen());
        assert!(FrozenState::Coin.is_frozen());
    }
}
