use serde::{Deserialize, Serialize};

use crate::wallet::OutPoint;

/// The name operation carried by a transaction output.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum NameOperation {
    /// name_new: a salted commitment to a name. The identifier and value are
    /// not public (and not known here) until a first-update resolves them.
    New,
    /// name_firstupdate or name_update: reveals or refreshes a name.
    AnyUpdate { name: Vec<u8>, value: Vec<u8> },
}

impl NameOperation {
    pub fn name_value(&self) -> Option<(&[u8], &[u8])> {
        match self {
            NameOperation::New => None,
            NameOperation::AnyUpdate { name, value } => Some((name, value)),
        }
    }
}

/// A spendable output carrying a name operation, as reported by the wallet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NameCoin {
    pub outpoint: OutPoint,
    /// Height of the confirming block. None while the output is unconfirmed.
    pub height: Option<u32>,
    pub address: String,
    pub name_op: Option<NameOperation>,
}

/// The most recently known block in the local view of the chain. Absent while
/// the network is disconnected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainTip {
    pub block_height: u32,
    /// Unix timestamp of the tip block header.
    pub timestamp: i64,
}
