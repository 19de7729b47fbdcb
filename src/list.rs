use serde::{Deserialize, Serialize};

use crate::coin::{ChainTip, NameOperation};
use crate::names::{ascii_bytes, format_name_identifier, format_name_value};
use crate::status::{effective_name_op, StatusDeriver};
use crate::wallet::{FrozenState, OutPoint, WalletView};

/// Columns of the name-UTXO list, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    Value,
    ExpiresIn,
    Status,
}

impl Column {
    pub const ALL: [Column; 4] = [Column::Name, Column::Value, Column::ExpiresIn, Column::Status];

    /// Columns the list filter searches.
    pub const FILTERED: [Column; 2] = [Column::Name, Column::Value];

    pub fn header(&self) -> &'static str {
        match self {
            Column::Name => "Name",
            Column::Value => "Value",
            Column::ExpiresIn => "Expires (Est.)",
            Column::Status => "Status",
        }
    }
}

/// Data for one copy action: the ASCII form when the bytes decode as ASCII,
/// and the hex form always.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyPayload {
    pub ascii: Option<String>,
    pub hex: String,
}

impl CopyPayload {
    fn of(data: &[u8]) -> Self {
        CopyPayload {
            ascii: ascii_bytes(data),
            hex: hex::encode(data),
        }
    }
}

/// One row of the name-UTXO list, fully formatted for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NameRow {
    pub outpoint: OutPoint,
    /// Raw identifier. None for a name_new with no queued first-update: the
    /// identifier is simply not known yet, so no copy or configure action can
    /// be offered for this row.
    pub identifier: Option<Vec<u8>>,
    pub value: Option<Vec<u8>>,
    pub formatted_name: String,
    pub formatted_value: String,
    /// ISO datetime of the estimated expiration, or empty.
    pub formatted_expires_at: String,
    /// Advisory text for the expiration column, or empty.
    pub expires_text: String,
    pub status: String,
    pub label: Option<String>,
    pub frozen: FrozenState,
    /// Whether the wallet's transaction set has the row's transaction.
    pub tx_in_wallet: bool,
}

impl NameRow {
    /// Stable `txid:vout` key for this row.
    pub fn key(&self) -> String {
        self.outpoint.to_string()
    }

    /// A name can only be configured once its identifier is known and the
    /// wallet holds its transaction.
    pub fn can_configure(&self) -> bool {
        self.identifier.is_some() && self.tx_in_wallet
    }

    pub fn can_show_transaction(&self) -> bool {
        self.tx_in_wallet
    }

    pub fn copy_identifier(&self) -> Option<CopyPayload> {
        self.identifier.as_deref().map(CopyPayload::of)
    }

    pub fn copy_value(&self) -> Option<CopyPayload> {
        self.value.as_deref().map(CopyPayload::of)
    }
}

/// Builds display rows for the wallet's current name UTXOs. Outputs without a
/// name operation are not part of this list. Row order follows the wallet's
/// UTXO order; sorting is the view's concern.
pub fn build_rows<W: WalletView>(
    wallet: &W,
    tip: Option<&ChainTip>,
    deriver: &StatusDeriver,
) -> Vec<NameRow> {
    let mut rows = vec![];

    for coin in wallet.name_utxos() {
        if coin.name_op.is_none() {
            continue;
        }

        let queued = match coin.name_op {
            Some(NameOperation::New) => {
                wallet.queued_firstupdate_from_new(&coin.outpoint.txid, coin.outpoint.vout)
            }
            _ => None,
        };

        let status = deriver.derive(&coin, tip);

        let (identifier, value) = match effective_name_op(&coin, queued.as_ref()) {
            Some(NameOperation::AnyUpdate { name, value }) => {
                (Some(name.clone()), Some(value.clone()))
            }
            _ => (None, None),
        };

        let formatted_name = identifier
            .as_deref()
            .map(format_name_identifier)
            .unwrap_or_default();
        let formatted_value = value
            .as_deref()
            .map(format_name_value)
            .unwrap_or_default();

        let expires_text = status
            .expires_in_blocks
            .map(|n| {
                format!(
                    "Expires in {} blocks\nDate/time is only an estimate; do not rely on it!",
                    n
                )
            })
            .unwrap_or_default();
        let formatted_expires_at = status
            .expires_at
            .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default();

        let frozen = FrozenState::of(
            wallet.is_frozen_address(&coin.address),
            wallet.is_frozen_coin(&coin.outpoint),
        );

        // An empty label hides the description field, same as no label
        let label = wallet
            .get_label(&coin.outpoint.txid)
            .filter(|l| !l.is_empty());

        rows.push(NameRow {
            outpoint: coin.outpoint,
            identifier,
            value,
            formatted_name,
            formatted_value,
            formatted_expires_at,
            expires_text,
            status: status.status_text,
            label,
            frozen,
            tx_in_wallet: wallet.has_transaction(&coin.outpoint.txid),
        });
    }

    rows
}
