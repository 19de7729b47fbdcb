use log::{error, warn};
use serde::{Deserialize, Serialize};

use crate::names::{ascii_bytes, format_name_identifier};
use crate::update_error::{ErrorKind, NameUpdateResult};

/// The three wallet capabilities a renewal batch needs, injected as plain
/// functions over a caller-supplied console/wallet state. The caller decides
/// what `T` is; the batch processor never touches wallet internals directly.
pub struct RenewOps<T> {
    /// Builds a raw renewal transaction for the identifier, returning its hex.
    pub update: fn(state: &mut T, identifier: &str) -> NameUpdateResult<String>,

    /// Relays a raw transaction to the network.
    pub broadcast: fn(state: &mut T, tx_hex: &str) -> Result<(), String>,

    /// Registers a raw transaction in the wallet's local transaction set.
    /// Returns false if the wallet rejected it.
    pub add_to_wallet: fn(state: &mut T, tx_hex: &str) -> bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum RenewalOutcome {
    Renewed,
    /// The name was updated too recently; renewing it now is disallowed by
    /// policy. Not a failure.
    SkippedTooRecent,
    FailedInsufficientFunds(String),
    FailedBroadcast(String),
    FailedAddToWallet(String),
    FatalAddressCorruption(String),
    FailedUnexpected(String),
}

impl RenewalOutcome {
    /// Outcomes that abort the remaining batch: exhausted funds recur for
    /// every remaining item, and address corruption or an unknown failure
    /// means the wallet cannot be trusted to keep building transactions.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenewalOutcome::FailedInsufficientFunds(_)
                | RenewalOutcome::FatalAddressCorruption(_)
                | RenewalOutcome::FailedUnexpected(_)
        )
    }

    pub fn is_failure(&self) -> bool {
        !matches!(
            self,
            RenewalOutcome::Renewed | RenewalOutcome::SkippedTooRecent
        )
    }
}

/// Combined report of a renewal batch, one outcome per attempted identifier.
/// `aborted` is set when a fatal outcome stopped the batch before the end;
/// identifiers that were never attempted have no entry.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RenewalReport {
    pub outcomes: Vec<(Vec<u8>, RenewalOutcome)>,
    pub aborted: bool,
}

impl RenewalReport {
    pub fn renewed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|(_, o)| *o == RenewalOutcome::Renewed)
            .count()
    }

    pub fn failures(&self) -> Vec<(&[u8], &RenewalOutcome)> {
        self.outcomes
            .iter()
            .filter(|(_, o)| o.is_failure())
            .map(|(id, o)| (id.as_slice(), o))
            .collect()
    }

    /// The address-corruption message, if the batch hit one. Callers should
    /// surface this distinctly from operational failures: it means the
    /// wallet's own state is damaged and needs immediate attention.
    pub fn integrity_failure(&self) -> Option<&str> {
        self.outcomes.iter().find_map(|(_, o)| match o {
            RenewalOutcome::FatalAddressCorruption(msg) => Some(msg.as_str()),
            _ => None,
        })
    }
}

/// Renews the given names, one at a time, in input order.
///
/// The order of operations per name is update, broadcast, add_to_wallet, and
/// add_to_wallet for name N must complete before update runs for name N+1.
/// The wallet only learns that a renewal's inputs are spent once the server
/// echoes the transaction back, several seconds later; registering it locally
/// right away keeps later renewals in the batch from selecting the same coin
/// as input and double-spending it. This is also why the batch is sequential
/// rather than concurrent. No retries are performed.
pub fn renew_names<T>(
    state: &mut T,
    identifiers: &[Vec<u8>],
    ops: &RenewOps<T>,
) -> RenewalReport {
    let mut report = RenewalReport::default();

    for identifier in identifiers {
        // The transaction builder takes a text identifier.
        // TODO: support non-ASCII encodings
        let ascii = match ascii_bytes(identifier) {
            Some(ascii) => ascii,
            None => {
                let msg = format!("non-ASCII identifier {}", hex::encode(identifier));
                error!("Cannot renew: {}", msg);
                report
                    .outcomes
                    .push((identifier.clone(), RenewalOutcome::FailedUnexpected(msg)));
                report.aborted = true;
                break;
            }
        };

        let tx_hex = match (ops.update)(state, &ascii) {
            Ok(tx_hex) => tx_hex,
            Err(err) => match &*err {
                ErrorKind::UpdatedTooRecently(_) => {
                    report
                        .outcomes
                        .push((identifier.clone(), RenewalOutcome::SkippedTooRecent));
                    continue;
                }
                ErrorKind::NotEnoughFunds(_) | ErrorKind::NoDynamicFeeEstimates => {
                    warn!("Stopping renewal batch: {}", err);
                    report.outcomes.push((
                        identifier.clone(),
                        RenewalOutcome::FailedInsufficientFunds(err.to_string()),
                    ));
                    report.aborted = true;
                    break;
                }
                ErrorKind::AddressCorruption(_) => {
                    error!("Stopping renewal batch: {}", err);
                    report.outcomes.push((
                        identifier.clone(),
                        RenewalOutcome::FatalAddressCorruption(err.to_string()),
                    ));
                    report.aborted = true;
                    break;
                }
                ErrorKind::Other(_) => {
                    error!(
                        "Unexpected failure renewing {}: {}",
                        format_name_identifier(identifier),
                        err
                    );
                    report.outcomes.push((
                        identifier.clone(),
                        RenewalOutcome::FailedUnexpected(err.to_string()),
                    ));
                    report.aborted = true;
                    break;
                }
            },
        };

        if let Err(err) = (ops.broadcast)(state, &tx_hex) {
            warn!(
                "Error broadcasting renewal for {}: {}",
                format_name_identifier(identifier),
                err
            );
            report
                .outcomes
                .push((identifier.clone(), RenewalOutcome::FailedBroadcast(err)));
            continue;
        }

        if !(ops.add_to_wallet)(state, &tx_hex) {
            let msg = format!(
                "Error adding renewal for {} to wallet",
                format_name_identifier(identifier)
            );
            warn!("{}", msg);
            report
                .outcomes
                .push((identifier.clone(), RenewalOutcome::FailedAddToWallet(msg)));
            continue;
        }

        report
            .outcomes
            .push((identifier.clone(), RenewalOutcome::Renewed));
    }

    report
}
