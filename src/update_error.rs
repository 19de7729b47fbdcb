use std::error::{Error as StdError, self};
use std::fmt;

use serde::{Deserialize, Serialize};

pub type NameUpdateResult<T> = std::result::Result<T, NameUpdateError>;

pub type NameUpdateError = Box<ErrorKind>;

/// Failure signals from the renewal-transaction builder. The batch processor
/// matches on these to decide whether to skip the item, record the failure, or
/// abort the remaining batch.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The name was updated too recently to be renewed again. A policy skip,
    /// not a failure.
    UpdatedTooRecently(String),
    /// The wallet cannot fund the renewal. Batch-wide: remaining items would
    /// fail the same way.
    NotEnoughFunds(String),
    /// No dynamic fee estimates are available to fund the renewal.
    NoDynamicFeeEstimates,
    /// The wallet derived an address it does not control. An integrity
    /// failure, not a per-item problem.
    AddressCorruption(String),
    Other(String),
}

impl StdError for ErrorKind {
    fn description(&self) -> &str {
        match *self {
            ErrorKind::UpdatedTooRecently(_) => "Name was updated too recently to be renewed",
            ErrorKind::NotEnoughFunds(_) => "Not enough funds to build the renewal transaction",
            ErrorKind::NoDynamicFeeEstimates => "Dynamic fee estimates are not available",
            ErrorKind::AddressCorruption(_) => "Wallet address derivation is corrupted",
            ErrorKind::Other(_) => "Failed to build the renewal transaction",
        }
    }

    fn cause(&self) -> Option<&dyn error::Error> {
        None
    }
}

impl fmt::Display for ErrorKind {
    #[allow(deprecated)]
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match &*self {
            ErrorKind::UpdatedTooRecently(name) => write!(fmt, "{}: {}", self.description(), name),
            ErrorKind::NotEnoughFunds(detail) => write!(fmt, "{}: {}", self.description(), detail),
            ErrorKind::NoDynamicFeeEstimates => write!(fmt, "{}", self.description()),
            ErrorKind::AddressCorruption(detail) => write!(fmt, "{}: {}", self.description(), detail),
            ErrorKind::Other(detail) => write!(fmt, "{}: {}", self.description(), detail),
        }
    }
}
