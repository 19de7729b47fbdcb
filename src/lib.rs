//! Wallet-side core of a Namecoin name-UTXO ("UNO") list: derives display
//! statuses and expiration estimates for name outputs, builds formatted list
//! rows, and renews batches of names through injected wallet capabilities.
//! Rendering, sync and transaction construction live in the host application.

pub mod coin;
pub mod list;
pub mod names;
pub mod renew;
pub mod status;
pub mod update_error;
pub mod wallet;
