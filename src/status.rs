use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coin::{ChainTip, NameCoin, NameOperation};
use crate::names::name_expiration_datetime_estimate;

/// Minimum confirmations assumed for a pending registration when estimating
/// its ETA. This is a fixed approximation; it should eventually come from the
/// queued first-update's actual minimum-confirmation requirement.
pub const DEFAULT_REGISTRATION_CONFIRMATIONS: u32 = 12;

/// Average block time in minutes, used for the registration ETA.
pub const MINUTES_PER_BLOCK: i64 = 10;

/// Display status of a name coin. `expires_in_blocks` and `expires_at` are
/// present iff the coin carries an update operation and the chain tip is known.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DerivedStatus {
    pub status_text: String,
    pub expires_in_blocks: Option<i64>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Derives display statuses for name coins. Pure over its inputs; an absent
/// chain tip or coin height simply yields the pending branches.
#[derive(Debug, Clone, Copy)]
pub struct StatusDeriver {
    pub registration_confirmations: u32,
}

impl Default for StatusDeriver {
    fn default() -> Self {
        StatusDeriver {
            registration_confirmations: DEFAULT_REGISTRATION_CONFIRMATIONS,
        }
    }
}

impl StatusDeriver {
    pub fn derive(&self, coin: &NameCoin, tip: Option<&ChainTip>) -> DerivedStatus {
        match coin.name_op {
            Some(NameOperation::AnyUpdate { .. }) => {
                let estimate = tip.and_then(|tip| {
                    name_expiration_datetime_estimate(coin.height, tip.block_height, tip.timestamp)
                });

                match estimate {
                    Some((expires_in, expires_at)) => DerivedStatus {
                        status_text: String::new(),
                        expires_in_blocks: Some(expires_in),
                        expires_at: Some(expires_at),
                    },
                    None => DerivedStatus {
                        status_text: String::from("Update Pending"),
                        expires_in_blocks: None,
                        expires_at: None,
                    },
                }
            }
            _ => {
                // name_new, whether or not a first-update is queued for it
                let status_text = match (coin.height, tip) {
                    (Some(height), Some(tip)) => {
                        let blocks_left = height as i64 - tip.block_height as i64
                            + self.registration_confirmations as i64;
                        format!(
                            "Registration Pending, ETA {}min",
                            MINUTES_PER_BLOCK * blocks_left
                        )
                    }
                    _ => String::from("Registration Pending"),
                };

                DerivedStatus {
                    status_text,
                    expires_in_blocks: None,
                    expires_at: None,
                }
            }
        }
    }
}

/// The operation to take the display name and value from: the coin's own
/// update operation, or the queued first-update's operation for a name_new
/// whose first-update the wallet has already built. A name_new with no queued
/// first-update keeps its own operation, which carries no name or value.
pub fn effective_name_op<'a>(
    coin: &'a NameCoin,
    queued_firstupdate: Option<&'a NameCoin>,
) -> Option<&'a NameOperation> {
    match coin.name_op {
        Some(NameOperation::AnyUpdate { .. }) => coin.name_op.as_ref(),
        Some(NameOperation::New) => match queued_firstupdate.and_then(|c| c.name_op.as_ref()) {
            Some(op @ NameOperation::AnyUpdate { .. }) => Some(op),
            _ => coin.name_op.as_ref(),
        },
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::OutPoint;

    fn new_coin(height: Option<u32>) -> NameCoin {
        NameCoin {
            outpoint: OutPoint::new([1; 32], 0),
            height,
            address: String::from("N1testaddress"),
            name_op: Some(NameOperation::New),
        }
    }

    fn update_coin(height: Option<u32>) -> NameCoin {
        NameCoin {
            outpoint: OutPoint::new([2; 32], 1),
            height,
            address: String::from("N2testaddress"),
            name_op: Some(NameOperation::AnyUpdate {
                name: b"d/example".to_vec(),
                value: b"{}".to_vec(),
            }),
        }
    }

    #[test]
    fn registration_pending_without_tip() {
        let status = StatusDeriver::default().derive(&new_coin(None), None);

        assert_eq!(status.status_text, "Registration Pending");
        assert_eq!(status.expires_in_blocks, None);
        assert_eq!(status.expires_at, None);
    }

    #[test]
    fn registration_eta_at_tip_height() {
        let tip = ChainTip {
            block_height: 100,
            timestamp: 1_700_000_000,
        };
        let status = StatusDeriver::default().derive(&new_coin(Some(100)), Some(&tip));

        // 10 minutes per block times the assumed 12 confirmations
        assert_eq!(status.status_text, "Registration Pending, ETA 120min");
        assert_eq!(status.expires_in_blocks, None);
    }

    #[test]
    fn registration_eta_ahead_of_tip() {
        let tip = ChainTip {
            block_height: 90,
            timestamp: 1_700_000_000,
        };
        let status = StatusDeriver::default().derive(&new_coin(Some(100)), Some(&tip));

        assert_eq!(status.status_text, "Registration Pending, ETA 220min");
    }

    #[test]
    fn registration_eta_honors_confirmation_override() {
        let deriver = StatusDeriver {
            registration_confirmations: 1,
        };
        let tip = ChainTip {
            block_height: 100,
            timestamp: 1_700_000_000,
        };
        let status = deriver.derive(&new_coin(Some(100)), Some(&tip));

        assert_eq!(status.status_text, "Registration Pending, ETA 10min");
    }

    #[test]
    fn update_gets_expiration_estimate() {
        let tip = ChainTip {
            block_height: 500,
            timestamp: 1_700_000_000,
        };
        let status = StatusDeriver::default().derive(&update_coin(Some(400)), Some(&tip));

        assert_eq!(status.status_text, "");
        assert_eq!(
            status.expires_in_blocks,
            Some(400 + crate::names::NAME_EXPIRATION_BLOCKS - 500)
        );
        assert!(status.expires_at.is_some());
    }

    #[test]
    fn unconfirmed_update_is_pending() {
        let tip = ChainTip {
            block_height: 500,
            timestamp: 1_700_000_000,
        };
        let status = StatusDeriver::default().derive(&update_coin(None), Some(&tip));

        assert_eq!(status.status_text, "Update Pending");
        assert_eq!(status.expires_in_blocks, None);
    }

    #[test]
    fn update_without_tip_is_pending() {
        let status = StatusDeriver::default().derive(&update_coin(Some(400)), None);

        assert_eq!(status.status_text, "Update Pending");
        assert_eq!(status.expires_in_blocks, None);
    }

    #[test]
    fn derive_is_pure() {
        let tip = ChainTip {
            block_height: 500,
            timestamp: 1_700_000_000,
        };
        let coin = update_coin(Some(400));
        let deriver = StatusDeriver::default();

        assert_eq!(deriver.derive(&coin, Some(&tip)), deriver.derive(&coin, Some(&tip)));
    }

    #[test]
    fn queued_firstupdate_resolves_name_op() {
        let coin = new_coin(Some(100));
        let queued = update_coin(None);

        let op = effective_name_op(&coin, Some(&queued)).unwrap();
        assert_eq!(op.name_value().unwrap().0, b"d/example");

        // Without a queued first-update the name_new stays unresolved
        let op = effective_name_op(&coin, None).unwrap();
        assert_eq!(op.name_value(), None);
    }
}
