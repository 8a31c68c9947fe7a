//! Transaction lifecycle tracking.
//!
//! A write moves through `Idle → Pending → Confirming → Success | Failed`.
//! [`TxTracker`] publishes the current phase over a watch channel so callers
//! can poll or await transitions. Observed sequences are monotonic: a
//! transition that would move backwards is dropped (and logged), so no
//! subscriber ever sees `Confirming` after `Pending` has been passed twice
//! or a terminal phase regress. `reset` is the only way back to `Idle`.

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

/// Phase of one state-changing call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxPhase {
    /// No transaction in flight.
    Idle,
    /// Submitted, awaiting wallet/network acceptance.
    Pending,
    /// Accepted with a hash, awaiting block confirmation.
    Confirming {
        /// The transaction hash.
        hash: TxHash,
    },
    /// Mined successfully.
    Success {
        /// The transaction hash.
        hash: TxHash,
        /// Block it was mined in.
        block_number: u64,
    },
    /// Submission or confirmation failed.
    Failed {
        /// Human-readable cause (rejection, revert, transport, timeout).
        message: String,
    },
}

impl TxPhase {
    /// Position in the forward order; regressions compare lower.
    const fn rank(&self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Pending => 1,
            Self::Confirming { .. } => 2,
            Self::Success { .. } | Self::Failed { .. } => 3,
        }
    }

    /// Whether this phase ends the lifecycle.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Success { .. } | Self::Failed { .. })
    }

    /// The transaction hash, once one exists.
    #[must_use]
    pub const fn hash(&self) -> Option<TxHash> {
        match self {
            Self::Confirming { hash } | Self::Success { hash, .. } => Some(*hash),
            _ => None,
        }
    }

    /// The failure message, if the lifecycle failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Publishes the lifecycle of one in-flight transaction.
///
/// One tracker represents at most one transaction at a time. Starting a new
/// write while a previous one is still tracked resets the tracker first
/// (last-write-wins); the tracker does not queue.
#[derive(Debug)]
pub struct TxTracker {
    tx: watch::Sender<TxPhase>,
}

impl TxTracker {
    /// Create a tracker in the `Idle` phase.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = watch::channel(TxPhase::Idle);
        Self { tx }
    }

    /// Snapshot of the current phase.
    #[must_use]
    pub fn phase(&self) -> TxPhase {
        self.tx.borrow().clone()
    }

    /// Subscribe to phase changes.
    ///
    /// The receiver observes a subsequence of
    /// `Idle → Pending → Confirming → Success | Failed` (watch channels may
    /// skip intermediate values under load, but never reorder them).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<TxPhase> {
        self.tx.subscribe()
    }

    /// Apply a forward transition.
    ///
    /// Returns `false` and leaves the phase untouched if the transition
    /// would move backwards or sideways between terminal phases.
    pub fn advance(&self, next: TxPhase) -> bool {
        let mut applied = false;
        self.tx.send_if_modified(|current| {
            if next.rank() > current.rank() {
                debug!(from = ?current, to = ?next, "tx phase transition");
                *current = next.clone();
                applied = true;
                true
            } else {
                warn!(from = ?current, to = ?next, "ignoring tx phase regression");
                false
            }
        });
        applied
    }

    /// Clear the lifecycle back to `Idle`.
    ///
    /// Only local bookkeeping is cleared; an in-flight network operation is
    /// not cancelled and its late transitions will be dropped as regressions
    /// only if a newer write has already moved the tracker forward.
    pub fn reset(&self) {
        self.tx.send_replace(TxPhase::Idle);
    }
}

impl Default for TxTracker {
    fn default() -> Self {
        Self::new()
    }
}
