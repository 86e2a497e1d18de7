//! Append-only record of every write attempted in this session.

use alloy::primitives::TxHash;

use crate::chain::ReceiptStatus;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TxStatus {
    Pending,
    Confirmed,
    Failed,
}

impl From<ReceiptStatus> for TxStatus {
    fn from(status: ReceiptStatus) -> Self {
        match status {
            ReceiptStatus::Success => Self::Confirmed,
            ReceiptStatus::Reverted => Self::Failed,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    /// The wallet returned a hash.
    Submitted { hash: TxHash, status: TxStatus },
    /// The wallet or node refused the submission.
    Rejected { message: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxLogEntry {
    pub operation: String,
    pub outcome: TxOutcome,
}

/// Entries are kept in submission order and never removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TxLog {
    entries: Vec<TxLogEntry>,
}

impl TxLog {
    pub fn record_submitted(&mut self, operation: impl Into<String>, hash: TxHash) {
        self.entries.push(TxLogEntry {
            operation: operation.into(),
            outcome: TxOutcome::Submitted { hash, status: TxStatus::Pending },
        });
    }

    pub fn record_rejected(&mut self, operation: impl Into<String>, message: impl Into<String>) {
        self.entries.push(TxLogEntry {
            operation: operation.into(),
            outcome: TxOutcome::Rejected { message: message.into() },
        });
    }

    /// Update the status of every entry carrying `hash`. Returns whether any
    /// entry matched.
    pub fn set_status(&mut self, hash: TxHash, new_status: TxStatus) -> bool {
        let mut found = false;
        for entry in &mut self.entries {
            if let TxOutcome::Submitted { hash: h, status } = &mut entry.outcome {
                if *h == hash {
                    *status = new_status;
                    found = true;
                }
            }
        }
        found
    }

    pub fn entries(&self) -> &[TxLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, TxOutcome::Submitted { status: TxStatus::Pending, .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_attempt_adds_exactly_one_entry_in_order() {
        let mut log = TxLog::default();
        log.record_submitted("Approve USDC", TxHash::with_last_byte(1));
        assert_eq!(log.len(), 1);
        log.record_rejected("Deposit USDC", "User rejected the request");
        assert_eq!(log.len(), 2);
        log.record_submitted("Redeem to USDC", TxHash::with_last_byte(2));
        assert_eq!(log.len(), 3);

        let ops: Vec<_> = log.entries().iter().map(|e| e.operation.as_str()).collect();
        assert_eq!(ops, ["Approve USDC", "Deposit USDC", "Redeem to USDC"]);
    }

    #[test]
    fn receipt_status_maps_to_log_status() {
        assert_eq!(TxStatus::from(ReceiptStatus::Success), TxStatus::Confirmed);
        assert_eq!(TxStatus::from(ReceiptStatus::Reverted), TxStatus::Failed);
    }

    #[test]
    fn rejected_entries_carry_no_hash() {
        let mut log = TxLog::default();
        log.record_rejected("Revoke aUSDC", "insufficient funds");
        assert!(matches!(log.entries()[0].outcome, TxOutcome::Rejected { .. }));
        assert_eq!(log.pending_count(), 0);
    }

    #[test]
    fn repeated_hashes_are_kept() {
        let mut log = TxLog::default();
        let hash = TxHash::with_last_byte(7);
        log.record_submitted("Approve USDC", hash);
        log.record_submitted("Approve USDC", hash);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn status_updates_match_by_hash() {
        let mut log = TxLog::default();
        log.record_submitted("Approve USDC", TxHash::with_last_byte(1));
        log.record_submitted("Deposit USDC", TxHash::with_last_byte(2));
        assert_eq!(log.pending_count(), 2);

        assert!(log.set_status(TxHash::with_last_byte(2), TxStatus::Confirmed));
        assert!(!log.set_status(TxHash::with_last_byte(9), TxStatus::Failed));
        assert_eq!(log.pending_count(), 1);
        assert_eq!(
            log.entries()[1].outcome,
            TxOutcome::Submitted { hash: TxHash::with_last_byte(2), status: TxStatus::Confirmed }
        );
    }
}
