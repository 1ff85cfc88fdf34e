//! Violation ledger: reason → records that incurred it.

use std::collections::{BTreeMap, BTreeSet};

use userfeed_model::{RawRecord, Violation};

/// Mapping from violation reason to the records that triggered it.
///
/// Reasons iterate in rule order; records under one reason keep the order
/// they were recorded in. A record failing several rules is listed once
/// under each of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViolationLedger {
    entries: BTreeMap<Violation, Vec<RawRecord>>,
}

impl ViolationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `record` under `violation`, creating the entry on first use.
    pub fn record(&mut self, violation: Violation, record: RawRecord) {
        self.entries.entry(violation).or_default().push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct reasons recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total (reason, record) pairs, i.e. rows of the rejection artifact.
    pub fn row_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    /// Records listed under one reason, in recording order.
    pub fn records_for(&self, violation: Violation) -> &[RawRecord] {
        self.entries
            .get(&violation)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Reasons with their records, reasons in rule order.
    pub fn iter(&self) -> impl Iterator<Item = (Violation, &[RawRecord])> {
        self.entries
            .iter()
            .map(|(violation, records)| (*violation, records.as_slice()))
    }

    /// Per-reason record counts, in rule order.
    pub fn counts(&self) -> Vec<(Violation, usize)> {
        self.iter()
            .map(|(violation, records)| (violation, records.len()))
            .collect()
    }

    /// Distinct source lines that were rejected.
    pub fn rejected_lines(&self) -> BTreeSet<u64> {
        self.entries
            .values()
            .flatten()
            .map(|record| record.line)
            .collect()
    }

    /// Fold another ledger into this one.
    ///
    /// Used when records are validated in partitions: each partition fills
    /// its own ledger and the partitions are merged in input order.
    /// `other`'s records are appended after this ledger's under each reason.
    pub fn merge(&mut self, other: ViolationLedger) {
        for (violation, records) in other.entries {
            self.entries.entry(violation).or_default().extend(records);
        }
    }
}
