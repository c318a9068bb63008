//! Failure ledger: couplings grouped by the direct dependency that introduced them.

use crate::coordinate::Coordinate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Header line of a rendered ledger.
pub const REPORT_HEADER: &str = "The following direct dependencies may cause unreproducible builds:";

/// Trailing line of a rendered ledger.
pub const REPORT_FOOTER: &str = "For full inheritance trees, run with verbose flag.";

/// Label used for the ancestor-chain key in rendered reports.
pub const ANCESTOR_CHAIN_LABEL: &str = "BAD PARENT";

/// Attribution key for a recorded coupling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "coordinate", rename_all = "kebab-case")]
pub enum LedgerKey {
    /// Found underneath a direct dependency of the root project.
    DirectDependency(Coordinate),
    /// Found in the root project's own parent chain.
    AncestorChain,
}

impl fmt::Display for LedgerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DirectDependency(coordinate) => write!(f, "{coordinate}"),
            Self::AncestorChain => f.write_str(ANCESTOR_CHAIN_LABEL),
        }
    }
}

/// All couplings attributed to one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Attribution key.
    pub key: LedgerKey,
    /// Offending coordinates, without duplicates.
    pub offending: BTreeSet<Coordinate>,
}

/// Couplings keyed by originating direct dependency, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FailureLedger {
    entries: Vec<LedgerEntry>,
}

impl FailureLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `offending` under `key`.
    ///
    /// Returns false if the coordinate was already recorded under that key.
    pub fn record(&mut self, key: LedgerKey, offending: Coordinate) -> bool {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            return entry.offending.insert(offending);
        }
        self.entries.push(LedgerEntry {
            key,
            offending: BTreeSet::from([offending]),
        });
        true
    }

    /// Returns true if nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Total number of recorded (key, coordinate) pairs.
    #[must_use]
    pub fn coupling_count(&self) -> usize {
        self.entries.iter().map(|e| e.offending.len()).sum()
    }

    /// Entries in first-seen key order.
    pub fn entries(&self) -> impl Iterator<Item = &LedgerEntry> {
        self.entries.iter()
    }

    /// Offending coordinates recorded under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &LedgerKey) -> Option<&BTreeSet<Coordinate>> {
        self.entries
            .iter()
            .find(|e| &e.key == key)
            .map(|e| &e.offending)
    }

    /// Renders the grouped summary report.
    #[must_use]
    pub fn render(&self) -> String {
        use std::fmt::Write;

        let mut report = String::new();
        let _ = writeln!(report, "{REPORT_HEADER}");
        for entry in &self.entries {
            let _ = write!(report, "\n{}", entry.key);
            for coordinate in &entry.offending {
                let _ = write!(report, "\n\t{coordinate}");
            }
            report.push('\n');
        }
        let _ = write!(report, "\n{REPORT_FOOTER}");
        report
    }
}
