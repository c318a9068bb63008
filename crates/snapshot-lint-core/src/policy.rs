//! Snapshot policy: which coordinates count as couplings.

use crate::coordinate::Coordinate;
use std::collections::BTreeSet;

/// Marker that identifies a mutable, unreleased version.
pub const SNAPSHOT_MARKER: &str = "SNAPSHOT";

/// Decides whether a coordinate is a reportable snapshot coupling.
///
/// The group allowlist only ever narrows what is reported: an empty allowlist
/// admits every group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotPolicy {
    group_ids: BTreeSet<String>,
}

impl SnapshotPolicy {
    /// Creates a policy restricted to the given groups (empty = unrestricted).
    #[must_use]
    pub fn new<I, S>(group_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            group_ids: group_ids.into_iter().map(Into::into).collect(),
        }
    }

    /// True iff the coordinate's version contains [`SNAPSHOT_MARKER`].
    #[must_use]
    pub fn is_snapshot(coordinate: &Coordinate) -> bool {
        coordinate.version().contains(SNAPSHOT_MARKER)
    }

    /// True iff no allowlist is configured or it contains `group` exactly.
    #[must_use]
    pub fn is_allowed_group(&self, group: &str) -> bool {
        self.group_ids.is_empty() || self.group_ids.contains(group)
    }

    /// True iff the coordinate is a snapshot in an allowed group.
    #[must_use]
    pub fn is_violation(&self, coordinate: &Coordinate) -> bool {
        Self::is_snapshot(coordinate) && self.is_allowed_group(coordinate.group())
    }

    /// The configured allowlist.
    #[must_use]
    pub fn group_ids(&self) -> &BTreeSet<String> {
        &self.group_ids
    }
}
