//! Overlap clustering.
//!
//! Groups time ranges that need to share horizontal space. The grouping is
//! a single greedy pass over start-sorted ranges: a range joins the first
//! cluster whose anchor or any member contains its start, otherwise it
//! anchors a new cluster. Column widths come from the occupant count, not
//! from peak concurrency.

use serde::Serialize;

use crate::time::TimeRange;

/// A group of ranges considered to be in the same time block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverlapCluster {
    anchor: TimeRange,
    members: Vec<TimeRange>,
}

impl OverlapCluster {
    fn new(anchor: TimeRange) -> Self {
        Self {
            anchor,
            members: Vec::new(),
        }
    }

    /// The range that opened the cluster.
    pub fn anchor(&self) -> &TimeRange {
        &self.anchor
    }

    /// Ranges that joined after the anchor, in arrival order.
    pub fn members(&self) -> &[TimeRange] {
        &self.members
    }

    /// Occupant count: the anchor plus every member.
    pub fn size(&self) -> usize {
        self.members.len() + 1
    }

    /// Whether `range` belongs here: its start falls inside the anchor, or
    /// failing that inside any member.
    fn admits(&self, range: &TimeRange) -> bool {
        let start = range.start();
        self.anchor.contains(start) || self.members.iter().any(|m| m.contains(start))
    }
}

/// Mutable cluster construction. Freeze with [`ClusterBuilder::finish`].
#[derive(Debug, Default)]
pub struct ClusterBuilder {
    clusters: Vec<OverlapCluster>,
    assignments: Vec<usize>,
}

impl ClusterBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the next range and return the index of the cluster it landed in.
    ///
    /// Ranges must arrive in ascending start order.
    pub fn push(&mut self, range: TimeRange) -> usize {
        debug_assert!(
            self.last_start().map_or(true, |prev| prev <= range.start()),
            "ranges must be pushed in start order"
        );

        let index = match self.clusters.iter().position(|c| c.admits(&range)) {
            Some(index) => {
                self.clusters[index].members.push(range);
                index
            }
            None => {
                self.clusters.push(OverlapCluster::new(range));
                self.clusters.len() - 1
            }
        };
        self.assignments.push(index);
        index
    }

    fn last_start(&self) -> Option<chrono::NaiveDateTime> {
        let &cluster = self.assignments.last()?;
        let cluster = &self.clusters[cluster];
        Some(
            cluster
                .members
                .last()
                .unwrap_or(&cluster.anchor)
                .start(),
        )
    }

    /// Freeze the clusters built so far.
    pub fn finish(self) -> Clusters {
        Clusters {
            clusters: self.clusters,
            assignments: self.assignments,
        }
    }
}

/// Immutable result of a clustering pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Clusters {
    clusters: Vec<OverlapCluster>,
    assignments: Vec<usize>,
}

impl Clusters {
    /// Number of clusters.
    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    /// Whether there are no clusters.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Clusters in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, OverlapCluster> {
        self.clusters.iter()
    }

    /// Cluster by index.
    pub fn get(&self, index: usize) -> Option<&OverlapCluster> {
        self.clusters.get(index)
    }

    /// Index of the cluster holding the range pushed at `position`.
    pub fn cluster_of(&self, position: usize) -> Option<usize> {
        self.assignments.get(position).copied()
    }

    /// Occupant count of the cluster holding the range pushed at `position`.
    pub fn size_of(&self, position: usize) -> Option<usize> {
        self.cluster_of(position)
            .and_then(|index| self.clusters.get(index))
            .map(OverlapCluster::size)
    }
}

/// Cluster start-sorted ranges in one pass.
pub fn group_overlaps<'a>(ranges: impl IntoIterator<Item = &'a TimeRange>) -> Clusters {
    let mut builder = ClusterBuilder::new();
    for range in ranges {
        builder.push(*range);
    }
    builder.finish()
}
